//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with proper user agent strings
//! - Issuing GET requests with redirect following disabled
//! - Classifying responses as fetched, relocated, or failed
//!
//! The catalog answers with a redirect when a page, book, or download does
//! not exist. A redirect is therefore a normal outcome here and never an error.

use crate::config::UserAgentConfig;
use crate::FolioError;
use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a single GET request
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with a success status
    Fetched(Response),

    /// The server answered with a redirect: the resource is gone
    Relocated {
        /// The redirect status code
        status: StatusCode,
        /// The `Location` header, if one was sent
        location: Option<String>,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use folio::config::UserAgentConfig;
/// use folio::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = match &config.contact_url {
        Some(contact_url) => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, contact_url
        ),
        None => format!("{}/{}", config.crawler_name, config.crawler_version),
    };

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none()) // Redirects mean "unavailable"
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, without following redirects
///
/// | Response | Outcome |
/// |----------|---------|
/// | 2xx | `Ok(Fetched)` |
/// | 3xx | `Ok(Relocated)` |
/// | any other status | `Err(FolioError::Status)` |
/// | network failure | `Err(FolioError::Http)` |
///
/// There is no retry: a failure is reported to the caller immediately.
pub async fn fetch(client: &Client, url: &Url) -> Result<FetchOutcome, FolioError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FolioError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();

    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        tracing::debug!("{} relocated ({}) to {:?}", url, status, location);
        return Ok(FetchOutcome::Relocated { status, location });
    }

    if !status.is_success() {
        return Err(FolioError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(FetchOutcome::Fetched(response))
}

/// Fetches a page and returns its decoded body
///
/// Returns `Ok(None)` when the page has been relocated.
pub async fn fetch_html(client: &Client, url: &Url) -> Result<Option<String>, FolioError> {
    match fetch(client, url).await? {
        FetchOutcome::Fetched(response) => {
            let body = response.text().await.map_err(|source| FolioError::Http {
                url: url.to_string(),
                source,
            })?;
            Ok(Some(body))
        }
        FetchOutcome::Relocated { .. } => Ok(None),
    }
}
