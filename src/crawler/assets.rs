//! Asset downloads
//!
//! Cover images and book texts are downloaded once and written byte-for-byte
//! to a local folder. A relocated asset is reported as [`AssetOutcome::Unavailable`]
//! so the book can still be recorded without it.

use crate::crawler::fetcher::{fetch, FetchOutcome};
use crate::url::sanitize_filename;
use crate::FolioError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// What kind of content an asset holds
///
/// Both kinds are written exactly as received, so the saved file always
/// equals the response body. No charset conversion takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// A book text; a body that is not valid UTF-8 is reported with a warning
    Text,
    /// An image or other opaque payload
    Binary,
}

/// Result of an asset download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// The asset was written to this path
    Fetched(PathBuf),
    /// The catalog no longer serves this asset
    Unavailable,
}

impl AssetOutcome {
    /// Returns the written path, if any
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Fetched(path) => Some(path),
            Self::Unavailable => None,
        }
    }
}

/// Downloads one asset into `folder`
///
/// The file is named `sanitize_filename(desired_filename)`. An existing file
/// with that name is overwritten. The folder is created if it is missing.
///
/// An empty body is treated as unavailable so that every recorded asset path
/// points at a non-empty file.
///
/// # Returns
///
/// * `Ok(AssetOutcome::Fetched(path))` - The body was written to `path`
/// * `Ok(AssetOutcome::Unavailable)` - The asset was relocated or empty
/// * `Err(FolioError)` - Non-redirect failure status, network, or filesystem error
pub async fn fetch_asset(
    client: &Client,
    url: &Url,
    desired_filename: &str,
    folder: &Path,
    kind: AssetKind,
) -> Result<AssetOutcome, FolioError> {
    let response = match fetch(client, url).await? {
        FetchOutcome::Fetched(response) => response,
        FetchOutcome::Relocated { .. } => {
            tracing::debug!("Asset {} is unavailable", url);
            return Ok(AssetOutcome::Unavailable);
        }
    };

    let body = response.bytes().await.map_err(|source| FolioError::Http {
        url: url.to_string(),
        source,
    })?;

    if body.is_empty() {
        tracing::debug!("Asset {} has an empty body", url);
        return Ok(AssetOutcome::Unavailable);
    }

    if kind == AssetKind::Text && std::str::from_utf8(&body).is_err() {
        tracing::warn!("Text asset {} is not valid UTF-8, saving it unchanged", url);
    }

    let filename = sanitize_filename(desired_filename)?;
    tokio::fs::create_dir_all(folder).await?;
    let path = folder.join(filename);
    tokio::fs::write(&path, &body).await?;

    tracing::debug!("Saved {} ({} bytes) to {}", url, body.len(), path.display());
    Ok(AssetOutcome::Fetched(path))
}
