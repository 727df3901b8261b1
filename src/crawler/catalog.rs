//! Catalog listing walks
//!
//! Listing pages are visited in increasing page order. The walk ends at the
//! configured last page, or earlier at the first page the catalog redirects
//! away from, which is how the catalog signals that a page does not exist.

use crate::crawler::fetcher::fetch_html;
use crate::crawler::parser::parse_listing;
use crate::url::Endpoints;
use crate::FolioError;
use reqwest::Client;
use std::fmt;

/// Opaque identifier of one catalog entry (the `239` in `/b239/`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(String);

impl BookId {
    /// Wraps a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as it appears in catalog addresses
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a catalog walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogWalk {
    /// Identifiers in page order, then in order of appearance on the page
    pub ids: Vec<BookId>,

    /// Number of listing pages fetched successfully
    pub pages_visited: u32,

    /// The page that was relocated, if the walk ended that way
    pub stopped_at: Option<u32>,
}

/// Walks listing pages `start_page..=end_page` and collects book identifiers
///
/// With `end_page = None` the walk continues until a page is relocated. A
/// catalog that never relocates a page keeps the walk going.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `endpoints` - Catalog address layout
/// * `start_page` - First page to visit (1-based)
/// * `end_page` - Last page to visit, inclusive, or `None` for no limit
///
/// # Returns
///
/// * `Ok(CatalogWalk)` - The identifiers found before the walk ended
/// * `Err(FolioError)` - A listing page failed to load or parse
pub async fn walk_catalog(
    client: &Client,
    endpoints: &Endpoints,
    start_page: u32,
    end_page: Option<u32>,
) -> Result<CatalogWalk, FolioError> {
    let mut walk = CatalogWalk::default();
    let mut page = start_page.max(1);

    loop {
        if end_page.is_some_and(|end| page > end) {
            break;
        }

        let page_url = endpoints.listing_page(page)?;
        let html = match fetch_html(client, &page_url).await? {
            Some(html) => html,
            None => {
                tracing::info!("Listing page {} does not exist, catalog walk ends", page);
                walk.stopped_at = Some(page);
                break;
            }
        };

        let ids = parse_listing(&html, &page_url)
            .map_err(|message| FolioError::malformed(page_url.as_str(), message))?;
        tracing::info!("Listing page {}: {} books", page, ids.len());

        walk.pages_visited += 1;
        walk.ids.extend(ids);

        page = match page.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(walk)
}
