//! Address layout of the catalog site

use crate::crawler::BookId;
use crate::{UrlError, UrlResult};
use url::Url;

/// Address builder for the catalog's endpoint family
///
/// | Resource | Address |
/// |----------|---------|
/// | Listing page | `{base}/l{category}/{page}/` |
/// | Detail page | `{base}/b{id}/` |
/// | Text download | `{base}/txt.php?id={id}` |
///
/// # Examples
///
/// ```
/// use folio::url::Endpoints;
///
/// let endpoints = Endpoints::new("http://example.test", 55).unwrap();
/// let page = endpoints.listing_page(3).unwrap();
/// assert_eq!(page.as_str(), "http://example.test/l55/3/");
/// ```
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    category: u32,
}

impl Endpoints {
    /// Creates an endpoint builder rooted at `base_url`
    ///
    /// A base with a path (`http://host/mirror`) is treated as a directory, so
    /// every endpoint is resolved beneath it.
    pub fn new(base_url: &str, category: u32) -> UrlResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UrlError::InvalidScheme(base.scheme().to_string()));
        }

        if base.cannot_be_a_base() {
            return Err(UrlError::CannotBeBase(base_url.to_string()));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base, category })
    }

    /// The normalized base address
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The listing category being walked
    pub fn category(&self) -> u32 {
        self.category
    }

    /// Address of one catalog listing page
    pub fn listing_page(&self, page: u32) -> Result<Url, url::ParseError> {
        self.base.join(&format!("l{}/{}/", self.category, page))
    }

    /// Address of a book's detail page
    pub fn detail_page(&self, id: &BookId) -> Result<Url, url::ParseError> {
        self.base.join(&format!("b{}/", id))
    }

    /// Address of a book's plain-text download
    pub fn text_download(&self, id: &BookId) -> Result<Url, url::ParseError> {
        let mut url = self.base.join("txt.php")?;
        url.query_pairs_mut().append_pair("id", id.as_str());
        Ok(url)
    }
}
