//! HTML parser for catalog listings and book detail pages
//!
//! This module handles parsing HTML content to extract:
//! - Book identifiers from a listing page
//! - Title, author, cover reference, comments and genres from a detail page
//!
//! Parse failures are returned as messages; the caller attaches the page URL.

use crate::crawler::catalog::BookId;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Links to book detail pages inside listing entries
const LISTING_LINK_SELECTOR: &str = ".d_book .bookimage a[href]";

/// The `Title :: Author` heading of a detail page
const HEADING_SELECTOR: &str = "h1";

/// The cover image of a detail page
const COVER_SELECTOR: &str = ".bookimage img";

/// Reader comment bodies
const COMMENT_SELECTOR: &str = "div.texts span.black";

/// Genre tag links
const GENRE_SELECTOR: &str = "span.d_book a";

/// Separator between title and author in the heading
const TITLE_AUTHOR_SEPARATOR: &str = "::";

/// Extracted information from a book detail page
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDetail {
    /// Book title, trimmed
    pub title: String,

    /// Book author, trimmed
    pub author: String,

    /// Absolute address of the cover image
    pub cover_url: Url,

    /// Comment bodies in document order
    pub comments: Vec<String>,

    /// Genre names in document order
    pub genres: Vec<String>,
}

/// Extracts book identifiers from a listing page
///
/// Each listing entry links to its detail page as `/b{id}/`. Links are
/// resolved against `page_url`, so absolute and relative forms both work.
/// Identifiers keep their order of appearance.
///
/// # Example
///
/// ```
/// use folio::crawler::parse_listing;
/// use url::Url;
///
/// let html = r#"<div class="d_book"><div class="bookimage"><a href="/b7/">x</a></div></div>"#;
/// let page = Url::parse("http://example.test/l55/1/").unwrap();
/// let ids = parse_listing(html, &page).unwrap();
/// assert_eq!(ids[0].as_str(), "7");
/// ```
pub fn parse_listing(html: &str, page_url: &Url) -> Result<Vec<BookId>, String> {
    let document = Html::parse_document(html);
    let selector = selector(LISTING_LINK_SELECTOR)?;

    let mut ids = Vec::new();
    for element in document.select(&selector) {
        let href = element.value().attr("href").unwrap_or_default();
        let link = page_url
            .join(href.trim())
            .map_err(|e| format!("invalid book link '{}': {}", href, e))?;
        let id = book_id_from_link(&link)
            .ok_or_else(|| format!("unexpected book link '{}'", href))?;
        ids.push(id);
    }

    Ok(ids)
}

/// Extracts book metadata from a detail page
///
/// # Rules
///
/// - The first `<h1>` must read `Title :: Author` with exactly one separator;
///   both halves are trimmed and must be non-empty
/// - The cover `<img src>` is resolved against `page_url`
/// - Comments and genres may be empty
///
/// # Example
///
/// ```
/// use folio::crawler::parse_detail;
/// use url::Url;
///
/// let html = r#"<h1>Foo :: Bar</h1><div class="bookimage"><img src="/shots/7.jpg"></div>"#;
/// let page = Url::parse("http://example.test/b7/").unwrap();
/// let detail = parse_detail(html, &page).unwrap();
/// assert_eq!(detail.title, "Foo");
/// assert_eq!(detail.author, "Bar");
/// assert_eq!(detail.cover_url.as_str(), "http://example.test/shots/7.jpg");
/// ```
pub fn parse_detail(html: &str, page_url: &Url) -> Result<ParsedDetail, String> {
    let document = Html::parse_document(html);

    let (title, author) = extract_title_author(&document)?;
    let cover_url = extract_cover_url(&document, page_url)?;
    let comments = collect_text(&document, COMMENT_SELECTOR)?;
    let genres = collect_text(&document, GENRE_SELECTOR)?;

    Ok(ParsedDetail {
        title,
        author,
        cover_url,
        comments,
        genres,
    })
}

/// Reads the identifier from a `/b{id}/` detail link
fn book_id_from_link(link: &Url) -> Option<BookId> {
    let path = link.path().trim_matches('/');
    let id = path.rsplit('/').next()?.strip_prefix('b')?;

    if id.is_empty() {
        None
    } else {
        Some(BookId::new(id))
    }
}

/// Splits the page heading into title and author
fn extract_title_author(document: &Html) -> Result<(String, String), String> {
    let heading_selector = selector(HEADING_SELECTOR)?;
    let heading = document
        .select(&heading_selector)
        .next()
        .map(element_text)
        .ok_or_else(|| "missing <h1> heading".to_string())?;

    let (title, author) = heading
        .split_once(TITLE_AUTHOR_SEPARATOR)
        .ok_or_else(|| format!("heading '{}' has no '::' separator", heading.trim()))?;
    if author.contains(TITLE_AUTHOR_SEPARATOR) {
        return Err(format!(
            "heading '{}' has more than one '::' separator",
            heading.trim()
        ));
    }
    let (title, author) = (title.trim(), author.trim());

    if title.is_empty() || author.is_empty() {
        return Err(format!(
            "heading '{}' has an empty title or author",
            heading.trim()
        ));
    }

    Ok((title.to_string(), author.to_string()))
}

/// Resolves the cover image reference against the page address
fn extract_cover_url(document: &Html, page_url: &Url) -> Result<Url, String> {
    let cover_selector = selector(COVER_SELECTOR)?;
    let src = document
        .select(&cover_selector)
        .next()
        .and_then(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .ok_or_else(|| "missing cover image".to_string())?;

    page_url
        .join(src)
        .map_err(|e| format!("invalid cover image '{}': {}", src, e))
}

/// Collects the text of every element matching `css`, in document order
fn collect_text(document: &Html, css: &str) -> Result<Vec<String>, String> {
    let selector = selector(css)?;
    Ok(document.select(&selector).map(element_text).collect())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}
