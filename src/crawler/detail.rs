//! Book detail extraction

use crate::crawler::assets::{fetch_asset, AssetKind};
use crate::crawler::catalog::BookId;
use crate::crawler::fetcher::fetch_html;
use crate::crawler::parser::parse_detail;
use crate::storage::BookRecord;
use crate::url::{file_name_from_url, Endpoints};
use crate::FolioError;
use reqwest::Client;
use std::path::Path;

/// Extension given to downloaded book texts
const TEXT_EXTENSION: &str = "txt";

/// Fetches one book's detail page and downloads its assets
///
/// # Steps
///
/// 1. Fetch `{base}/b{id}/`; a relocated page means the book was removed
/// 2. Parse title, author, cover reference, comments and genres
/// 3. Download `{base}/txt.php?id={id}` as `{title}.txt` into `text_folder`
/// 4. Download the cover into `image_folder`, named after its last path segment
///
/// An unavailable asset leaves the matching path empty in the record.
///
/// # Returns
///
/// * `Ok(Some(BookRecord))` - The book was extracted
/// * `Ok(None)` - The book is no longer in the catalog
/// * `Err(FolioError)` - Fetch failure, malformed page, or filesystem error
pub async fn extract_book(
    client: &Client,
    endpoints: &Endpoints,
    id: &BookId,
    image_folder: &Path,
    text_folder: &Path,
) -> Result<Option<BookRecord>, FolioError> {
    let page_url = endpoints.detail_page(id)?;

    let html = match fetch_html(client, &page_url).await? {
        Some(html) => html,
        None => {
            tracing::warn!("Book {} is unavailable, skipping", id);
            return Ok(None);
        }
    };

    let detail = parse_detail(&html, &page_url)
        .map_err(|message| FolioError::malformed(page_url.as_str(), message))?;

    let text_url = endpoints.text_download(id)?;
    let text_name = format!("{}.{}", detail.title, TEXT_EXTENSION);
    let text_path = fetch_asset(client, &text_url, &text_name, text_folder, AssetKind::Text)
        .await?
        .into_path();
    if text_path.is_none() {
        tracing::warn!("Book {} ({}) has no downloadable text", id, detail.title);
    }

    let image_name = file_name_from_url(&detail.cover_url).ok_or_else(|| {
        FolioError::malformed(
            page_url.as_str(),
            format!("cover image '{}' has no file name", detail.cover_url),
        )
    })?;
    let image_path = fetch_asset(
        client,
        &detail.cover_url,
        &image_name,
        image_folder,
        AssetKind::Binary,
    )
    .await?
    .into_path();
    if image_path.is_none() {
        tracing::warn!("Book {} ({}) has no downloadable cover", id, detail.title);
    }

    tracing::debug!("Extracted book {}: {} by {}", id, detail.title, detail.author);

    Ok(Some(BookRecord {
        title: detail.title,
        author: detail.author,
        image_path,
        text_path,
        comments: detail.comments,
        genres: detail.genres,
    }))
}
