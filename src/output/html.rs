//! HTML page generation
//!
//! Pages are rendered from a Jinja-style template. The template file named in
//! `[site] template-path` is used when it exists; otherwise the built-in
//! layout is used. All interpolated values are HTML-escaped.
//!
//! # Template context
//!
//! | Name | Value |
//! |------|-------|
//! | `books` | Books on this page: `title`, `author`, `image_href`, `text_href`, `comments`, `genres` |
//! | `pages` | Every page as `{ number, file }` |
//! | `current_page`, `total_pages` | 1-based page number and page count |
//! | `prev_page`, `next_page` | File names of the neighbouring pages, if any |

use crate::output::traits::OutputResult;
use crate::storage::BookRecord;
use minijinja::{context, AutoEscape, Environment, Template};
use serde::Serialize;
use std::path::{Component, Path};
use url::Url;

/// Layout used when no template file is present
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Position of a page within the rendered site
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// 1-based number of this page
    pub current: usize,

    /// Total number of pages
    pub total: usize,

    /// File name prefix shared by all pages
    pub prefix: &'a str,

    /// Folder the page is written to; asset links are made relative to it
    pub static_folder: &'a Path,
}

impl PageContext<'_> {
    /// File name of page `number`
    pub fn file_name(&self, number: usize) -> String {
        page_file_name(self.prefix, number)
    }
}

/// File name of a rendered page (`index` + `3` gives `index3.html`)
pub fn page_file_name(prefix: &str, number: usize) -> String {
    format!("{}{}.html", prefix, number)
}

/// Reads the page template, falling back to the built-in layout
///
/// # Returns
///
/// * `Ok(String)` - The template file's content, or [`DEFAULT_TEMPLATE`] when
///   the file does not exist
/// * `Err(OutputError)` - The file exists but could not be read
pub fn load_template(path: &Path) -> OutputResult<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            tracing::debug!("Using page template {}", path.display());
            Ok(source)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No template at {}, using the built-in layout",
                path.display()
            );
            Ok(DEFAULT_TEMPLATE.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

/// Template environment with HTML escaping for every template
pub fn page_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
}

#[derive(Serialize)]
struct BookView<'a> {
    title: &'a str,
    author: &'a str,
    image_href: Option<String>,
    text_href: Option<String>,
    comments: &'a [String],
    genres: &'a [String],
}

#[derive(Serialize)]
struct PageLink {
    number: usize,
    file: String,
}

/// Renders one page of books with a compiled template
///
/// # Arguments
///
/// * `template` - The page template
/// * `books` - The books on this page
/// * `page` - Page number, page count and link layout
///
/// # Returns
///
/// A complete HTML document, or a template error
pub fn format_page(
    template: &Template<'_, '_>,
    books: &[BookRecord],
    page: &PageContext<'_>,
) -> OutputResult<String> {
    let books: Vec<BookView<'_>> = books
        .iter()
        .map(|book| BookView {
            title: &book.title,
            author: &book.author,
            image_href: book
                .image_path
                .as_deref()
                .map(|image| asset_href(image, page.static_folder)),
            text_href: book
                .text_path
                .as_deref()
                .map(|text| asset_href(text, page.static_folder)),
            comments: &book.comments,
            genres: &book.genres,
        })
        .collect();

    let pages: Vec<PageLink> = (1..=page.total)
        .map(|number| PageLink {
            number,
            file: page.file_name(number),
        })
        .collect();

    let prev_page = (page.current > 1).then(|| page.file_name(page.current - 1));
    let next_page = (page.current < page.total).then(|| page.file_name(page.current + 1));

    let html = template.render(context! {
        books => books,
        pages => pages,
        current_page => page.current,
        total_pages => page.total,
        prev_page => prev_page,
        next_page => next_page,
    })?;

    Ok(html)
}

/// Builds a link from a page in `static_folder` to a downloaded asset
///
/// Relative asset paths are taken relative to the working directory the
/// harvest ran in, so the link climbs out of the static folder first.
pub(crate) fn asset_href(asset: &Path, static_folder: &Path) -> String {
    let climb = static_folder
        .components()
        .try_fold(0usize, |depth, component| match component {
            Component::Normal(_) => Some(depth + 1),
            Component::CurDir => Some(depth),
            _ => None,
        });

    match climb {
        Some(depth) if asset.is_relative() => {
            let segments: Vec<String> = asset
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    Component::ParentDir => Some("..".to_string()),
                    _ => None,
                })
                .collect();
            format!("{}{}", "../".repeat(depth), encode_segments(&segments))
        }
        _ => file_url(asset),
    }
}

/// Percent-encodes path segments and joins them with `/`
fn encode_segments(segments: &[String]) -> String {
    let encoded = Url::parse("file:///").ok().and_then(|mut url| {
        url.path_segments_mut()
            .ok()?
            .clear()
            .extend(segments.iter().filter(|s| s.as_str() != ".."));
        Some(url.path().trim_start_matches('/').to_string())
    });

    let ups = segments.iter().take_while(|s| s.as_str() == "..").count();
    match encoded {
        Some(path) => format!("{}{}", "../".repeat(ups), path),
        None => segments.join("/"),
    }
}

/// Absolute `file://` link for assets outside the relative layout
fn file_url(asset: &Path) -> String {
    let absolute = if asset.is_absolute() {
        asset.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(asset),
            Err(_) => return asset.display().to_string(),
        }
    };

    Url::from_file_path(&absolute)
        .map(String::from)
        .unwrap_or_else(|_| absolute.display().to_string())
}
