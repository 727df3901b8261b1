//! Static site rendering
//!
//! The dataset is split into fixed-size pages and each page is written as
//! `{static-folder}/{page-prefix}{n}.html` from the page template. A watch
//! loop re-renders the site whenever the template or the dataset changes.

use crate::config::SiteConfig;
use crate::output::html::{
    format_page, load_template, page_environment, page_file_name, PageContext,
};
use crate::output::traits::OutputResult;
use crate::storage::{BookCollection, BookRecord, JsonStorage, Storage};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::time::MissedTickBehavior;

/// Splits records into consecutive pages of at most `page_size` books
///
/// Every page but the last is full. No records means no pages.
pub fn paginate(records: &[BookRecord], page_size: usize) -> Vec<&[BookRecord]> {
    records.chunks(page_size.max(1)).collect()
}

/// Renders every page of the collection into the static folder
///
/// The template is read from `site.template_path` on every call, so edits
/// take effect on the next render.
///
/// # Arguments
///
/// * `collection` - The books to render
/// * `site` - Template, page size, output folder and file naming
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written pages, in page order
/// * `Err(OutputError)` - The template is invalid or a page could not be written
pub fn render_site(collection: &BookCollection, site: &SiteConfig) -> OutputResult<Vec<PathBuf>> {
    let source = load_template(Path::new(&site.template_path))?;
    let env = page_environment();
    let template = env.template_from_str(&source)?;

    let static_folder = Path::new(&site.static_folder);
    std::fs::create_dir_all(static_folder)?;

    let pages = paginate(collection.records(), site.page_size);
    let total = pages.len();
    let mut written = Vec::with_capacity(total);

    for (index, books) in pages.into_iter().enumerate() {
        let context = PageContext {
            current: index + 1,
            total,
            prefix: &site.page_prefix,
            static_folder,
        };
        let path = static_folder.join(page_file_name(&site.page_prefix, context.current));
        std::fs::write(&path, format_page(&template, books, &context)?)?;
        written.push(path);
    }

    tracing::info!(
        "Rendered {} books into {} pages under {}",
        collection.len(),
        total,
        static_folder.display()
    );

    Ok(written)
}

/// Loads the dataset file and renders it
pub fn render_dataset(dataset_path: &Path, site: &SiteConfig) -> OutputResult<Vec<PathBuf>> {
    let collection = JsonStorage::new(dataset_path).load()?;
    render_site(&collection, site)
}

/// Renders the site, then re-renders whenever its sources change
///
/// The modification times of the template file and the dataset file are
/// polled every `interval`. A failed render is logged and the loop keeps
/// watching. Returns once `shutdown` completes.
pub async fn watch_site<F>(
    dataset_path: &Path,
    site: &SiteConfig,
    interval: Duration,
    shutdown: F,
) -> OutputResult<()>
where
    F: Future<Output = ()>,
{
    let template_path = Path::new(&site.template_path);
    let sources = || (modified_time(template_path), modified_time(dataset_path));

    let mut last_modified = sources();
    render_dataset(dataset_path, site)?;

    tracing::info!(
        "Watching {} and {} for changes (every {:?})",
        template_path.display(),
        dataset_path.display(),
        interval
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let modified = sources();
                if modified == last_modified {
                    continue;
                }
                if modified.0 != last_modified.0 {
                    tracing::info!("{} changed, re-rendering", template_path.display());
                } else {
                    tracing::info!("{} changed, re-rendering", dataset_path.display());
                }
                last_modified = modified;

                if let Err(e) = render_dataset(dataset_path, site) {
                    tracing::error!("Render failed: {}", e);
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Stopped watching {}", dataset_path.display());
                break;
            }
        }
    }

    Ok(())
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
