//! Crawler module for harvesting the catalog
//!
//! This module contains the harvesting pipeline, including:
//! - HTTP fetching with relocation detection
//! - Catalog listing walks
//! - Detail page extraction
//! - Asset downloads
//! - Overall harvest coordination
//!
//! Requests are issued one at a time: each fetch, parse and write finishes
//! before the next request starts, so identifier order is preserved end to end.

mod assets;
mod catalog;
mod coordinator;
mod detail;
mod fetcher;
mod parser;

pub use assets::{fetch_asset, AssetKind, AssetOutcome};
pub use catalog::{walk_catalog, BookId, CatalogWalk};
pub use coordinator::Harvester;
pub use detail::extract_book;
pub use fetcher::{build_http_client, fetch, fetch_html, FetchOutcome};
pub use parser::{parse_detail, parse_listing, ParsedDetail};

use crate::config::Config;
use crate::output::HarvestStats;
use crate::FolioError;

/// Runs a complete harvest and writes the dataset
///
/// This is the main entry point for a harvest. It will:
/// 1. Build the HTTP client and endpoint layout
/// 2. Walk the configured listing pages for book identifiers
/// 3. Extract every book and download its assets
/// 4. Write the collected dataset to `output.dataset-path`
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(HarvestStats)` - Harvest completed and the dataset was written
/// * `Err(FolioError)` - Harvest aborted; no dataset was written
pub async fn harvest(config: Config) -> Result<HarvestStats, FolioError> {
    let dataset_path = std::path::PathBuf::from(&config.output.dataset_path);
    let mut harvester = Harvester::new(config)?;
    let collection = harvester.run().await?;
    harvester.persist(&collection, &dataset_path)?;
    Ok(harvester.stats().clone())
}
