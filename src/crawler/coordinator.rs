//! Harvest coordinator - main harvest orchestration logic
//!
//! This module ties the pipeline together:
//! - Walking the catalog for identifiers
//! - Extracting each book in discovery order
//! - Collecting the records and run statistics
//! - Writing the finished dataset

use crate::config::Config;
use crate::crawler::catalog::{walk_catalog, BookId};
use crate::crawler::detail::extract_book;
use crate::crawler::fetcher::build_http_client;
use crate::output::HarvestStats;
use crate::storage::{BookCollection, JsonStorage, Storage};
use crate::url::Endpoints;
use crate::FolioError;
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main harvest coordinator structure
pub struct Harvester {
    config: Config,
    client: Client,
    endpoints: Endpoints,
    stats: HarvestStats,
}

impl Harvester {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(FolioError)` - Invalid base URL or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self, FolioError> {
        let endpoints = Endpoints::new(&config.catalog.base_url, config.catalog.category)?;
        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            config,
            client,
            endpoints,
            stats: HarvestStats::default(),
        })
    }

    /// Runs the harvest and returns the collected books
    ///
    /// This is the core harvesting logic that:
    /// 1. Walks the configured listing pages
    /// 2. Drops repeated identifiers, keeping the first occurrence
    /// 3. Extracts each book in discovery order
    /// 4. Skips books the catalog no longer serves
    ///
    /// Any fetch, parse or filesystem error aborts the run. Assets already
    /// written stay on disk.
    pub async fn run(&mut self) -> Result<BookCollection, FolioError> {
        let start_time = std::time::Instant::now();
        let catalog = &self.config.catalog;

        tracing::info!(
            "Walking catalog {} category {} from page {} to {}",
            self.endpoints.base(),
            self.endpoints.category(),
            catalog.start_page,
            catalog
                .end_page
                .map_or_else(|| "the end".to_string(), |end| end.to_string())
        );

        let walk = walk_catalog(
            &self.client,
            &self.endpoints,
            catalog.start_page,
            catalog.end_page,
        )
        .await?;

        self.stats.pages_visited = walk.pages_visited;
        self.stats.stopped_at = walk.stopped_at;
        self.stats.ids_discovered = walk.ids.len();

        let ids = dedup_ids(walk.ids);
        self.stats.duplicates_dropped = self.stats.ids_discovered - ids.len();
        if self.stats.duplicates_dropped > 0 {
            tracing::info!(
                "Dropped {} repeated identifiers",
                self.stats.duplicates_dropped
            );
        }

        let image_folder = PathBuf::from(&self.config.output.image_folder);
        let text_folder = PathBuf::from(&self.config.output.text_folder);
        let mut collection = BookCollection::new();

        for (index, id) in ids.iter().enumerate() {
            match extract_book(&self.client, &self.endpoints, id, &image_folder, &text_folder)
                .await?
            {
                Some(record) => {
                    self.stats.record(&record);
                    collection.push(record);
                }
                None => self.stats.unavailable += 1,
            }

            // Progress reporting every 10 books
            if (index + 1) % 10 == 0 {
                tracing::info!(
                    "Progress: {}/{} books processed, {} recorded",
                    index + 1,
                    ids.len(),
                    collection.len()
                );
            }
        }

        tracing::info!(
            "Harvest completed: {} books recorded in {:?}",
            collection.len(),
            start_time.elapsed()
        );

        Ok(collection)
    }

    /// Writes the collection to `output_path`, replacing any previous dataset
    pub fn persist(
        &self,
        collection: &BookCollection,
        output_path: &Path,
    ) -> Result<(), FolioError> {
        let storage = JsonStorage::new(output_path);
        storage.save(collection)?;
        tracing::info!(
            "Wrote {} books to {}",
            collection.len(),
            output_path.display()
        );
        Ok(())
    }

    /// Statistics of the last run
    pub fn stats(&self) -> &HarvestStats {
        &self.stats
    }

    /// The endpoint layout in use
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Removes repeated identifiers, keeping first occurrences in order
fn dedup_ids(ids: Vec<BookId>) -> Vec<BookId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
