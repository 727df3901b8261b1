//! Harvest statistics
//!
//! Counters collected while a harvest runs, and their console rendering.

use crate::storage::BookRecord;

/// Counters for one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Listing pages fetched successfully
    pub pages_visited: u32,

    /// Listing page that ended the walk by being relocated
    pub stopped_at: Option<u32>,

    /// Identifiers found on listing pages, repeats included
    pub ids_discovered: usize,

    /// Repeated identifiers that were not processed again
    pub duplicates_dropped: usize,

    /// Books written to the dataset
    pub records: usize,

    /// Books the catalog no longer serves
    pub unavailable: usize,

    /// Recorded books without a downloaded text
    pub missing_texts: usize,

    /// Recorded books without a downloaded cover
    pub missing_images: usize,
}

impl HarvestStats {
    /// Counts a successfully extracted book
    pub fn record(&mut self, record: &BookRecord) {
        self.records += 1;
        if record.text_path.is_none() {
            self.missing_texts += 1;
        }
        if record.image_path.is_none() {
            self.missing_images += 1;
        }
    }

    /// Share of processed identifiers that produced a record, in percent
    pub fn success_rate(&self) -> f64 {
        let processed = self.records + self.unavailable;
        if processed > 0 {
            (self.records as f64 / processed as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Catalog:");
    println!("  Listing pages visited: {}", stats.pages_visited);
    if let Some(page) = stats.stopped_at {
        println!("  Walk ended at missing page: {}", page);
    }
    println!("  Identifiers found: {}", stats.ids_discovered);
    if stats.duplicates_dropped > 0 {
        println!("  Repeated identifiers dropped: {}", stats.duplicates_dropped);
    }
    println!();

    println!("Books:");
    println!("  Recorded: {}", stats.records);
    println!("  Unavailable: {}", stats.unavailable);
    println!("  Without text: {}", stats.missing_texts);
    println!("  Without cover: {}", stats.missing_images);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} books recorded)",
        stats.success_rate(),
        stats.records,
        stats.records + stats.unavailable
    );
}
