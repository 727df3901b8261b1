//! Output module for harvest reports and the static site
//!
//! This module handles:
//! - Recording and printing harvest statistics
//! - Paginating the dataset into static HTML pages from a page template
//! - Re-rendering the pages when the dataset changes

mod html;
mod site;
pub mod stats;
mod traits;

pub use html::{
    format_page, load_template, page_environment, page_file_name, PageContext, DEFAULT_TEMPLATE,
};
pub use site::{paginate, render_dataset, render_site, watch_site};
pub use stats::{print_statistics, HarvestStats};
pub use traits::{OutputError, OutputResult};
