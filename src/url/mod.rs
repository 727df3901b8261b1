//! URL handling module for Folio
//!
//! This module knows the catalog's address layout and turns remote
//! addresses and book titles into safe local file names.

mod endpoints;
mod filename;

pub use endpoints::Endpoints;
pub use filename::{file_name_from_url, sanitize_filename};
