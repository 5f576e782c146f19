//! Corruption case enrichment.
//!
//! Turns raw scraped case rows into structured records: corruption
//! category, year, city/province and a normalized accused name, plus
//! fuzzy duplicate detection and search-query construction.
//!
//! # Modules
//!
//! - `vocab`: province/city reference tables and boundary matching
//! - `category`: corruption categories and keyword evidence
//! - `location`, `names`, `year`: the per-field extractors
//! - `record`: the `CaseRecord` entity, duplicate detection, row output
//! - `loader`, `scanner`: CSV batch I/O and input discovery

pub mod category;
pub mod error;
pub mod loader;
pub mod location;
pub mod names;
pub mod record;
pub mod scanner;
pub mod vocab;
pub mod year;

pub use category::{Category, default_categories};
pub use error::{Error, Result};
pub use loader::{Batch, Schema, read_batch, read_batch_from_path, write_batch};
pub use record::{CaseInput, CaseRecord, VerdictExtras, find_duplicates};
pub use vocab::Vocabulary;
