//! Finding Aid Scanner - Find harmful terminology in EAD finding aids.
//!
//! This crate reads collections of archival finding aids encoded as EAD XML,
//! extracts their descriptive fields into flat records, scans those records
//! for a configurable list of terms and reports how often each term occurs.
//!
//! # Example
//!
//! ```
//! use findingaid_scanner::extract::parse_public_id;
//! use findingaid_scanner::matcher::count_occurrences;
//!
//! // Identifier embedded in an EAD publicid
//! assert_eq!(
//!     parse_public_id("-//University of Michigan//TEXT (US::MiU-H::umich-bhl-0052.xml)//EN"),
//!     Some("umich-bhl-0052".to_string())
//! );
//!
//! // Case-sensitive, non-overlapping substring counts
//! assert_eq!(count_occurrences("Native lands, native plants", "Native"), 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, default terms and the YAML scan file
//! - [`types`]: Fields, records, matches and frequencies
//! - [`error`]: Error types and Result alias
//! - [`dialect`]: Plain and namespaced EAD dialects
//! - [`reader`]: Reading and parsing single documents
//! - [`xml`]: XML utilities
//! - [`extract`]: Field extraction from parsed documents
//! - [`batch`]: Loading whole collection directories
//! - [`matcher`]: Term matching over records
//! - [`aggregate`]: Per-term frequency totals
//! - [`report`]: CSV tables and the frequency chart
//! - [`scanner`]: Main scanner service
//! - [`cli`]: Command-line interface

pub mod aggregate;
pub mod batch;
pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod types;
pub mod xml;

pub use scanner::{CollectionScan, Scanner};

// Re-export commonly used items
pub use config::{CollectionConfig, ScanConfig};
pub use dialect::{Dialect, SchemaDialect};
pub use error::{DocumentError, Result, ScannerError};
pub use matcher::{TermList, TermMatcher};
pub use types::{Field, FrequencyEntry, MatchRecord, Record};
