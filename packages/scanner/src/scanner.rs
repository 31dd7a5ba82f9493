//! Main scanner service that ties all components together.

use std::collections::BTreeMap;
use std::path::Path;

use crate::aggregate::term_frequencies;
use crate::batch::{load_collection_with_progress, BatchReport};
use crate::config::{CollectionConfig, ScanConfig};
use crate::dialect::{Dialect, SchemaDialect};
use crate::error::Result;
use crate::matcher::{TermList, TermMatcher};
use crate::types::{FrequencyEntry, MatchRecord};

/// Everything produced for one collection.
#[derive(Debug)]
pub struct CollectionScan {
    /// Collection name.
    pub collection: String,

    /// Dialect the collection was read with.
    pub dialect: Dialect,

    /// Extracted records and failed documents.
    pub batch: BatchReport,

    /// Term matches, in record order.
    pub matches: Vec<MatchRecord>,

    /// Per-term totals, ordered by term.
    pub frequencies: Vec<FrequencyEntry>,
}

/// Runs the extract, match and aggregate steps for collections.
///
/// Holds only immutable configuration, so collections scanned with the same
/// scanner never affect each other.
#[derive(Debug, Clone)]
pub struct Scanner {
    matcher: TermMatcher,
    namespaces: BTreeMap<String, String>,
}

impl Scanner {
    /// Create a scanner from explicit parts.
    #[must_use]
    pub fn new(matcher: TermMatcher, namespaces: BTreeMap<String, String>) -> Self {
        Self {
            matcher,
            namespaces,
        }
    }

    /// Create a scanner from a scan file's terms, fields and namespaces.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let terms = TermList::new(config.terms.clone())?;
        let matcher = TermMatcher::new(terms, config.scan_fields());
        Ok(Self::new(matcher, config.namespaces.clone()))
    }

    /// The term matcher in use.
    #[must_use]
    pub fn matcher(&self) -> &TermMatcher {
        &self.matcher
    }

    /// Scan one collection.
    pub fn scan(&self, collection: &CollectionConfig) -> Result<CollectionScan> {
        self.scan_with_progress(collection, |_| {})
    }

    /// Scan one collection, calling `on_document` after each document.
    pub fn scan_with_progress(
        &self,
        collection: &CollectionConfig,
        on_document: impl FnMut(&Path),
    ) -> Result<CollectionScan> {
        let dialect = SchemaDialect::from_config(collection.dialect, &self.namespaces)?;
        let batch = load_collection_with_progress(&collection.path, &dialect, on_document)?;

        let matches = self.matcher.match_records(&batch.records);
        let frequencies = term_frequencies(&matches);

        tracing::info!(
            collection = %collection.name,
            documents = batch.documents,
            failed = batch.failures.len(),
            records = batch.records.len(),
            matches = matches.len(),
            terms = frequencies.len(),
            "Scanned collection"
        );

        Ok(CollectionScan {
            collection: collection.name.clone(),
            dialect: collection.dialect,
            batch,
            matches,
            frequencies,
        })
    }
}
