//! Loading a whole collection directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::XML_EXTENSION;
use crate::dialect::SchemaDialect;
use crate::error::{DocumentError, Result, ScannerError};
use crate::extract::extract_document;
use crate::reader::SourceDocument;
use crate::types::Record;

/// Records of one collection plus the documents that failed to load.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records from every successfully parsed document, in file order.
    pub records: Vec<Record>,

    /// Number of XML documents found in the directory.
    pub documents: usize,

    /// Documents that could not be read or parsed.
    pub failures: Vec<DocumentError>,
}

impl BatchReport {
    /// Number of documents that loaded.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.documents - self.failures.len()
    }
}

/// List the XML documents directly inside `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ScannerError::CollectionNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScannerError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == XML_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

/// Extract every XML document in `dir`.
///
/// A document that fails is logged, recorded in the report and skipped.
/// Fails when the directory is missing, holds no XML documents, or every
/// document failed.
pub fn load_collection(dir: &Path, dialect: &SchemaDialect) -> Result<BatchReport> {
    load_collection_with_progress(dir, dialect, |_| {})
}

/// Like [`load_collection`], calling `on_document` after each document.
pub fn load_collection_with_progress(
    dir: &Path,
    dialect: &SchemaDialect,
    mut on_document: impl FnMut(&Path),
) -> Result<BatchReport> {
    let paths = list_documents(dir)?;
    if paths.is_empty() {
        return Err(ScannerError::NoDocuments(dir.to_path_buf()));
    }

    tracing::debug!(
        dir = %dir.display(),
        dialect = %dialect.dialect(),
        documents = paths.len(),
        "Loading collection"
    );

    let mut report = BatchReport {
        documents: paths.len(),
        ..BatchReport::default()
    };

    for path in &paths {
        let outcome =
            SourceDocument::open(path).and_then(|source| extract_document(&source, dialect));
        match outcome {
            Ok(records) => {
                tracing::debug!(
                    path = %path.display(),
                    records = records.len(),
                    "Extracted document"
                );
                report.records.extend(records);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping document");
                report.failures.push(e);
            }
        }
        on_document(path);
    }

    if report.loaded() == 0 {
        return Err(ScannerError::AllDocumentsFailed {
            path: dir.to_path_buf(),
            count: report.documents,
        });
    }

    Ok(report)
}
