//! Error types for the scanner.
//!
//! Uses the dual-error pattern: `ScannerError` for library consumers
//! with collection-level context, and `DocumentError` for the failure of a
//! single finding aid, which never aborts a batch.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the scanner library.
#[derive(Debug, Error)]
pub enum ScannerError {
    /// The term list is empty.
    #[error("Term list is empty. Configure at least one term to scan for")]
    EmptyTermList,

    /// A term is empty or whitespace only.
    #[error("Invalid term at position {index}: terms must not be blank")]
    BlankTerm { index: usize },

    /// Invalid collection name.
    #[error("Invalid collection name: '{0}'. Use letters, digits, '-' or '_' (e.g., Bentley)")]
    InvalidCollectionName(String),

    /// Two collections share a name.
    #[error("Duplicate collection name: '{0}'")]
    DuplicateCollection(String),

    /// Scan configuration has no collections.
    #[error("Scan configuration defines no collections")]
    NoCollections,

    /// Requested collection is not in the configuration.
    #[error("Unknown collection: '{0}'")]
    UnknownCollection(String),

    /// A namespace prefix required by the dialect is not configured.
    #[error("Namespace prefix '{0}' is not configured")]
    MissingNamespace(String),

    /// Chart colour is neither a hex colour nor a colour keyword.
    #[error("Invalid chart colour: '{0}'. Expected #RRGGBB or a colour name (e.g., orange)")]
    InvalidColor(String),

    /// Unknown field name in the configured field list.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    /// Collection directory does not exist.
    #[error("Collection directory does not exist: {}", .0.display())]
    CollectionNotFound(PathBuf),

    /// Collection path is not a directory.
    #[error("Collection path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Collection directory holds no XML documents.
    #[error("No XML documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    /// Every document in the collection failed to load.
    #[error("All {count} documents in {} failed to load", .path.display())]
    AllDocumentsFailed { path: PathBuf, count: usize },

    /// One or more collections failed during a scan run.
    #[error("{} collection(s) failed: {}", .0.len(), .0.join(", "))]
    CollectionsFailed(Vec<String>),

    /// A single document could not be read.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// YAML configuration error.
    #[error("Invalid scan configuration: {0}")]
    Config(#[from] serde_yaml_ng::Error),
}

/// Reason a single finding aid could not be turned into records.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid in its declared or detected encoding.
    #[error("Invalid {encoding} in {}", .path.display())]
    Encoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The XML declaration names an encoding that is not supported.
    #[error("Unsupported encoding '{label}' in {}", .path.display())]
    UnknownEncoding { path: PathBuf, label: String },

    /// XML parsing failed.
    #[error("XML parsing failed for {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

impl DocumentError {
    /// Path of the document that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Encoding { path, .. }
            | Self::UnknownEncoding { path, .. }
            | Self::Xml { path, .. } => path,
        }
    }
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScannerError::InvalidCollectionName("bad name".to_string());
        assert!(err.to_string().contains("bad name"));
        assert!(err.to_string().contains("Bentley"));
    }

    #[test]
    fn test_all_documents_failed_display() {
        let err = ScannerError::AllDocumentsFailed {
            path: PathBuf::from("SCRC_XML"),
            count: 3,
        };
        assert_eq!(err.to_string(), "All 3 documents in SCRC_XML failed to load");
    }

    #[test]
    fn test_document_error_path() {
        let err = DocumentError::Io {
            path: PathBuf::from("missing.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.path(), std::path::Path::new("missing.xml"));
        assert!(err.to_string().contains("missing.xml"));
    }
}
