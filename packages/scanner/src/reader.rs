//! Reading finding aids from disk.
//!
//! A [`SourceDocument`] owns the decoded text of one file; the parsed tree
//! borrows from it, so a document is read once and parsed as often as needed.
//!
//! Files are decoded to UTF-8 before parsing. The encoding comes from a
//! byte-order mark, then from the XML declaration, then defaults to UTF-8.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use roxmltree::{Document, ParsingOptions};

use crate::error::DocumentError;

/// UTF-8 byte-order mark.
const BOM: char = '\u{feff}';

/// Bytes searched for the end of the XML declaration.
const DECLARATION_LIMIT: usize = 1024;

/// `encoding` pseudo-attribute of an XML declaration.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENCODING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<\?xml\s[^>]*?encoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .expect("valid regex")
});

/// Text of one finding aid together with the path it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
}

impl SourceDocument {
    /// Read and decode a finding aid from disk.
    ///
    /// Fails with [`DocumentError::Io`] when the file cannot be read,
    /// [`DocumentError::UnknownEncoding`] when the declared encoding is not
    /// supported and [`DocumentError::Encoding`] when the bytes are invalid
    /// in their encoding.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode(path, &bytes)?;
        Ok(Self::from_text(path, text))
    }

    /// Wrap already loaded text.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the document into a navigable tree.
    ///
    /// DOCTYPE declarations are accepted (EAD 2002 files routinely carry
    /// one); external entities are never fetched.
    pub fn parse(&self) -> Result<Document<'_>, DocumentError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let text = self.text.strip_prefix(BOM).unwrap_or(&self.text);
        Document::parse_with_options(text, options).map_err(|source| DocumentError::Xml {
            path: self.path.clone(),
            source,
        })
    }
}

/// Decode raw file bytes to text.
fn decode(path: &Path, bytes: &[u8]) -> Result<String, DocumentError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
        None => (declared_encoding(path, bytes)?, bytes),
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| DocumentError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    if encoding != UTF_8 {
        tracing::debug!(path = %path.display(), encoding = encoding.name(), "Decoded document");
    }

    Ok(match text {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => text,
    })
}

/// Encoding named in the XML declaration, UTF-8 when there is none.
///
/// A declared UTF-16 without a byte-order mark cannot be true for a
/// declaration that was just read as ASCII, so it falls back to UTF-8.
fn declared_encoding(path: &Path, bytes: &[u8]) -> Result<&'static Encoding, DocumentError> {
    let head = &bytes[..bytes.len().min(DECLARATION_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let Some(label) = ENCODING_PATTERN.captures(&head).and_then(|c| c.get(1)) else {
        return Ok(UTF_8);
    };

    Encoding::for_label(label.as_str().as_bytes())
        .map(Encoding::output_encoding)
        .ok_or_else(|| DocumentError::UnknownEncoding {
            path: path.to_path_buf(),
            label: label.as_str().to_string(),
        })
}
