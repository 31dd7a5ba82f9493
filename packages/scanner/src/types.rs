//! Core data types for the scanner.
//!
//! These types represent the flat records extracted from EAD finding aids,
//! the term matches found in them and the per-term frequencies derived from
//! those matches.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ScannerError;

/// A descriptive field extracted from an archival unit.
///
/// Variants are declared in canonical column order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Finding aid identifier (`<eadid>` text).
    EadId,

    /// Last `::` segment of the `publicid` attribute, without `.xml`.
    PublicId,

    /// Collection abstract.
    Abstract,

    /// Language of the material (`<langmaterial>`).
    Language,

    /// Scope and content note.
    Scopecontent,

    /// Biographical or historical note.
    Bioghist,

    /// Custodial history note.
    Custodhist,

    /// Controlled-access subject headings.
    Subjects,

    /// Controlled-access genre/form headings.
    Genreforms,

    /// Controlled-access geographic names.
    Geognames,

    /// Controlled-access personal names.
    Persnames,

    /// Controlled-access corporate names.
    Corpnames,

    /// Controlled-access family names.
    Famnames,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 13] = [
        Field::EadId,
        Field::PublicId,
        Field::Abstract,
        Field::Language,
        Field::Scopecontent,
        Field::Bioghist,
        Field::Custodhist,
        Field::Subjects,
        Field::Genreforms,
        Field::Geognames,
        Field::Persnames,
        Field::Corpnames,
        Field::Famnames,
    ];

    /// Get the column name used in exports and match records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EadId => "ead_id",
            Self::PublicId => "public_id",
            Self::Abstract => "abstract",
            Self::Language => "language",
            Self::Scopecontent => "scopecontent",
            Self::Bioghist => "bioghist",
            Self::Custodhist => "custodhist",
            Self::Subjects => "subjects",
            Self::Genreforms => "genreforms",
            Self::Geognames => "geognames",
            Self::Persnames => "persnames",
            Self::Corpnames => "corpnames",
            Self::Famnames => "famnames",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ScannerError::UnknownField(s.to_string()))
    }
}

/// One archival unit extracted from a finding aid.
///
/// A field is present when its source element was found, even if that
/// element carried no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<Field, String>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Set a field and return the record.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Finding aid identifier, if the record has one.
    #[must_use]
    pub fn ead_id(&self) -> Option<&str> {
        self.get(Field::EadId)
    }

    /// Number of populated fields.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        self.values.len()
    }

    /// Iterate populated fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// One occurrence group of a term within one paragraph of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Identifier of the record the paragraph came from.
    pub ead_id: Option<String>,

    /// The matched term.
    pub term: String,

    /// Non-overlapping occurrences of `term` in `matched_paragraph`.
    pub matched_times: usize,

    /// Field the paragraph came from.
    pub matched_from: Field,

    /// Full paragraph text.
    pub matched_paragraph: String,
}

/// Total occurrences of one term across a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    /// The term.
    pub term: String,

    /// Sum of `matched_times` over all matches of the term.
    pub total_frequency: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_as_str() {
        assert_eq!(Field::EadId.as_str(), "ead_id");
        assert_eq!(Field::Scopecontent.as_str(), "scopecontent");
        assert_eq!(Field::Famnames.to_string(), "famnames");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("bioghist".parse::<Field>().unwrap(), Field::Bioghist);
        assert_eq!("public_id".parse::<Field>().unwrap(), Field::PublicId);
        assert!(matches!(
            "scope".parse::<Field>(),
            Err(ScannerError::UnknownField(name)) if name == "scope"
        ));
    }

    #[test]
    fn test_field_order_is_canonical() {
        let mut shuffled = vec![Field::Famnames, Field::Abstract, Field::EadId, Field::Custodhist];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Field::EadId, Field::Abstract, Field::Custodhist, Field::Famnames]
        );
    }

    #[test]
    fn test_field_deserialize() {
        let fields: Vec<Field> =
            serde_yaml_ng::from_str("[ead_id, scopecontent, geognames]").unwrap();
        assert_eq!(fields, vec![Field::EadId, Field::Scopecontent, Field::Geognames]);
    }

    #[test]
    fn test_record_counts_empty_values() {
        let record = Record::new()
            .with(Field::EadId, "umich-bhl-0052")
            .with(Field::Scopecontent, "");
        assert_eq!(record.populated_count(), 2);
        assert_eq!(record.get(Field::Scopecontent), Some(""));
        assert_eq!(record.get(Field::Abstract), None);
    }

    #[test]
    fn test_record_iter_in_canonical_order() {
        let record = Record::new()
            .with(Field::Subjects, "Mining")
            .with(Field::EadId, "id")
            .with(Field::Abstract, "Text");
        let fields: Vec<Field> = record.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::EadId, Field::Abstract, Field::Subjects]);
        assert_eq!(record.ead_id(), Some("id"));
    }
}
