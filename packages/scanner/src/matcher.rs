//! Literal term matching over extracted records.
//!
//! Matching is case-sensitive substring search. Field values are split into
//! paragraphs on newlines only; the `", "` joins made during extraction are
//! not undone, so one paragraph here can span several source paragraphs.

use crate::config::validate_terms;
use crate::error::Result;
use crate::types::{Field, MatchRecord, Record};

/// Validated, ordered list of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    /// Create a term list, rejecting an empty list or blank terms.
    pub fn new(terms: Vec<String>) -> Result<Self> {
        validate_terms(&terms)?;
        Ok(Self { terms })
    }

    /// Iterate the terms in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always `false`; construction rejects empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Scans record fields for terms.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms: TermList,
    fields: Vec<Field>,
}

impl TermMatcher {
    /// Create a matcher over `fields`, scanned in the given order.
    #[must_use]
    pub fn new(terms: TermList, fields: Vec<Field>) -> Self {
        Self { terms, fields }
    }

    /// Create a matcher over every field in canonical order.
    #[must_use]
    pub fn all_fields(terms: TermList) -> Self {
        Self::new(terms, Field::ALL.to_vec())
    }

    /// The configured terms.
    #[must_use]
    pub fn terms(&self) -> &TermList {
        &self.terms
    }

    /// Match one record.
    ///
    /// Matches come out ordered by term, then field, then paragraph.
    pub fn match_record(&self, record: &Record) -> Vec<MatchRecord> {
        let mut matches = Vec::new();

        for term in self.terms.iter() {
            for &field in &self.fields {
                let Some(value) = record.get(field) else {
                    continue;
                };
                if !value.contains(term) {
                    continue;
                }
                for paragraph in value.split('\n') {
                    let matched_times = count_occurrences(paragraph, term);
                    if matched_times > 0 {
                        matches.push(MatchRecord {
                            ead_id: record.ead_id().map(ToString::to_string),
                            term: term.to_string(),
                            matched_times,
                            matched_from: field,
                            matched_paragraph: paragraph.to_string(),
                        });
                    }
                }
            }
        }

        matches
    }

    /// Match every record, preserving record order.
    pub fn match_records(&self, records: &[Record]) -> Vec<MatchRecord> {
        records
            .iter()
            .flat_map(|record| self.match_record(record))
            .collect()
    }
}

/// Count non-overlapping occurrences of `term` in `text`.
///
/// # Examples
/// ```
/// use findingaid_scanner::matcher::count_occurrences;
///
/// assert_eq!(count_occurrences("Settlers and Settler", "Settler"), 2);
/// assert_eq!(count_occurrences("aaaa", "aa"), 2);
/// ```
#[must_use]
pub fn count_occurrences(text: &str, term: &str) -> usize {
    text.matches(term).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScannerError;
    use pretty_assertions::assert_eq;

    fn terms(list: &[&str]) -> TermList {
        TermList::new(list.iter().map(ToString::to_string).collect()).unwrap()
    }

    #[test]
    fn test_term_list_validation() {
        assert!(matches!(TermList::new(vec![]), Err(ScannerError::EmptyTermList)));
        assert!(matches!(
            TermList::new(vec!["Native".to_string(), String::new()]),
            Err(ScannerError::BlankTerm { index: 1 })
        ));
        let list = terms(&["Tribe", "Tribes"]);
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Tribe", "Tribes"]);
    }

    #[test]
    fn test_overlapping_terms_match_independently() {
        let record = Record::new()
            .with(Field::EadId, "umich-bhl-0052")
            .with(Field::Abstract, "Test.")
            .with(Field::Scopecontent, "Settlers arrived.");
        let matcher = TermMatcher::all_fields(terms(&["Settler", "Settlers"]));

        let matches = matcher.match_record(&record);
        assert_eq!(
            matches,
            vec![
                MatchRecord {
                    ead_id: Some("umich-bhl-0052".to_string()),
                    term: "Settler".to_string(),
                    matched_times: 1,
                    matched_from: Field::Scopecontent,
                    matched_paragraph: "Settlers arrived.".to_string(),
                },
                MatchRecord {
                    ead_id: Some("umich-bhl-0052".to_string()),
                    term: "Settlers".to_string(),
                    matched_times: 1,
                    matched_from: Field::Scopecontent,
                    matched_paragraph: "Settlers arrived.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_matched_times_counts_substrings() {
        let record = Record::new().with(Field::Bioghist, "Settlers and Settler");
        let matcher = TermMatcher::all_fields(terms(&["Settler"]));

        let matches = matcher.match_record(&record);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_times, 2);
        assert_eq!(matches[0].ead_id, None);
    }

    #[test]
    fn test_case_sensitive() {
        let record = Record::new().with(Field::Abstract, "native plants, NATIVE");
        let matcher = TermMatcher::all_fields(terms(&["Native"]));
        assert!(matcher.match_record(&record).is_empty());
    }

    #[test]
    fn test_paragraphs_split_on_newlines_only() {
        let record = Record::new().with(
            Field::Scopecontent,
            "A Tribe, another Tribe\nno match here\nTribe again",
        );
        let matcher = TermMatcher::all_fields(terms(&["Tribe"]));

        let matches = matcher.match_record(&record);
        let found: Vec<_> = matches
            .iter()
            .map(|m| (m.matched_paragraph.as_str(), m.matched_times))
            .collect();
        assert_eq!(
            found,
            vec![("A Tribe, another Tribe", 2), ("Tribe again", 1)]
        );
    }

    #[test]
    fn test_scans_only_configured_fields() {
        let record = Record::new()
            .with(Field::EadId, "Moro-collection")
            .with(Field::Abstract, "Moro")
            .with(Field::Subjects, "Moros");
        let matcher = TermMatcher::new(terms(&["Moro"]), vec![Field::Subjects, Field::Abstract]);

        let sources: Vec<_> = matcher
            .match_record(&record)
            .into_iter()
            .map(|m| m.matched_from)
            .collect();
        assert_eq!(sources, vec![Field::Subjects, Field::Abstract]);
    }

    #[test]
    fn test_all_fields_include_identifier() {
        let record = Record::new().with(Field::EadId, "Moro-collection");
        let matcher = TermMatcher::all_fields(terms(&["Moro"]));
        let matches = matcher.match_record(&record);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_from, Field::EadId);
    }

    #[test]
    fn test_match_count_equals_matching_paragraphs() {
        let records = vec![
            Record::new().with(Field::Bioghist, "Colony\nColony and Colony\nnothing"),
            Record::new().with(Field::Bioghist, "Colonial Colony"),
            Record::new().with(Field::Abstract, "Colony"),
        ];
        let matcher = TermMatcher::all_fields(terms(&["Colony"]));

        let matches = matcher.match_records(&records);
        let from_bioghist = matches
            .iter()
            .filter(|m| m.matched_from == Field::Bioghist)
            .count();
        assert_eq!(from_bioghist, 3);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_order_is_record_then_term() {
        let records = vec![
            Record::new().with(Field::EadId, "r1").with(Field::Abstract, "Native Tribe"),
            Record::new().with(Field::EadId, "r2").with(Field::Abstract, "Tribe"),
        ];
        let matcher = TermMatcher::new(terms(&["Tribe", "Native"]), vec![Field::Abstract]);

        let order: Vec<_> = matcher
            .match_records(&records)
            .into_iter()
            .map(|m| (m.ead_id.unwrap_or_default(), m.term))
            .collect();
        assert_eq!(
            order,
            vec![
                ("r1".to_string(), "Tribe".to_string()),
                ("r1".to_string(), "Native".to_string()),
                ("r2".to_string(), "Tribe".to_string()),
            ]
        );
    }

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("P.I. and P.I.", "P.I."), 2);
        assert_eq!(count_occurrences("nothing", "P.I."), 0);
        assert_eq!(count_occurrences("aaa", "aa"), 1);
    }
}
