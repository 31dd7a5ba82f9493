//! Per-term frequency aggregation.

use std::collections::BTreeMap;

use crate::types::{FrequencyEntry, MatchRecord};

/// Sum `matched_times` per term.
///
/// Only terms that matched appear; entries are ordered by term.
///
/// # Examples
/// ```
/// use findingaid_scanner::aggregate::term_frequencies;
/// use findingaid_scanner::types::{Field, MatchRecord};
///
/// let matches = vec![MatchRecord {
///     ead_id: None,
///     term: "Tribe".to_string(),
///     matched_times: 3,
///     matched_from: Field::Abstract,
///     matched_paragraph: "Tribe Tribe Tribe".to_string(),
/// }];
/// let frequencies = term_frequencies(&matches);
/// assert_eq!(frequencies[0].total_frequency, 3);
/// ```
#[must_use]
pub fn term_frequencies(matches: &[MatchRecord]) -> Vec<FrequencyEntry> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for m in matches {
        *totals.entry(m.term.as_str()).or_default() += m.matched_times;
    }

    totals
        .into_iter()
        .map(|(term, total_frequency)| FrequencyEntry {
            term: term.to_string(),
            total_frequency,
        })
        .collect()
}
