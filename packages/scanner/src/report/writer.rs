//! CSV table writers.
//!
//! Every table starts with an unnamed index column counting rows from 0.

use std::io;

use csv::Writer;

use crate::error::Result;
use crate::types::{Field, FrequencyEntry, MatchRecord, Record};

/// Column headers of the match-results table, after the index column.
pub const MATCH_COLUMNS: [&str; 5] = [
    "ead_id",
    "Term",
    "Matched_Times",
    "Matched_From",
    "Matched_Paragraph",
];

/// Column headers of the frequency table, after the index column.
pub const FREQUENCY_COLUMNS: [&str; 2] = ["Term", "Total_Frequency"];

/// Fields populated in at least one record, in canonical order.
#[must_use]
pub fn record_columns(records: &[Record]) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| records.iter().any(|r| r.get(*field).is_some()))
        .collect()
}

/// Write the extracted-fields table.
pub fn write_records_csv<W: io::Write>(out: W, records: &[Record]) -> Result<()> {
    let columns = record_columns(records);
    let mut writer = Writer::from_writer(out);

    writer.write_record(std::iter::once("").chain(columns.iter().map(Field::as_str)))?;
    for (index, record) in records.iter().enumerate() {
        let mut row = vec![index.to_string()];
        row.extend(
            columns
                .iter()
                .map(|field| record.get(*field).unwrap_or_default().to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the match-results table.
pub fn write_matches_csv<W: io::Write>(out: W, matches: &[MatchRecord]) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    writer.write_record(std::iter::once("").chain(MATCH_COLUMNS))?;
    for (index, m) in matches.iter().enumerate() {
        writer.write_record([
            index.to_string().as_str(),
            m.ead_id.as_deref().unwrap_or_default(),
            m.term.as_str(),
            m.matched_times.to_string().as_str(),
            m.matched_from.as_str(),
            m.matched_paragraph.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-term frequency table.
pub fn write_frequencies_csv<W: io::Write>(out: W, frequencies: &[FrequencyEntry]) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    writer.write_record(std::iter::once("").chain(FREQUENCY_COLUMNS))?;
    for (index, entry) in frequencies.iter().enumerate() {
        writer.write_record([
            index.to_string().as_str(),
            entry.term.as_str(),
            entry.total_frequency.to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
