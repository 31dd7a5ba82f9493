//! Report output: CSV tables and the frequency chart.

mod chart;
mod writer;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::{chart_name, extracted_csv_name, frequency_csv_name, matches_csv_name};
use crate::error::Result;
use crate::scanner::CollectionScan;

pub use chart::{tick_step, BarChart};
pub use writer::{
    record_columns, write_frequencies_csv, write_matches_csv, write_records_csv,
    FREQUENCY_COLUMNS, MATCH_COLUMNS,
};

/// Files written for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Extracted-fields table.
    pub extracted: PathBuf,

    /// Match-results table.
    pub matches: PathBuf,

    /// Per-term frequency table.
    pub frequencies: PathBuf,

    /// Bar chart image.
    pub chart: PathBuf,
}

impl ReportPaths {
    /// Paths for `collection` inside `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Path, collection: &str) -> Self {
        Self {
            extracted: output_dir.join(extracted_csv_name(collection)),
            matches: output_dir.join(matches_csv_name(collection)),
            frequencies: output_dir.join(frequency_csv_name(collection)),
            chart: output_dir.join(chart_name(collection)),
        }
    }
}

/// Chart title for a collection.
#[must_use]
pub fn chart_title(collection: &str) -> String {
    format!("Term Found in {collection}")
}

/// Write all reports of a scanned collection into `output_dir`.
///
/// The directory is created if needed. Existing files are overwritten.
pub fn save_reports(scan: &CollectionScan, color: &str, output_dir: &Path) -> Result<ReportPaths> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }
    let paths = ReportPaths::new(output_dir, &scan.collection);

    write_records_csv(BufWriter::new(File::create(&paths.extracted)?), &scan.batch.records)?;
    write_matches_csv(BufWriter::new(File::create(&paths.matches)?), &scan.matches)?;
    write_frequencies_csv(
        BufWriter::new(File::create(&paths.frequencies)?),
        &scan.frequencies,
    )?;

    let chart = BarChart::new(chart_title(&scan.collection), color, &scan.frequencies);
    fs::write(&paths.chart, chart.render())?;

    tracing::debug!(
        collection = %scan.collection,
        dir = %output_dir.display(),
        "Saved reports"
    );

    Ok(paths)
}
