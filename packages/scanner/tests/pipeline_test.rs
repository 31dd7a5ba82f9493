//! End-to-end tests for the scan pipeline.
//!
//! Runs extraction, matching, aggregation and reporting over the fixture
//! collections: a plain Bentley-style collection, a namespaced SCRC-style
//! collection and a directory holding one malformed document.

use std::fs;
use std::path::{Path, PathBuf};

use findingaid_scanner::config::{CollectionConfig, ScanConfig};
use findingaid_scanner::dialect::Dialect;
use findingaid_scanner::error::ScannerError;
use findingaid_scanner::matcher::{TermList, TermMatcher};
use findingaid_scanner::report::save_reports;
use findingaid_scanner::scanner::{CollectionScan, Scanner};
use findingaid_scanner::types::Field;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn scanner(terms: &[&str]) -> Scanner {
    let terms = TermList::new(terms.iter().map(ToString::to_string).collect())
        .expect("valid term list");
    Scanner::new(
        TermMatcher::all_fields(terms),
        findingaid_scanner::config::default_namespaces(),
    )
}

fn totals(scan: &CollectionScan) -> Vec<(&str, usize)> {
    scan.frequencies
        .iter()
        .map(|f| (f.term.as_str(), f.total_frequency))
        .collect()
}

#[test]
fn test_plain_collection_records() {
    let collection = CollectionConfig::new("Bentley", fixture_dir("plain"), Dialect::Plain);
    let scan = scanner(&["Native"]).scan(&collection).unwrap();

    // sparse.xml only yields records below the field threshold
    assert_eq!(scan.batch.documents, 2);
    assert!(scan.batch.failures.is_empty());
    assert_eq!(scan.batch.records.len(), 1);

    let record = &scan.batch.records[0];
    assert_eq!(record.ead_id(), Some("umich-bhl-0052"));
    assert_eq!(record.get(Field::PublicId), Some("umich-bhl-0052"));
    assert_eq!(
        record.get(Field::Abstract),
        Some("Papers of a zoologist and colonial administrator in the P.I.")
    );
    assert_eq!(record.get(Field::Language), Some("Materials in English"));
    assert_eq!(
        record.get(Field::Bioghist),
        Some("Worcester served on the Philippine Commission., He wrote on Native peoples and the Igorot.")
    );
    assert_eq!(
        record.get(Field::Scopecontent),
        Some("Photographs of Native dwellings., Reports on the Moro Rebellion.")
    );
    assert_eq!(record.get(Field::Subjects), Some("Igorot (Philippine people)"));
    assert_eq!(record.get(Field::Persnames), Some("Worcester, Dean C."));
    assert_eq!(record.get(Field::Custodhist), None);
}

#[test]
fn test_plain_collection_with_default_terms() {
    let config = ScanConfig::new(vec![CollectionConfig::new(
        "Bentley",
        fixture_dir("plain"),
        Dialect::Plain,
    )]);
    let scanner = Scanner::from_config(&config).unwrap();
    let scan = scanner.scan(&config.collections[0]).unwrap();

    assert_eq!(
        totals(&scan),
        vec![
            ("Igorot", 2),
            ("Moro", 1),
            ("Moro Rebellion", 1),
            ("Native", 2),
            ("P.I.", 1),
        ]
    );
    assert_eq!(scan.matches.len(), 7);

    // Matching is case-sensitive: "colonial" and "dwellings" do not count
    assert!(scan.matches.iter().all(|m| m.term != "Colonial"));
    assert!(scan.matches.iter().all(|m| m.term != "Dwelling"));
}

#[test]
fn test_namespaced_collection() {
    let collection = CollectionConfig::new("SCRC", fixture_dir("namespaced"), Dialect::Namespaced);
    let scan = scanner(&["Settler", "Settlers", "Colonial", "Colonist"])
        .scan(&collection)
        .unwrap();

    // Header and collection both carry the document-wide language
    assert_eq!(scan.batch.records.len(), 2);
    let header = &scan.batch.records[0];
    assert_eq!(header.ead_id(), Some("adler"));
    assert_eq!(header.get(Field::PublicId), Some("adler"));
    assert_eq!(header.get(Field::Language), Some("English"));

    let archdesc = &scan.batch.records[1];
    assert_eq!(
        archdesc.get(Field::Scopecontent),
        Some("Accounts of Colonial life., Settlers and Settler disputes.")
    );
    assert_eq!(archdesc.get(Field::Custodhist), Some("Donated by the family."));
    assert_eq!(archdesc.get(Field::Subjects), Some("Colonists"));

    assert_eq!(
        totals(&scan),
        vec![("Colonial", 1), ("Colonist", 1), ("Settler", 3), ("Settlers", 1)]
    );
}

#[test]
fn test_mixed_collection_skips_broken_document() {
    let collection = CollectionConfig::new("Mixed", fixture_dir("mixed"), Dialect::Plain);
    let scan = scanner(&["Settler", "Tribal"]).scan(&collection).unwrap();

    assert_eq!(scan.batch.documents, 3);
    assert_eq!(scan.batch.failures.len(), 1);
    assert!(scan.batch.failures[0].path().ends_with("broken.xml"));
    assert_eq!(scan.batch.records.len(), 2);
    assert_eq!(totals(&scan), vec![("Settler", 1), ("Tribal", 2)]);
}

#[test]
fn test_latin1_document_is_decoded() {
    let collection = CollectionConfig::new("Mixed", fixture_dir("mixed"), Dialect::Plain);
    let scan = scanner(&["Tribal"]).scan(&collection).unwrap();

    let record = scan
        .batch
        .records
        .iter()
        .find(|r| r.ead_id() == Some("latin1"))
        .expect("latin1.xml yields a record");
    assert_eq!(record.get(Field::Abstract), Some("Fotograf\u{ed}as de la regi\u{f3}n."));
    assert_eq!(
        record.get(Field::Scopecontent),
        Some("Escenas de un pueblo Tribal en Mindanao.")
    );
}

#[test]
fn test_empty_collection_fails() {
    let dir = tempdir().unwrap();
    let collection = CollectionConfig::new("Empty", dir.path(), Dialect::Plain);
    let result = scanner(&["Native"]).scan(&collection);
    assert!(matches!(result, Err(ScannerError::NoDocuments(_))));
}

#[test]
fn test_save_reports_writes_all_files() {
    let collection = CollectionConfig::new("Bentley", fixture_dir("plain"), Dialect::Plain);
    let scan = scanner(&["Native", "Igorot"]).scan(&collection).unwrap();

    let out = tempdir().unwrap();
    let reports = out.path().join("reports");
    let paths = save_reports(&scan, "orange", &reports).unwrap();

    let extracted = fs::read_to_string(&paths.extracted).unwrap();
    let header = extracted.lines().next().unwrap();
    assert!(header.starts_with(",ead_id,public_id,abstract,language"));
    assert_eq!(extracted.lines().count(), 2);

    let matches = fs::read_to_string(&paths.matches).unwrap();
    let mut lines = matches.lines();
    assert_eq!(
        lines.next(),
        Some(",ead_id,Term,Matched_Times,Matched_From,Matched_Paragraph")
    );
    assert_eq!(
        lines.next(),
        Some("0,umich-bhl-0052,Native,1,scopecontent,\"Photographs of Native dwellings., Reports on the Moro Rebellion.\"")
    );

    let frequencies = fs::read_to_string(&paths.frequencies).unwrap();
    assert_eq!(frequencies, ",Term,Total_Frequency\n0,Igorot,2\n1,Native,2\n");

    let chart = fs::read_to_string(&paths.chart).unwrap();
    assert!(chart.contains("Term Found in Bentley"));
    assert_eq!(chart.matches("fill=\"orange\"").count(), 2);
}
