//! Field extraction from parsed finding aids.
//!
//! Every direct child element of the document root (typically `eadheader`
//! and `archdesc`) becomes one candidate [`Record`]. Candidates with fewer
//! than [`MIN_POPULATED_FIELDS`] fields are dropped as container noise.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};

use crate::config::{FIELD_SEPARATOR, MIN_POPULATED_FIELDS};
use crate::dialect::{LanguageScope, NoteScope, SchemaDialect};
use crate::error::DocumentError;
use crate::reader::SourceDocument;
use crate::types::{Field, Record};
use crate::xml::{direct_text, element_children, flatten_text};

/// Captures everything between the first `::` and the last `.xml`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PUBLIC_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::(.*)\.xml").expect("valid regex"));

/// Narrative notes and the record field each one fills.
const NOTES: [(&str, Field); 3] = [
    ("scopecontent", Field::Scopecontent),
    ("bioghist", Field::Bioghist),
    ("custodhist", Field::Custodhist),
];

/// Controlled-access heading elements and the record field each one fills.
const CONTROLLED_ACCESS: [(&str, Field); 6] = [
    ("subject", Field::Subjects),
    ("genreform", Field::Genreforms),
    ("geogname", Field::Geognames),
    ("persname", Field::Persnames),
    ("corpname", Field::Corpnames),
    ("famname", Field::Famnames),
];

/// Derive the public identifier from an `eadid/@publicid` value.
///
/// # Examples
/// ```
/// use findingaid_scanner::extract::parse_public_id;
///
/// let publicid = "-//University of Michigan//TEXT (US::MiU-H::umich-bhl-0052.xml)//EN";
/// assert_eq!(parse_public_id(publicid), Some("umich-bhl-0052".to_string()));
/// assert_eq!(parse_public_id("no separators"), None);
/// ```
#[must_use]
pub fn parse_public_id(publicid: &str) -> Option<String> {
    let captured = PUBLIC_ID_PATTERN.captures(publicid)?.get(1)?.as_str();
    captured.rsplit("::").next().map(ToString::to_string)
}

/// Extract records from a parsed finding aid.
///
/// Returns the records that survived the populated-field threshold, in
/// document order.
pub fn extract_records(doc: &Document<'_>, dialect: &SchemaDialect) -> Vec<Record> {
    let root = doc.root_element();
    let identity = extract_identity(root, dialect);
    let document_language = match dialect.language_scope() {
        LanguageScope::LastInDocument => dialect
            .descendants(root, "langmaterial")
            .last()
            .map(flatten_text),
        LanguageScope::FirstInUnit => None,
    };

    let mut records = Vec::new();
    for unit in element_children(root) {
        let mut record = identity.clone();

        if let Some(abstract_node) = dialect.descendant(unit, "abstract") {
            record.set(Field::Abstract, text_or_empty(abstract_node));
        }

        let language = match dialect.language_scope() {
            LanguageScope::FirstInUnit => {
                dialect.descendant(unit, "langmaterial").map(flatten_text)
            }
            LanguageScope::LastInDocument => document_language.clone(),
        };
        if let Some(language) = language {
            record.set(Field::Language, language);
        }

        for (tag, field) in NOTES {
            if let Some(text) = extract_note(unit, tag, dialect) {
                record.set(field, text);
            }
        }

        extract_controlled_access(unit, dialect, &mut record);

        if record.populated_count() >= MIN_POPULATED_FIELDS {
            records.push(record);
        } else {
            tracing::debug!(
                element = unit.tag_name().name(),
                fields = record.populated_count(),
                "Dropping sparse record"
            );
        }
    }

    records
}

/// Read, parse and extract one finding aid.
pub fn extract_document(
    source: &SourceDocument,
    dialect: &SchemaDialect,
) -> Result<Vec<Record>, DocumentError> {
    let doc = source.parse()?;
    Ok(extract_records(&doc, dialect))
}

/// Build the identifier fields shared by every record of a document.
fn extract_identity(root: Node<'_, '_>, dialect: &SchemaDialect) -> Record {
    let mut identity = Record::new();

    let Some(eadid) = dialect.descendant(root, "eadid") else {
        return identity;
    };

    identity.set(Field::EadId, text_or_empty(eadid));

    if let Some(public_id) = eadid.attribute("publicid").and_then(parse_public_id) {
        identity.set(Field::PublicId, public_id);
    }

    identity
}

/// Join the flattened paragraphs of a narrative note.
///
/// Returns `None` when the unit has no note of that name. A note without
/// paragraphs yields an empty string.
fn extract_note(unit: Node<'_, '_>, tag: &str, dialect: &SchemaDialect) -> Option<String> {
    let paragraphs: Vec<String> = match dialect.note_scope() {
        NoteScope::DirectChildren => {
            let mut notes = dialect.children(unit, tag).peekable();
            notes.peek()?;
            notes
                .flat_map(|note| dialect.children(note, "p"))
                .map(flatten_text)
                .collect()
        }
        NoteScope::FirstDescendant => {
            let note = dialect.descendant(unit, tag)?;
            dialect.descendants(note, "p").map(flatten_text).collect()
        }
    };

    Some(paragraphs.join(FIELD_SEPARATOR))
}

/// Fill the controlled-access heading fields from the unit's first
/// `controlaccess` block.
fn extract_controlled_access(unit: Node<'_, '_>, dialect: &SchemaDialect, record: &mut Record) {
    let Some(controlaccess) = dialect.descendant(unit, "controlaccess") else {
        return;
    };

    for (tag, field) in CONTROLLED_ACCESS {
        let headings: Vec<&str> = dialect
            .descendants(controlaccess, tag)
            .map(text_or_empty)
            .collect();
        if !headings.is_empty() {
            record.set(field, headings.join(FIELD_SEPARATOR));
        }
    }
}

fn text_or_empty<'a>(node: Node<'a, '_>) -> &'a str {
    direct_text(node).unwrap_or_default()
}
