//! Configuration constants, validation functions and the scan file format.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::{Result, ScannerError};
use crate::types::Field;

/// EAD 2002 namespace URI.
pub const EAD_NAMESPACE: &str = "urn:isbn:1-931666-22-9";

/// XLink namespace URI.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XML Schema instance namespace URI.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix under which the EAD namespace is configured.
pub const EAD_PREFIX: &str = "ead";

/// File extension of finding aids picked up by the batch loader.
pub const XML_EXTENSION: &str = "xml";

/// Records with fewer populated fields are container noise and get dropped.
pub const MIN_POPULATED_FIELDS: usize = 3;

/// Separator between joined paragraphs and headings.
pub const FIELD_SEPARATOR: &str = ", ";

/// Bar colour used when a collection does not configure one.
pub const DEFAULT_CHART_COLOR: &str = "#636efa";

/// Curated harmful term list (v2.24).
pub const DEFAULT_TERMS: &[&str] = &[
    "Civilization",
    "Civilized",
    "Cleanliness",
    "Dwelling",
    "Enemy",
    "Head hunter",
    "Head hunters",
    "Hygiene",
    "Igorot",
    "Indigenous",
    "Insurgency",
    "Insurgent",
    "Insurgents",
    "Insurrection",
    "Insurrecto",
    "Insurrectos",
    "Leper",
    "Lepers",
    "Mestiza",
    "Mestizas",
    "Mestizo",
    "Mestizos",
    "Moro",
    "Moro Rebellion",
    "Moros",
    "Native",
    "Natives",
    "Negrito",
    "Negritos",
    "Non-Christian",
    "Non-Christians",
    "P.I.",
    "Primitive",
    "Primitives",
    "Tribal",
    "Tribe",
    "Tribes",
    "Trophies",
    "Trophy",
    "Uncivilized",
    "Ilustrado",
    "slave",
    "slavery",
    "enslaved",
    "Balangiga Massacre",
    "Benevolent Assimilation",
    "Colonial",
    "Colonist",
    "Colonists",
    "Colonization",
    "Colony",
    "Settler",
    "Settlers",
];

/// Collection name pattern: used verbatim in output file names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COLLECTION_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Chart colour pattern: hex colour or SVG colour keyword.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9A-Fa-f]{3}|#[0-9A-Fa-f]{6}|[a-z]+)$").expect("valid regex")
});

/// Default namespace mapping (prefix to URI).
#[must_use]
pub fn default_namespaces() -> BTreeMap<String, String> {
    BTreeMap::from([
        (EAD_PREFIX.to_string(), EAD_NAMESPACE.to_string()),
        ("xlink".to_string(), XLINK_NAMESPACE.to_string()),
        ("xsi".to_string(), XSI_NAMESPACE.to_string()),
    ])
}

/// Default term list as owned strings.
#[must_use]
pub fn default_terms() -> Vec<String> {
    DEFAULT_TERMS.iter().map(ToString::to_string).collect()
}

/// Validate a collection name.
///
/// # Examples
/// ```
/// use findingaid_scanner::config::validate_collection_name;
///
/// assert!(validate_collection_name("Bentley").is_ok());
/// assert!(validate_collection_name("SCRC_2023").is_ok());
/// assert!(validate_collection_name("../etc").is_err());
/// ```
pub fn validate_collection_name(name: &str) -> Result<()> {
    if COLLECTION_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ScannerError::InvalidCollectionName(name.to_string()))
    }
}

/// Validate a term list: non-empty, no blank terms.
///
/// # Examples
/// ```
/// use findingaid_scanner::config::validate_terms;
///
/// assert!(validate_terms(&["Settler".to_string()]).is_ok());
/// assert!(validate_terms(&[]).is_err());
/// ```
pub fn validate_terms(terms: &[String]) -> Result<()> {
    if terms.is_empty() {
        return Err(ScannerError::EmptyTermList);
    }
    if let Some(index) = terms.iter().position(|t| t.trim().is_empty()) {
        return Err(ScannerError::BlankTerm { index });
    }
    Ok(())
}

/// Name of the extracted-fields export for a collection.
#[must_use]
pub fn extracted_csv_name(collection: &str) -> String {
    format!("extracted_{collection}.csv")
}

/// Name of the match-results export for a collection.
#[must_use]
pub fn matches_csv_name(collection: &str) -> String {
    format!("matched_results_{collection}.csv")
}

/// Name of the frequency-table export for a collection.
#[must_use]
pub fn frequency_csv_name(collection: &str) -> String {
    format!("term_frequency_{collection}.csv")
}

/// Name of the bar chart image for a collection.
#[must_use]
pub fn chart_name(collection: &str) -> String {
    format!("term_frequency_{collection}.svg")
}

/// One collection of finding aids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Name used in chart titles and output file names.
    pub name: String,

    /// Directory holding the collection's XML files.
    pub path: PathBuf,

    /// Schema dialect of the collection's documents.
    #[serde(default)]
    pub dialect: Dialect,

    /// Bar colour for the collection's chart.
    #[serde(default)]
    pub color: Option<String>,
}

impl CollectionConfig {
    /// Create a collection configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, dialect: Dialect) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            dialect,
            color: None,
        }
    }

    /// Bar colour, falling back to [`DEFAULT_CHART_COLOR`].
    #[must_use]
    pub fn chart_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_CHART_COLOR)
    }
}

/// Scan file: terms, namespaces and the collections to process.
///
/// ```yaml
/// output_dir: reports
/// terms: [Settler, Settlers]
/// collections:
///   - name: Bentley
///     path: RCRC_Finding_Aid_List_Bentley/Finding_Aids
///   - name: SCRC
///     path: SCRC_XML
///     dialect: namespaced
///     color: green
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory receiving all exports, relative to the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Ordered term list.
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,

    /// Namespace prefix to URI mapping for the namespaced dialect.
    #[serde(default = "default_namespaces")]
    pub namespaces: BTreeMap<String, String>,

    /// Fields scanned for terms (all fields when absent).
    #[serde(default)]
    pub fields: Option<Vec<Field>>,

    /// Collections to process, in order.
    pub collections: Vec<CollectionConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl ScanConfig {
    /// Create a configuration with default terms and namespaces.
    #[must_use]
    pub fn new(collections: Vec<CollectionConfig>) -> Self {
        Self {
            output_dir: default_output_dir(),
            terms: default_terms(),
            namespaces: default_namespaces(),
            fields: None,
            collections,
        }
    }

    /// Parse and validate a scan file from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ScanConfig = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scan file.
    ///
    /// Relative collection paths resolve against the scan file's directory.
    /// The output directory is left as written.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&yaml)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for collection in &mut config.collections {
            if collection.path.is_relative() {
                collection.path = base.join(&collection.path);
            }
        }

        Ok(config)
    }

    /// Check terms, collection names, colours and namespace prefixes.
    pub fn validate(&self) -> Result<()> {
        validate_terms(&self.terms)?;

        if self.collections.is_empty() {
            return Err(ScannerError::NoCollections);
        }

        let mut seen = HashSet::new();
        for collection in &self.collections {
            validate_collection_name(&collection.name)?;
            if !seen.insert(collection.name.as_str()) {
                return Err(ScannerError::DuplicateCollection(collection.name.clone()));
            }
            if let Some(color) = &collection.color {
                if !COLOR_PATTERN.is_match(color) {
                    return Err(ScannerError::InvalidColor(color.clone()));
                }
            }
            if collection.dialect == Dialect::Namespaced
                && !self.namespaces.contains_key(EAD_PREFIX)
            {
                return Err(ScannerError::MissingNamespace(EAD_PREFIX.to_string()));
            }
        }

        Ok(())
    }

    /// Fields scanned for terms.
    #[must_use]
    pub fn scan_fields(&self) -> Vec<Field> {
        self.fields.clone().unwrap_or_else(|| Field::ALL.to_vec())
    }

    /// Look up a collection by name.
    pub fn collection(&self, name: &str) -> Result<&CollectionConfig> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ScannerError::UnknownCollection(name.to_string()))
    }
}
