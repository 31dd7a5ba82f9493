//! Schema dialects of EAD finding aids.
//!
//! Both dialects share one extraction pipeline. A [`SchemaDialect`] tells the
//! extractor which namespace element names live in and where the few
//! dialect-specific lookups search.

use std::collections::BTreeMap;
use std::fmt;

use roxmltree::Node;
use serde::Deserialize;

use crate::config::EAD_PREFIX;
use crate::error::{Result, ScannerError};
use crate::xml::{find_children, find_descendant, find_descendants};

/// Schema dialect selected per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Elements carry no namespace.
    #[default]
    Plain,

    /// Elements live in the EAD namespace.
    Namespaced,
}

impl Dialect {
    /// Get the configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Namespaced => "namespaced",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the `language` field is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageScope {
    /// First `langmaterial` below the archival unit.
    FirstInUnit,

    /// Last `langmaterial` anywhere in the document, same for every unit.
    LastInDocument,
}

/// Where narrative notes (`scopecontent`, `bioghist`, `custodhist`) and
/// their paragraphs are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteScope {
    /// Every direct child note of the unit, then its direct child paragraphs.
    DirectChildren,

    /// The first note anywhere below the unit, then paragraphs at any depth.
    FirstDescendant,
}

/// Element-name resolver plus the dialect's lookup rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDialect {
    dialect: Dialect,
    namespace: Option<String>,
    language: LanguageScope,
    notes: NoteScope,
}

impl SchemaDialect {
    /// Dialect for finding aids without a namespace.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            dialect: Dialect::Plain,
            namespace: None,
            language: LanguageScope::FirstInUnit,
            notes: NoteScope::DirectChildren,
        }
    }

    /// Dialect for finding aids whose elements live in `namespace_uri`.
    #[must_use]
    pub fn namespaced(namespace_uri: impl Into<String>) -> Self {
        Self {
            dialect: Dialect::Namespaced,
            namespace: Some(namespace_uri.into()),
            language: LanguageScope::LastInDocument,
            notes: NoteScope::FirstDescendant,
        }
    }

    /// Build the descriptor for a configured dialect.
    ///
    /// The namespaced dialect resolves the `ead` prefix in `namespaces`.
    pub fn from_config(dialect: Dialect, namespaces: &BTreeMap<String, String>) -> Result<Self> {
        match dialect {
            Dialect::Plain => Ok(Self::plain()),
            Dialect::Namespaced => namespaces
                .get(EAD_PREFIX)
                .map(Self::namespaced)
                .ok_or_else(|| ScannerError::MissingNamespace(EAD_PREFIX.to_string())),
        }
    }

    /// The dialect this descriptor implements.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Namespace URI elements must carry, `None` for no namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Where `language` comes from.
    #[must_use]
    pub fn language_scope(&self) -> LanguageScope {
        self.language
    }

    /// Where narrative notes are searched.
    #[must_use]
    pub fn note_scope(&self) -> NoteScope {
        self.notes
    }

    /// Direct child elements named `local`.
    pub fn children<'a, 'input>(
        &'a self,
        node: Node<'a, 'input>,
        local: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        find_children(node, self.namespace(), local)
    }

    /// Descendant elements named `local`, in document order.
    pub fn descendants<'a, 'input>(
        &'a self,
        node: Node<'a, 'input>,
        local: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        find_descendants(node, self.namespace(), local)
    }

    /// First descendant element named `local`.
    pub fn descendant<'a, 'input>(
        &'a self,
        node: Node<'a, 'input>,
        local: &'a str,
    ) -> Option<Node<'a, 'input>> {
        find_descendant(node, self.namespace(), local)
    }
}
