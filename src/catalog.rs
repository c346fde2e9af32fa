//! Entity catalog: the ordered entity list and its name ↔ index bijection.
//!
//! Every matrix in the engine is indexed by catalog position. The catalog
//! keeps only names that look like absolute identifiers (a recognised URI
//! scheme prefix), which filters out blank nodes and other anonymous classes.

use std::collections::{BTreeSet, HashMap};

use crate::error::QueryError;

/// URI scheme prefixes accepted by [`EntityCatalog::from_names`].
pub const DEFAULT_SCHEMES: &[&str] = &["http://", "https://"];

/// Ordered, duplicate-free list of entity names with O(1) reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCatalog {
    /// Entity names sorted ascending; position is the matrix index.
    names: Vec<String>,
    /// Reverse map: name → index into `names`.
    index: HashMap<String, usize>,
}

impl EntityCatalog {
    /// Build a catalog from raw names using [`DEFAULT_SCHEMES`].
    pub fn from_names<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_schemes(raw, DEFAULT_SCHEMES)
    }

    /// Build a catalog keeping only names that start with one of `schemes`.
    ///
    /// Names failing the test are dropped silently; duplicates collapse and
    /// the survivors are sorted lexicographically.
    pub fn with_schemes<I, S, P>(raw: I, schemes: &[P]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: AsRef<str>,
    {
        let mut dropped = 0usize;
        let kept: BTreeSet<String> = raw
            .into_iter()
            .map(Into::into)
            .filter(|name| {
                let ok = schemes.iter().any(|s| name.starts_with(s.as_ref()));
                if !ok {
                    dropped += 1;
                }
                ok
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(dropped, "ignored names without a recognised URI scheme");
        }

        let names: Vec<String> = kept.into_iter().collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Number of entities (the matrix dimension C).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty (a valid 0×0 case).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The ordered entity names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at `index`, if in range.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of `name`, if catalogued.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether `name` is catalogued.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Index of `name`, or [`QueryError::UnknownEntity`].
    pub fn resolve(&self, name: &str) -> Result<usize, QueryError> {
        self.index_of(name).ok_or_else(|| QueryError::UnknownEntity {
            name: name.to_string(),
        })
    }

    /// Translate an index path into names.
    pub fn names_for(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&i| self.name(i).map(str::to_string))
            .collect()
    }

    /// Short display form of the name at `index`: the IRI fragment after `#`,
    /// otherwise the last path segment.
    pub fn short_name(&self, index: usize) -> Option<&str> {
        self.name(index).map(short_form)
    }
}

/// Strip the ontology namespace from an IRI for display.
pub fn short_form(iri: &str) -> &str {
    match iri.split_once('#') {
        Some((_, fragment)) => fragment,
        None => iri.rsplit('/').next().unwrap_or(iri),
    }
}
