//! Ontology triple store backed by oxigraph.
//!
//! Holds the parsed ontology and answers the two questions the engine asks
//! of it: which resources are declared `owl:Class`, and which
//! `rdfs:subClassOf` edges hold between resources. Names come back as raw
//! strings: IRIs verbatim, blank nodes as `_:id`. Filtering is left to the
//! entity catalog.

use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{GraphName, NamedNode, Quad, Term};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

use crate::error::StoreError;

/// IRI of `owl:Class`.
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

/// Result type for ontology store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

const CLASSES_QUERY: &str = "\
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
SELECT DISTINCT ?class WHERE { ?class rdf:type owl:Class }";

const SUBCLASS_QUERY: &str = "\
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT ?sub ?sup WHERE { ?sub rdfs:subClassOf ?sup }";

/// In-memory RDF store holding one ontology.
pub struct OntologyStore {
    store: Store,
}

impl OntologyStore {
    /// Create an empty in-memory store.
    pub fn in_memory() -> StoreResult<Self> {
        let store = Store::new().map_err(|e| StoreError::Init {
            message: e.to_string(),
        })?;
        Ok(Self { store })
    }

    /// Load an ontology file. The RDF syntax is picked from the file
    /// extension, falling back to Turtle.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                // `.owl` files are conventionally RDF/XML.
                "owl" => Some(RdfFormat::RdfXml),
                other => RdfFormat::from_extension(other),
            })
            .unwrap_or(RdfFormat::Turtle);

        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::in_memory()?;
        store.load_from_reader(format, std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), ?format, "loaded ontology");
        Ok(store)
    }

    /// Parse a Turtle document.
    pub fn from_turtle(turtle: &str) -> StoreResult<Self> {
        let store = Self::in_memory()?;
        store.load_from_reader(RdfFormat::Turtle, turtle.as_bytes())?;
        Ok(store)
    }

    /// Build a store from a class list and `(child, parent)` edges.
    ///
    /// Every class is declared `owl:Class`; each edge becomes an
    /// `rdfs:subClassOf` triple. Names that are not valid IRIs are skipped.
    pub fn from_hierarchy<C, E, S>(classes: C, edges: E) -> StoreResult<Self>
    where
        C: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let owl_class = NamedNode::new_unchecked(OWL_CLASS);
        let mut quads = Vec::new();
        let mut skipped = 0usize;

        for class in classes {
            match NamedNode::new(class.as_ref()) {
                Ok(node) => quads.push(Quad::new(
                    node,
                    rdf::TYPE.into_owned(),
                    owl_class.clone(),
                    GraphName::DefaultGraph,
                )),
                Err(_) => skipped += 1,
            }
        }
        for (child, parent) in edges {
            match (NamedNode::new(child.as_ref()), NamedNode::new(parent.as_ref())) {
                (Ok(child), Ok(parent)) => quads.push(Quad::new(
                    child,
                    rdfs::SUB_CLASS_OF.into_owned(),
                    parent,
                    GraphName::DefaultGraph,
                )),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "ignored names that are not valid IRIs");
        }

        let store = Self::in_memory()?;
        store.extend(quads)?;
        Ok(store)
    }

    fn load_from_reader(&self, format: RdfFormat, reader: impl std::io::Read) -> StoreResult<()> {
        self.store
            .load_from_reader(format, reader)
            .map_err(|e| StoreError::Load {
                message: e.to_string(),
            })
    }

    /// Insert quads in one transaction.
    pub fn extend(&self, quads: Vec<Quad>) -> StoreResult<()> {
        self.store.extend(quads).map_err(|e| StoreError::Storage {
            message: format!("insert failed: {e}"),
        })
    }

    /// Raw names of every resource typed `owl:Class`.
    pub fn class_names(&self) -> StoreResult<Vec<String>> {
        let rows = self.select_terms(CLASSES_QUERY, &["class"])?;
        Ok(rows.into_iter().filter_map(|mut row| row.pop()).collect())
    }

    /// Every `rdfs:subClassOf` edge as `(child, parent)` raw names.
    pub fn subclass_edges(&self) -> StoreResult<Vec<(String, String)>> {
        let rows = self.select_terms(SUBCLASS_QUERY, &["sub", "sup"])?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match <[String; 2]>::try_from(row) {
                Ok([sub, sup]) => Some((sub, sup)),
                Err(_) => None,
            })
            .collect())
    }

    /// Raw names of every `rdf:type` of `individual`.
    pub fn types_of(&self, individual: &str) -> StoreResult<Vec<String>> {
        let node = NamedNode::new(individual).map_err(|e| StoreError::Sparql {
            message: format!("invalid individual IRI {individual}: {e}"),
        })?;
        let query = format!(
            "SELECT ?type WHERE {{ {node} <{}> ?type }}",
            rdf::TYPE.as_str()
        );
        let rows = self.select_terms(&query, &["type"])?;
        Ok(rows.into_iter().filter_map(|mut row| row.pop()).collect())
    }

    /// Execute a SPARQL UPDATE against the store.
    pub fn update(&self, sparql: &str) -> StoreResult<()> {
        self.store.update(sparql).map_err(|e| StoreError::Sparql {
            message: format!("SPARQL update failed: {e}"),
        })
    }

    /// Run a SELECT query and return, per solution, the raw names bound to
    /// `vars` in order. Solutions with a literal or unbound variable are skipped.
    fn select_terms(&self, sparql: &str, vars: &[&str]) -> StoreResult<Vec<Vec<String>>> {
        let results = self.store.query(sparql).map_err(|e| StoreError::Sparql {
            message: format!("SPARQL query failed: {e}"),
        })?;

        let QueryResults::Solutions(solutions) = results else {
            return Err(StoreError::Sparql {
                message: "expected SELECT solutions".into(),
            });
        };

        let mut rows = Vec::new();
        for solution in solutions {
            let solution = solution.map_err(|e| StoreError::Sparql {
                message: format!("solution error: {e}"),
            })?;
            let row: Option<Vec<String>> = vars
                .iter()
                .map(|var| solution.get(*var).and_then(raw_name))
                .collect();
            if let Some(row) = row {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Number of triples in the store.
    pub fn len(&self) -> StoreResult<usize> {
        self.store.len().map_err(|e| StoreError::Storage {
            message: e.to_string(),
        })
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|n| n == 0)
    }

    /// Copy every quad into a fresh in-memory store.
    pub fn duplicate(&self) -> StoreResult<Self> {
        let quads = self
            .store
            .iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Storage {
                message: format!("failed to read quads: {e}"),
            })?;
        let copy = Self::in_memory()?;
        copy.extend(quads)?;
        Ok(copy)
    }

    /// Get internal store reference (for advanced oxigraph operations).
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl std::fmt::Debug for OntologyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntologyStore").finish()
    }
}

/// Raw name of an RDF term: IRIs verbatim, blank nodes as `_:id`.
fn raw_name(term: &Term) -> Option<String> {
    match term {
        Term::NamedNode(node) => Some(node.as_str().to_string()),
        Term::BlankNode(node) => Some(format!("_:{}", node.as_str())),
        _ => None,
    }
}
