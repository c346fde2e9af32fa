// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # class-closure
//!
//! Transitive closure of a class-subsumption hierarchy, extracted from an OWL
//! ontology and held as a binary adjacency matrix.
//!
//! ## Architecture
//!
//! - **Ontology store** (`ontology`): oxigraph-backed triple store supplying
//!   class names and `rdfs:subClassOf` edges
//! - **Entity catalog** (`catalog`): sorted entity list and name ↔ index map
//! - **Relation matrix** (`matrix`, `asserted`): C×C binary matrices
//! - **Closure** (`closure`): union of powers, Warshall, and OWL reasoning
//!   with union-of-powers cleanup
//! - **Reasoning** (`reason`): OWL 2 RL subsumption rules as SPARQL UPDATE
//! - **Graph queries** (`graph`): longest simple path, simple cycles
//! - **Verification** (`verify`): membership cross-check against the reasoner
//!
//! ## Library usage
//!
//! ```no_run
//! use class_closure::closure::ClosureMethod;
//! use class_closure::config::EngineConfig;
//! use class_closure::engine::Engine;
//!
//! let classes = ["http://ex.org/#A", "http://ex.org/#B", "http://ex.org/#C"];
//! let edges = [("http://ex.org/#A", "http://ex.org/#B"), ("http://ex.org/#B", "http://ex.org/#C")];
//! let engine = Engine::from_hierarchy(classes, edges, EngineConfig::new(ClosureMethod::Warshall, false)).unwrap();
//!
//! let (matrix, entities) = engine.results();
//! assert!(matrix.contains(0, 2));
//! let path = engine.longest_path(&[entities[0].as_str()], &entities[2]).unwrap();
//! assert_eq!(path.length, 2);
//! ```

pub mod asserted;
pub mod catalog;
pub mod closure;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod graph;
pub mod matrix;
pub mod ontology;
pub mod reason;
pub mod verify;
