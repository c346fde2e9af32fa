//! Engine facade: top-level API for the closure engine.
//!
//! The `Engine` owns the ontology store, the entity catalog and every matrix
//! derived from it. Construction runs the whole pipeline once:
//!
//! ```text
//! store ─► catalog ─► asserted ─► closure (method 1/2/3) ─► reflexivity ─► result
//! ```
//!
//! Queries (longest path, simple cycles, verification, export) then read the
//! result relation without recomputing anything.

use std::path::Path;

use serde::Serialize;

use crate::asserted::{self, DiagonalPolicy};
use crate::catalog::EntityCatalog;
use crate::closure::power_union::{self, PowerUnionOutcome, StopReason};
use crate::closure::{self, ClosureMethod, hybrid, warshall};
use crate::config::EngineConfig;
use crate::error::{ClosureResult, ConfigError, QueryError};
use crate::export::ResultSnapshot;
use crate::graph::{RelationGraph, SimpleCycles, paths};
use crate::matrix::RelationMatrix;
use crate::ontology::OntologyStore;
use crate::reason::{Reasoner, SubsumptionReasoner};
use crate::verify::{self, VerificationReport};

/// A longest-path query answer with entity names resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamedPath {
    /// Entity indices from source to target; empty when no path exists.
    pub indices: Vec<usize>,
    /// Entity names along the path.
    pub names: Vec<String>,
    /// Number of edges on the path.
    pub length: usize,
}

/// Diagnostics of the union-of-powers loop (methods 1 and 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUnionStats {
    pub max_power: usize,
    pub stop_reason: StopReason,
}

/// The relation closure engine.
///
/// Owns the store, catalog and matrices of one run. Configuration is fixed at
/// construction.
pub struct Engine {
    config: EngineConfig,
    store: OntologyStore,
    catalog: EntityCatalog,
    asserted: RelationMatrix,
    closure: Option<RelationMatrix>,
    result: RelationMatrix,
    graph: RelationGraph,
    alert: bool,
    power_union_stats: Option<PowerUnionStats>,
}

impl Engine {
    /// Build an engine over `store`, reasoning with [`SubsumptionReasoner`]
    /// when method 3 is configured.
    pub fn new(store: OntologyStore, config: EngineConfig) -> ClosureResult<Self> {
        let reasoner = SubsumptionReasoner::new(config.reasoner.clone());
        Self::with_reasoner(store, config, &reasoner)
    }

    /// Load an ontology file and build an engine over it.
    pub fn load(path: &Path, config: EngineConfig) -> ClosureResult<Self> {
        let store = OntologyStore::load(path)?;
        Self::new(store, config)
    }

    /// Build an engine from a class list and `(child, parent)` edges.
    pub fn from_hierarchy<C, E, S>(classes: C, edges: E, config: EngineConfig) -> ClosureResult<Self>
    where
        C: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let store = OntologyStore::from_hierarchy(classes, edges)?;
        Self::new(store, config)
    }

    /// Build an engine over `store` using `reasoner` for method 3.
    pub fn with_reasoner(
        store: OntologyStore,
        config: EngineConfig,
        reasoner: &dyn Reasoner,
    ) -> ClosureResult<Self> {
        let catalog = EntityCatalog::with_schemes(store.class_names()?, &config.entity_schemes);
        let asserted = asserted::build(&catalog, store.subclass_edges()?, DiagonalPolicy::Keep);

        tracing::info!(
            entities = catalog.len(),
            asserted = asserted.count_nonzero(),
            method = %config.closure_method,
            reflexive = config.include_reflexivity,
            "initializing closure engine"
        );

        let mut alert = false;
        let mut power_union_stats = None;
        let mut record = |outcome: PowerUnionOutcome| {
            alert = outcome.alert;
            power_union_stats = Some(PowerUnionStats {
                max_power: outcome.max_power,
                stop_reason: outcome.stop_reason,
            });
            outcome.closure
        };

        let closure = match config.closure_method {
            ClosureMethod::None => None,
            ClosureMethod::PowerUnion => Some(record(power_union::transitive_closure(
                &asserted,
                &config.power_union,
            ))),
            ClosureMethod::Warshall => Some(warshall::transitive_closure(
                &asserted,
                config.warshall_variant,
            )),
            ClosureMethod::Reasoning => Some(record(hybrid::transitive_closure(
                &store,
                reasoner,
                &catalog,
                &config.power_union,
            )?)),
        };

        if alert {
            tracing::warn!(
                method = %config.closure_method,
                "early stopping may have cut the closure short; re-check with Warshall's algorithm"
            );
        }

        let mut result = closure.clone().unwrap_or_else(|| asserted.clone());
        if config.include_reflexivity {
            result = closure::merge_reflexivity(result);
        }
        let graph = RelationGraph::from_matrix(&result);

        tracing::info!(pairs = result.count_nonzero(), "closure engine ready");

        Ok(Self {
            config,
            store,
            catalog,
            asserted,
            closure,
            result,
            graph,
            alert,
            power_union_stats,
        })
    }

    /// The result relation and its ordered entity list.
    pub fn results(&self) -> (&RelationMatrix, &[String]) {
        (&self.result, self.catalog.names())
    }

    /// The result relation queries run against.
    pub fn result(&self) -> &RelationMatrix {
        &self.result
    }

    /// The relation as asserted in the ontology.
    pub fn asserted(&self) -> &RelationMatrix {
        &self.asserted
    }

    /// The closure before any reflexivity merge; `None` for method 0.
    pub fn closure(&self) -> Option<&RelationMatrix> {
        self.closure.as_ref()
    }

    /// Whether union of powers raised its early-stopping alert.
    pub fn alert(&self) -> bool {
        self.alert
    }

    pub fn power_union_stats(&self) -> Option<PowerUnionStats> {
        self.power_union_stats
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn entities(&self) -> &[String] {
        self.catalog.names()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The ontology store. Saturated in place when method 3 was used.
    pub fn store(&self) -> &OntologyStore {
        &self.store
    }

    /// Longest simple path in the result relation from any of `sources` to
    /// `target`.
    ///
    /// Fails with [`QueryError::EmptySources`] or
    /// [`QueryError::UnknownEntity`]; the engine stays usable either way.
    pub fn longest_path<S: AsRef<str>>(&self, sources: &[S], target: &str) -> ClosureResult<NamedPath> {
        if sources.is_empty() {
            return Err(QueryError::EmptySources.into());
        }
        let source_indices = sources
            .iter()
            .map(|name| self.catalog.resolve(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let target_index = self.catalog.resolve(target)?;

        let path = paths::longest_simple_path(&self.graph, &source_indices, target_index);
        tracing::debug!(target, length = path.length, "longest path query");
        Ok(NamedPath {
            names: self.catalog.names_for(&path.indices),
            indices: path.indices,
            length: path.length,
        })
    }

    /// Lazily enumerate the simple cycles of the result relation.
    pub fn simple_cycles(&self) -> SimpleCycles {
        SimpleCycles::new(&self.graph)
    }

    /// Entity names of a cycle yielded by [`Engine::simple_cycles`].
    pub fn cycle_names(&self, cycle: &[usize]) -> Vec<String> {
        self.catalog.names_for(cycle)
    }

    /// Serializable snapshot of the result.
    pub fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot::new(
            self.catalog.names(),
            &self.result,
            self.config.closure_method,
            self.config.include_reflexivity,
            self.alert,
        )
    }

    /// Cross-check the result against class-membership reasoning.
    ///
    /// Requires a closure method other than 0.
    pub fn verify_against_reasoner(&self) -> ClosureResult<VerificationReport> {
        if !self.config.closure_method.computes_closure() {
            return Err(ConfigError::ClosureRequired {
                operation: "membership verification".into(),
            }
            .into());
        }
        verify::verify_membership(
            &self.store,
            &self.config.reasoner,
            &self.catalog,
            &self.result,
            self.config.include_reflexivity,
        )
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("method", &self.config.closure_method)
            .field("reflexive", &self.config.include_reflexivity)
            .field("entities", &self.catalog.len())
            .field("pairs", &self.result.count_nonzero())
            .field("alert", &self.alert)
            .finish()
    }
}
