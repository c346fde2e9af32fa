//! Closure by OWL reasoning, cleaned up by union of powers.
//!
//! Reasoning over `rdfs:subClassOf` entails reflexive edges for two different
//! reasons: the reflexivity of subsumption itself, and transitivity around a
//! cycle. Only the second kind belongs in a transitive closure, and the
//! entailed triples don't say which is which. So every reflexive edge is
//! dropped after reasoning and union of powers re-derives the ones that come
//! from cycles. On an acyclic hierarchy the cleanup changes nothing.

use crate::asserted::{self, DiagonalPolicy};
use crate::catalog::EntityCatalog;
use crate::error::ClosureResult;
use crate::ontology::OntologyStore;
use crate::reason::Reasoner;

use super::power_union::{self, PowerUnionOptions, PowerUnionOutcome};

/// Saturate `store` with `reasoner`, then read the closure back over `catalog`.
///
/// `store` is modified in place. Reasoner failures propagate unchanged.
pub fn transitive_closure(
    store: &OntologyStore,
    reasoner: &dyn Reasoner,
    catalog: &EntityCatalog,
    options: &PowerUnionOptions,
) -> ClosureResult<PowerUnionOutcome> {
    let report = reasoner.materialize(store)?;
    tracing::debug!(
        rounds = report.rounds,
        inferred = report.inferred,
        "ontology store saturated"
    );

    let edges = store.subclass_edges()?;
    let entailed = asserted::build(catalog, edges, DiagonalPolicy::Exclude);
    let outcome = power_union::transitive_closure(&entailed, options);

    let recovered = outcome.closure.count_nonzero() - entailed.count_nonzero();
    if recovered > 0 {
        tracing::debug!(recovered, "recovered cycle-induced reflexive edges");
    }
    Ok(outcome)
}
