//! Cross-check a closure matrix against OWL class-membership reasoning.
//!
//! One synthetic individual is asserted per catalogued class on a scratch copy
//! of the store. After materializing with `cax-sco` enabled, each individual's
//! inferred types are exactly the superclasses the reasoner entails for its
//! class, which is the matrix row that class should have.

use std::collections::BTreeSet;

use oxigraph::model::vocab::rdf;
use oxigraph::model::{GraphName, NamedNode, Quad};
use serde::{Deserialize, Serialize};

use crate::catalog::EntityCatalog;
use crate::error::ClosureResult;
use crate::matrix::RelationMatrix;
use crate::ontology::OntologyStore;
use crate::reason::{Reasoner, ReasonerConfig, SubsumptionReasoner};

/// Namespace for the synthetic individuals.
pub const INDIVIDUAL_BASE: &str = "http://example.org/class-closure/individual#";

/// Where matrix and reasoner disagree about one `(child, parent)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discrepancy {
    /// The matrix relates the pair, the reasoner does not.
    MatrixOnly { child: usize, parent: usize },
    /// The reasoner types the child's individual with the parent class, the
    /// matrix does not relate the pair.
    ReasonerOnly { child: usize, parent: usize },
}

/// Outcome of [`verify_membership`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Number of synthetic individuals checked.
    pub individuals: usize,
    /// Membership triples the reasoner inferred for catalogued classes.
    pub inferred_memberships: usize,
    pub discrepancies: Vec<Discrepancy>,
    /// Entities whose diagonal is set although reflexivity was not requested,
    /// i.e. members of a cycle.
    pub induced_reflexivity: Vec<usize>,
}

impl VerificationReport {
    /// Whether matrix and reasoner agree on every pair.
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Name of the synthetic individual for catalog index `index`, zero-padded to
/// the width of the catalog size.
pub fn individual_name(index: usize, catalog_len: usize) -> String {
    let width = catalog_len.max(1).to_string().len();
    format!("{INDIVIDUAL_BASE}individual_{index:0width$}")
}

/// Compare `matrix` row by row with the reasoner's class-membership inferences.
///
/// `store` is left untouched; the work happens on a duplicate. With
/// `include_reflexivity` off, each individual's own class is ignored on both
/// sides and diagonal cells are reported as induced reflexivity instead.
pub fn verify_membership(
    store: &OntologyStore,
    reasoner_config: &ReasonerConfig,
    catalog: &EntityCatalog,
    matrix: &RelationMatrix,
    include_reflexivity: bool,
) -> ClosureResult<VerificationReport> {
    let scratch = store.duplicate()?;
    let n = catalog.len();

    let mut quads = Vec::with_capacity(n);
    for (i, class) in catalog.names().iter().enumerate() {
        let Ok(class) = NamedNode::new(class.as_str()) else {
            continue;
        };
        quads.push(Quad::new(
            NamedNode::new_unchecked(individual_name(i, n)),
            rdf::TYPE.into_owned(),
            class,
            GraphName::DefaultGraph,
        ));
    }
    scratch.extend(quads)?;

    let reasoner = SubsumptionReasoner::new(ReasonerConfig {
        class_membership: true,
        ..reasoner_config.clone()
    });
    reasoner.materialize(&scratch)?;

    let mut report = VerificationReport {
        individuals: n,
        ..Default::default()
    };

    for child in 0..n {
        let mut inferred: BTreeSet<usize> = scratch
            .types_of(&individual_name(child, n))?
            .iter()
            .filter_map(|class| catalog.index_of(class))
            .collect();
        if !include_reflexivity {
            inferred.remove(&child);
            if matrix.contains(child, child) {
                report.induced_reflexivity.push(child);
            }
        }
        report.inferred_memberships += inferred.len();

        for parent in 0..n {
            if parent == child && !include_reflexivity {
                continue;
            }
            match (matrix.contains(child, parent), inferred.contains(&parent)) {
                (true, false) => report
                    .discrepancies
                    .push(Discrepancy::MatrixOnly { child, parent }),
                (false, true) => report
                    .discrepancies
                    .push(Discrepancy::ReasonerOnly { child, parent }),
                _ => {}
            }
        }
    }

    if report.is_consistent() {
        tracing::info!(
            individuals = report.individuals,
            memberships = report.inferred_memberships,
            "closure agrees with reasoner"
        );
    } else {
        tracing::warn!(
            discrepancies = report.discrepancies.len(),
            "closure disagrees with reasoner"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asserted::{self, DiagonalPolicy};
    use crate::closure::warshall::{self, WarshallVariant};

    fn iri(local: &str) -> String {
        format!("http://example.org/onto#{local}")
    }

    fn fixture(edges: &[(&str, &str)]) -> (OntologyStore, EntityCatalog, RelationMatrix) {
        let mut classes: Vec<String> = edges
            .iter()
            .flat_map(|(a, b)| [iri(a), iri(b)])
            .collect();
        classes.dedup();
        let edges: Vec<(String, String)> = edges.iter().map(|(a, b)| (iri(a), iri(b))).collect();
        let store = OntologyStore::from_hierarchy(classes.clone(), edges.clone()).unwrap();
        let catalog = EntityCatalog::from_names(classes);
        let asserted = asserted::build(&catalog, edges, DiagonalPolicy::Keep);
        (store, catalog, asserted)
    }

    #[test]
    fn individual_names_are_padded() {
        assert!(individual_name(7, 120).ends_with("individual_007"));
        assert!(individual_name(0, 0).ends_with("individual_0"));
    }

    #[test]
    fn closure_agrees_with_reasoner() {
        let (store, catalog, asserted) = fixture(&[("A", "B"), ("B", "C"), ("D", "C")]);
        let closure = warshall::transitive_closure(&asserted, WarshallVariant::BooleanOr);
        let report =
            verify_membership(&store, &ReasonerConfig::default(), &catalog, &closure, false).unwrap();
        assert!(report.is_consistent(), "{:?}", report.discrepancies);
        assert_eq!(report.individuals, 4);
        assert_eq!(report.inferred_memberships, 4);
        assert!(report.induced_reflexivity.is_empty());
        // The caller's store never sees the individuals.
        assert!(store.types_of(&individual_name(0, 4)).unwrap().is_empty());
    }

    #[test]
    fn asserted_relation_misses_indirect_parents() {
        let (store, catalog, asserted) = fixture(&[("A", "B"), ("B", "C")]);
        let report =
            verify_membership(&store, &ReasonerConfig::default(), &catalog, &asserted, false).unwrap();
        let a = catalog.index_of(&iri("A")).unwrap();
        let c = catalog.index_of(&iri("C")).unwrap();
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::ReasonerOnly { child: a, parent: c }]
        );
    }

    #[test]
    fn extra_matrix_pair_is_flagged() {
        let (store, catalog, asserted) = fixture(&[("A", "B")]);
        let mut wrong = asserted.clone();
        wrong.set(1, 0);
        let report =
            verify_membership(&store, &ReasonerConfig::default(), &catalog, &wrong, false).unwrap();
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::MatrixOnly { child: 1, parent: 0 }]
        );
    }

    #[test]
    fn cycle_reports_induced_reflexivity() {
        let (store, catalog, asserted) = fixture(&[("X", "Y"), ("Y", "X")]);
        let closure = warshall::transitive_closure(&asserted, WarshallVariant::BooleanOr);
        let report =
            verify_membership(&store, &ReasonerConfig::default(), &catalog, &closure, false).unwrap();
        assert!(report.is_consistent());
        assert_eq!(report.induced_reflexivity, vec![0, 1]);
    }

    #[test]
    fn reflexive_closure_agrees() {
        let (store, catalog, asserted) = fixture(&[("A", "B")]);
        let closure = warshall::transitive_closure(&asserted, WarshallVariant::BooleanOr).with_identity();
        let report =
            verify_membership(&store, &ReasonerConfig::default(), &catalog, &closure, true).unwrap();
        assert!(report.is_consistent(), "{:?}", report.discrepancies);
        assert_eq!(report.inferred_memberships, 3);
    }
}
