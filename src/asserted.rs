//! Builds the asserted relation matrix from `(child, parent)` name pairs.

use crate::catalog::EntityCatalog;
use crate::matrix::RelationMatrix;

/// What to do with self-referential `(X, X)` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalPolicy {
    /// Encode them like any other edge.
    #[default]
    Keep,
    /// Drop them. Used after reasoning, where reflexive entailments cannot be
    /// told apart from cycle-induced ones.
    Exclude,
}

/// Encode every edge whose endpoints are both catalogued.
///
/// Edges naming an unknown entity are dropped without error; repeated edges
/// set the same cell again.
pub fn build<I, S>(catalog: &EntityCatalog, edges: I, policy: DiagonalPolicy) -> RelationMatrix
where
    I: IntoIterator<Item = (S, S)>,
    S: AsRef<str>,
{
    let mut matrix = RelationMatrix::zeros(catalog.len());
    let mut dropped = 0usize;

    for (child, parent) in edges {
        let (Some(child_idx), Some(parent_idx)) = (
            catalog.index_of(child.as_ref()),
            catalog.index_of(parent.as_ref()),
        ) else {
            dropped += 1;
            continue;
        };
        if policy == DiagonalPolicy::Exclude && child_idx == parent_idx {
            continue;
        }
        matrix.set(child_idx, parent_idx);
    }

    if dropped > 0 {
        tracing::debug!(dropped, "ignored subsumption edges with uncatalogued endpoints");
    }
    matrix
}
