//! Longest simple path to a target.

use petgraph::algo::all_simple_paths;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::RelationGraph;

/// The longest simple path found by [`longest_simple_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestPath {
    /// Entity indices from source to target; empty when no path exists.
    pub indices: Vec<usize>,
    /// Number of edges on the path.
    pub length: usize,
}

impl LongestPath {
    /// Whether any path was found.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Find the longest simple path from any of `sources` to `target`.
///
/// Sources are scanned in the order given and paths in the order petgraph
/// enumerates them; the first path of maximal length wins. A source equal to
/// `target` contributes nothing. Out-of-range indices are skipped, so callers
/// are expected to resolve names first.
pub fn longest_simple_path(graph: &RelationGraph, sources: &[usize], target: usize) -> LongestPath {
    let mut best = LongestPath::default();
    let Some(to) = graph.node(target) else {
        return best;
    };

    for &source in sources {
        if source == target {
            continue;
        }
        let Some(from) = graph.node(source) else {
            continue;
        };
        for path in all_simple_paths::<Vec<NodeIndex>, _>(graph.inner(), from, to, 0, None) {
            let length = path.len() - 1;
            if length > best.length {
                best = LongestPath {
                    indices: path.into_iter().map(|n| n.index()).collect(),
                    length,
                };
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RelationMatrix;

    fn graph(n: usize, pairs: &[(usize, usize)]) -> RelationGraph {
        RelationGraph::from_matrix(&RelationMatrix::from_pairs(n, pairs.iter().copied()))
    }

    #[test]
    fn chain_path() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let p = longest_simple_path(&g, &[0], 4);
        assert_eq!(p.indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(p.length, 4);
    }

    #[test]
    fn prefers_longer_route() {
        // 0 → 3 directly, or 0 → 1 → 2 → 3.
        let g = graph(4, &[(0, 3), (0, 1), (1, 2), (2, 3)]);
        let p = longest_simple_path(&g, &[0], 3);
        assert_eq!(p.length, 3);
        assert_eq!(p.indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn best_across_sources() {
        let g = graph(4, &[(0, 3), (1, 2), (2, 3)]);
        let p = longest_simple_path(&g, &[0, 1], 3);
        assert_eq!(p.indices, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_first_source() {
        let g = graph(3, &[(0, 2), (1, 2)]);
        let p = longest_simple_path(&g, &[1, 0], 2);
        assert_eq!(p.indices, vec![1, 2]);
    }

    #[test]
    fn no_path_is_empty() {
        let g = graph(3, &[(0, 1)]);
        let p = longest_simple_path(&g, &[0], 2);
        assert!(p.is_empty());
        assert_eq!(p.length, 0);
    }

    #[test]
    fn source_equal_to_target_is_skipped() {
        let g = graph(2, &[(0, 1), (1, 0), (0, 0)]);
        assert!(longest_simple_path(&g, &[0], 0).is_empty());
        assert_eq!(longest_simple_path(&g, &[0, 1], 0).length, 1);
    }

    #[test]
    fn length_bounded_by_entity_count() {
        // Complete digraph on four entities.
        let pairs: Vec<_> = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .collect();
        let g = graph(4, &pairs);
        let p = longest_simple_path(&g, &[0], 3);
        assert_eq!(p.length, 3);
    }
}
