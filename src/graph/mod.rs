//! Directed-graph view of a relation matrix.
//!
//! Queries over the result relation run on a `petgraph` [`DiGraph`] whose node
//! `i` is catalog entity `i` and whose edges are the non-zero cells.
//!
//! - **Paths** ([`paths`]): longest simple path from a set of sources
//! - **Cycles** ([`cycles`]): lazy simple-cycle enumeration

pub mod cycles;
pub mod paths;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::matrix::RelationMatrix;

pub use cycles::SimpleCycles;
pub use paths::LongestPath;

/// A relation matrix as a directed graph, child → parent.
#[derive(Debug, Clone)]
pub struct RelationGraph {
    graph: DiGraph<usize, ()>,
}

impl RelationGraph {
    /// Build the graph induced by the non-zero cells of `matrix`.
    ///
    /// Node indices coincide with matrix indices. A diagonal cell becomes a
    /// self-loop.
    pub fn from_matrix(matrix: &RelationMatrix) -> Self {
        let n = matrix.size();
        let pairs = matrix.pairs();
        let mut graph = DiGraph::with_capacity(n, pairs.len());
        for i in 0..n {
            graph.add_node(i);
        }
        for (child, parent) in pairs {
            graph.add_edge(NodeIndex::new(child), NodeIndex::new(parent), ());
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node handle for entity `index`, if in range.
    pub fn node(&self, index: usize) -> Option<NodeIndex> {
        (index < self.graph.node_count()).then(|| NodeIndex::new(index))
    }

    /// Direct successors (parents) of entity `index`.
    pub fn successors(&self, index: usize) -> Vec<usize> {
        match self.node(index) {
            Some(node) => self.graph.neighbors(node).map(|n| n.index()).collect(),
            None => Vec::new(),
        }
    }

    /// Whether entity `index` relates to itself.
    pub fn has_self_loop(&self, index: usize) -> bool {
        self.node(index)
            .is_some_and(|node| self.graph.contains_edge(node, node))
    }

    /// The underlying petgraph graph.
    pub fn inner(&self) -> &DiGraph<usize, ()> {
        &self.graph
    }
}
