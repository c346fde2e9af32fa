//! Lazy simple-cycle enumeration (Johnson, 1975).
//!
//! Self-loops are reported first as 1-cycles. Longer cycles are found one
//! strongly connected component at a time: each component is searched for
//! cycles through one start node, then the start node is removed and the
//! remainder is split into components again. The search state lives in the
//! iterator, so nothing is enumerated until asked for.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use super::RelationGraph;

/// Iterator over the simple cycles of a [`RelationGraph`].
///
/// Each cycle is a list of entity indices starting at one of its members; the
/// closing edge back to the first entry is implied.
#[derive(Debug)]
pub struct SimpleCycles {
    /// Successors without self-loops.
    adjacency: Vec<Vec<usize>>,
    self_loops: std::vec::IntoIter<usize>,
    /// Components of more than one node still to be searched.
    pending: Vec<Vec<usize>>,
    search: Option<ComponentSearch>,
}

impl SimpleCycles {
    pub fn new(graph: &RelationGraph) -> Self {
        let n = graph.node_count();
        let mut adjacency = Vec::with_capacity(n);
        let mut self_loops = Vec::new();
        for node in 0..n {
            let mut succ = graph.successors(node);
            if graph.has_self_loop(node) {
                self_loops.push(node);
                succ.retain(|&s| s != node);
            }
            adjacency.push(succ);
        }

        let all: Vec<usize> = (0..n).collect();
        let pending = nontrivial_components(&adjacency, &all);
        Self {
            adjacency,
            self_loops: self_loops.into_iter(),
            pending,
            search: None,
        }
    }
}

impl Iterator for SimpleCycles {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if let Some(node) = self.self_loops.next() {
            return Some(vec![node]);
        }
        loop {
            match self.search.as_mut() {
                Some(search) => {
                    if let Some(cycle) = search.next_cycle(&self.adjacency) {
                        return Some(cycle);
                    }
                    let rest = std::mem::take(&mut search.rest);
                    self.search = None;
                    self.pending.extend(nontrivial_components(&self.adjacency, &rest));
                }
                None => {
                    let component = self.pending.pop()?;
                    self.search = ComponentSearch::start(component, &self.adjacency);
                }
            }
        }
    }
}

/// Johnson's circuit search through one start node of one component.
#[derive(Debug)]
struct ComponentSearch {
    start: usize,
    /// Component members other than `start`.
    rest: Vec<usize>,
    members: HashSet<usize>,
    path: Vec<usize>,
    blocked: HashSet<usize>,
    closed: HashSet<usize>,
    blocked_by: HashMap<usize, HashSet<usize>>,
    /// DFS frames: node and its not yet explored successors.
    stack: Vec<(usize, Vec<usize>)>,
}

impl ComponentSearch {
    fn start(mut component: Vec<usize>, adjacency: &[Vec<usize>]) -> Option<Self> {
        let start = component.pop()?;
        let members: HashSet<usize> = component.iter().copied().chain([start]).collect();
        let mut search = Self {
            start,
            rest: component,
            members,
            path: vec![start],
            blocked: HashSet::from([start]),
            closed: HashSet::new(),
            blocked_by: HashMap::new(),
            stack: Vec::new(),
        };
        let succ = search.successors(adjacency, start);
        search.stack.push((start, succ));
        Some(search)
    }

    fn successors(&self, adjacency: &[Vec<usize>], node: usize) -> Vec<usize> {
        adjacency[node]
            .iter()
            .copied()
            .filter(|n| self.members.contains(n))
            .collect()
    }

    fn next_cycle(&mut self, adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
        loop {
            let (node, succ) = self.stack.last_mut()?;
            let node = *node;
            match succ.pop() {
                Some(next) if next == self.start => {
                    self.closed.extend(self.path.iter().copied());
                    return Some(self.path.clone());
                }
                Some(next) => {
                    if !self.blocked.contains(&next) {
                        self.path.push(next);
                        let succ = self.successors(adjacency, next);
                        self.stack.push((next, succ));
                        self.closed.remove(&next);
                        self.blocked.insert(next);
                    }
                }
                None => {
                    if self.closed.contains(&node) {
                        self.unblock(node);
                    } else {
                        for parent in self.successors(adjacency, node) {
                            self.blocked_by.entry(parent).or_default().insert(node);
                        }
                    }
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }

    fn unblock(&mut self, node: usize) {
        let mut work = vec![node];
        while let Some(n) = work.pop() {
            if self.blocked.remove(&n) {
                if let Some(waiting) = self.blocked_by.remove(&n) {
                    work.extend(waiting);
                }
            }
        }
    }
}

/// Strongly connected components of the subgraph induced by `nodes` that
/// contain more than one node.
fn nontrivial_components(adjacency: &[Vec<usize>], nodes: &[usize]) -> Vec<Vec<usize>> {
    let mut graph = DiGraph::<usize, ()>::with_capacity(nodes.len(), 0);
    let local: HashMap<usize, NodeIndex> = nodes.iter().map(|&n| (n, graph.add_node(n))).collect();
    for (&node, &from) in &local {
        for succ in &adjacency[node] {
            if let Some(&to) = local.get(succ) {
                graph.add_edge(from, to, ());
            }
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| component.into_iter().map(|ix| graph[ix]).collect())
        .collect()
}
