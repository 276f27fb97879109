use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::core::NodeId;
use crate::graph::AdjacencyMap;

/// Detector for dependency cycles in an adjacency map
///
/// Uses Tarjan's Strongly Connected Components algorithm; each component with
/// more than one node, or a single node depending on itself, is one cycle.
pub struct CycleDetector {
    cycles: Vec<DependencyCycle>,
}

/// A set of nodes that all (transitively) depend on each other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCycle {
    members: Vec<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
}

impl DependencyCycle {
    /// Members sorted by name
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Edges between members, sorted
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.members.binary_search(node).is_ok()
    }

    pub fn is_self_loop(&self) -> bool {
        self.members.len() == 1
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a new cycle detector
    pub fn new() -> Self {
        Self { cycles: Vec::new() }
    }

    /// Detect all cycles in `graph`, replacing any previous result
    ///
    /// Boundary nodes take part as plain vertices; having no outgoing edges,
    /// they never close a cycle.
    pub fn detect_cycles(&mut self, graph: &AdjacencyMap) {
        let digraph = to_digraph(graph);

        self.cycles = tarjan_scc(&digraph)
            .into_iter()
            .filter_map(|scc| cycle_from_scc(&digraph, &scc))
            .collect();
        self.cycles
            .sort_by(|a, b| a.members.first().cmp(&b.members.first()));

        debug!("found {} cycles in {} nodes", self.cycles.len(), digraph.node_count());
    }

    /// Get all detected cycles
    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get the number of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Cycles with `node` among their members
    pub fn cycles_involving<'a>(
        &'a self,
        node: &'a NodeId,
    ) -> impl Iterator<Item = &'a DependencyCycle> + 'a {
        self.cycles.iter().filter(move |cycle| cycle.contains(node))
    }
}

/// Build a petgraph view of `graph`, one vertex per distinct node
fn to_digraph(graph: &AdjacencyMap) -> DiGraph<NodeId, ()> {
    let mut digraph = DiGraph::new();
    let mut indices: HashMap<&NodeId, NodeIndex> = HashMap::new();

    for node in graph.all_nodes() {
        indices
            .entry(node)
            .or_insert_with(|| digraph.add_node(node.clone()));
    }

    for (node, neighbours) in graph.iter() {
        let from = indices[node];
        for neighbour in neighbours {
            digraph.update_edge(from, indices[neighbour], ());
        }
    }

    digraph
}

fn cycle_from_scc(digraph: &DiGraph<NodeId, ()>, scc: &[NodeIndex]) -> Option<DependencyCycle> {
    let members: HashSet<NodeIndex> = scc.iter().copied().collect();
    let mut edges = Vec::new();

    for &from in scc {
        for edge in digraph.edges(from) {
            if members.contains(&edge.target()) {
                edges.push((digraph[from].clone(), digraph[edge.target()].clone()));
            }
        }
    }

    // A lone vertex is only a cycle when it points at itself
    if scc.len() == 1 && edges.is_empty() {
        return None;
    }

    let mut names: Vec<NodeId> = scc.iter().map(|&idx| digraph[idx].clone()).collect();
    names.sort();
    edges.sort();

    Some(DependencyCycle {
        members: names,
        edges,
    })
}
