//! Reverse ("who depends on me") indexing

use std::collections::{HashSet, VecDeque};

use super::types::{DependencyGraph, ReverseGraph};
use crate::core::NodeId;

/// Inverts dependency graphs and walks them backwards
pub struct ReverseIndexer;

impl ReverseIndexer {
    /// Parent lookup for every node of `graph`
    ///
    /// Every expanded node gets an entry, even without dependents, followed by
    /// boundary nodes in first-seen order. Parents are listed in the order the
    /// forward graph declares them.
    pub fn invert(graph: &DependencyGraph) -> ReverseGraph {
        let mut reverse = ReverseGraph::new();
        for node in graph.keys() {
            reverse.entry_mut(node);
        }

        for (node, dependencies) in graph.iter() {
            for dependency in dependencies {
                let parents = reverse.entry_mut(dependency);
                if !parents.contains(node) {
                    parents.push(node.clone());
                }
            }
        }

        reverse
    }

    /// Part of `reverse` reachable from `target` through dependents
    ///
    /// Each node's full parent list is kept. A target without an entry yields
    /// a single empty entry for it.
    pub fn reverse_subgraph_from(target: &NodeId, reverse: &ReverseGraph) -> ReverseGraph {
        let mut subgraph = ReverseGraph::new();
        let mut visited = HashSet::from([target]);
        let mut queue = VecDeque::from([target]);

        while let Some(node) = queue.pop_front() {
            let parents = reverse.neighbours(node);
            subgraph.insert(node.clone(), parents.to_vec());

            for parent in parents {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        subgraph
    }
}
