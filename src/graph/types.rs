//! Core graph types
//!
//! This module contains the adjacency map shared by forward dependency graphs
//! and their reverse (dependents) form.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::ser::{Serialize, Serializer};

use crate::core::NodeId;

/// Insertion-ordered mapping from a node to its ordered, duplicate-free
/// neighbour list
///
/// A node present as a key is *expanded*. A node that only appears inside
/// some neighbour list is a *boundary* node: it is referenced but was never
/// expanded, and every lookup treats it as having no neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    entries: Vec<(NodeId, Vec<NodeId>)>,
    index: HashMap<NodeId, usize>,
}

/// Forward graph: node to the packages it depends on
pub type DependencyGraph = AdjacencyMap;

/// Reverse graph: node to the packages that depend on it
pub type ReverseGraph = AdjacencyMap;

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(node, neighbours)` pairs, in order
    pub fn from_adjacency<I, N, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<NodeId>,
        D: IntoIterator,
        D::Item: Into<NodeId>,
    {
        let mut map = Self::new();
        for (node, neighbours) in pairs {
            map.insert(node.into(), neighbours.into_iter().map(Into::into).collect());
        }
        map
    }

    /// Record the neighbour list of `node`
    ///
    /// Duplicate neighbours are dropped, keeping the first occurrence. When
    /// the node is already a key its list is replaced in place, so it keeps
    /// its original position.
    pub fn insert(&mut self, node: NodeId, neighbours: Vec<NodeId>) {
        let neighbours = dedup_preserving_order(neighbours);
        match self.index.get(&node) {
            Some(&position) => self.entries[position].1 = neighbours,
            None => {
                self.index.insert(node.clone(), self.entries.len());
                self.entries.push((node, neighbours));
            }
        }
    }

    /// Neighbour list of `node`, creating an empty entry when missing
    pub(crate) fn entry_mut(&mut self, node: &NodeId) -> &mut Vec<NodeId> {
        let position = match self.index.get(node) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(node.clone(), position);
                self.entries.push((node.clone(), Vec::new()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, node: &NodeId) -> Option<&[NodeId]> {
        self.index
            .get(node)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Neighbours of `node`; empty for boundary or unknown nodes
    pub fn neighbours(&self, node: &NodeId) -> &[NodeId] {
        self.get(node).unwrap_or(&[])
    }

    /// Whether `node` has been expanded
    pub fn contains_key(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// Whether `node` appears anywhere, as a key or inside a neighbour list
    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.contains_key(node)
            || self
                .entries
                .iter()
                .any(|(_, neighbours)| neighbours.contains(node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeId> {
        self.entries.iter().map(|(node, _)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.entries
            .iter()
            .map(|(node, neighbours)| (node, neighbours.as_slice()))
    }

    /// Number of expanded nodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, neighbours)| neighbours.len())
            .sum()
    }

    /// Every node, keys and boundary nodes alike, in first-seen order
    pub fn all_nodes(&self) -> Vec<&NodeId> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for (node, neighbours) in &self.entries {
            for candidate in std::iter::once(node).chain(neighbours) {
                if seen.insert(candidate) {
                    nodes.push(candidate);
                }
            }
        }
        nodes
    }

    /// Nodes referenced as neighbours that were never expanded
    pub fn boundary_nodes(&self) -> Vec<&NodeId> {
        self.all_nodes()
            .into_iter()
            .filter(|node| !self.contains_key(node))
            .collect()
    }

    /// Keys that are nobody's neighbour, sorted; all keys sorted if every
    /// key has an incoming edge
    pub fn roots(&self) -> Vec<&NodeId> {
        let referenced: HashSet<&NodeId> = self
            .entries
            .iter()
            .flat_map(|(_, neighbours)| neighbours)
            .collect();

        let mut roots: Vec<&NodeId> = self
            .keys()
            .filter(|node| !referenced.contains(node))
            .collect();
        if roots.is_empty() {
            roots = self.keys().collect();
        }
        roots.sort();
        roots
    }

    /// Restriction of the map to nodes within `max_depth` hops of `start`
    ///
    /// Nodes reached exactly at `max_depth` become keys; their neighbours stay
    /// in the lists but are not expanded further.
    pub fn subgraph_from(&self, start: &NodeId, max_depth: usize) -> Self {
        let mut result = Self::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if visited.contains(node) || depth > max_depth {
                continue;
            }
            visited.insert(node);

            let neighbours = self.neighbours(node);
            result.insert(node.clone(), neighbours.to_vec());

            if depth < max_depth {
                for neighbour in neighbours {
                    if !visited.contains(neighbour) {
                        queue.push_back((neighbour, depth + 1));
                    }
                }
            }
        }

        result
    }
}

impl Serialize for AdjacencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

fn dedup_preserving_order(nodes: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> AdjacencyMap {
        AdjacencyMap::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D", "E"]),
            ("D", vec![]),
            ("E", vec!["B"]),
        ])
    }

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(NodeId::new).collect()
    }

    #[test]
    fn test_insert_preserves_order_and_dedups() {
        let mut map = AdjacencyMap::new();
        map.insert(NodeId::new("root"), ids(&["b", "a", "B", "c", "a"]));

        assert_eq!(map.neighbours(&NodeId::new("root")), ids(&["b", "a", "c"]));
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut map = sample();
        map.insert(NodeId::new("b"), ids(&["e"]));

        let keys: Vec<&str> = map.keys().map(NodeId::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(map.neighbours(&NodeId::new("b")), ids(&["e"]));
    }

    #[test]
    fn test_boundary_nodes_and_contains() {
        let map = AdjacencyMap::from_adjacency([("root", vec!["leaf", "other"])]);

        assert!(map.contains_key(&NodeId::new("root")));
        assert!(!map.contains_key(&NodeId::new("leaf")));
        assert!(map.contains_node(&NodeId::new("leaf")));
        assert!(map.neighbours(&NodeId::new("leaf")).is_empty());

        let boundary: Vec<&str> = map.boundary_nodes().into_iter().map(NodeId::as_str).collect();
        assert_eq!(boundary, vec!["leaf", "other"]);
    }

    #[test]
    fn test_edge_count_and_all_nodes() {
        let map = sample();
        assert_eq!(map.len(), 5);
        assert_eq!(map.edge_count(), 6);
        assert_eq!(map.all_nodes().len(), 5);
    }

    #[test]
    fn test_roots() {
        let map = sample();
        let roots: Vec<&str> = map.roots().into_iter().map(NodeId::as_str).collect();
        assert_eq!(roots, vec!["a"]);

        let cyclic = AdjacencyMap::from_adjacency([("y", vec!["x"]), ("x", vec!["y"])]);
        let roots: Vec<&str> = cyclic.roots().into_iter().map(NodeId::as_str).collect();
        assert_eq!(roots, vec!["x", "y"]);
    }

    #[test]
    fn test_subgraph_from_respects_depth() {
        let map = sample();

        let sub = map.subgraph_from(&NodeId::new("c"), 1);
        let keys: Vec<&str> = sub.keys().map(NodeId::as_str).collect();
        assert_eq!(keys, vec!["c", "d", "e"]);
        // b is referenced by e but lies beyond the bound
        assert!(!sub.contains_key(&NodeId::new("b")));
        assert_eq!(sub.neighbours(&NodeId::new("e")), ids(&["b"]));

        let whole = map.subgraph_from(&NodeId::new("a"), 5);
        assert_eq!(whole.len(), 5);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let map = AdjacencyMap::from_adjacency([("z", vec!["a"]), ("a", vec![])]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":["a"],"a":[]}"#);
    }
}
