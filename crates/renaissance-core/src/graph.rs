//! Label-indexed property multigraph

use crate::error::GraphError;
use crate::model::{Edge, Node};
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The property graph: nodes keyed by id, edges bucketed by label.
///
/// Edges are not checked against the node map on insertion. Passes build
/// edges before the nodes they point at are assembled, and [`clean_up`]
/// prunes whatever still dangles at the end.
///
/// [`clean_up`]: PropertyGraph::clean_up
#[derive(Clone, Default, PartialEq)]
pub struct PropertyGraph {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<String, Vec<Edge>>,
}

impl std::fmt::Debug for PropertyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyGraph")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

/// What [`PropertyGraph::clean_up`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub dangling_removed: usize,
    pub duplicates_removed: usize,
}

impl PropertyGraph {
    pub fn new() -> Self {
        PropertyGraph::default()
    }

    /// Insert a node. Ids are unique; a second insert with the same id is rejected.
    pub fn insert_node(&mut self, node: Node) -> Result<(), GraphError> {
        if node.labels.is_empty() {
            return Err(GraphError::EmptyLabels(node.id));
        }
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Insert or replace a node without the uniqueness check.
    pub(crate) fn put_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Append an edge to its label bucket.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.entry(edge.label.clone()).or_default().push(edge);
    }

    pub fn extend_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Add a label to an existing node.
    pub fn add_label(&mut self, id: &str, label: &str) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        node.add_label(label);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Iterate over all nodes in id order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over all edges, grouped by label.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    /// Distinct edge labels present in the graph.
    pub fn edge_labels(&self) -> impl Iterator<Item = &str> {
        self.edges
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(label, _)| label.as_str())
    }

    /// Nodes whose label set contains `label`.
    pub fn find_nodes_by_label<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a Node> {
        self.nodes.values().filter(move |n| n.has_label(label))
    }

    /// All edges carrying exactly `label`.
    pub fn find_edges_by_label(&self, label: &str) -> &[Edge] {
        self.edges.get(label).map_or(&[], Vec::as_slice)
    }

    /// Check if an edge with this exact triple exists.
    pub fn has_edge(&self, source: &str, target: &str, label: &str) -> bool {
        self.find_edges_by_label(label)
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Nodes one `label` edge away from `id`: targets for outgoing, sources
    /// for incoming. Endpoints missing from the node map are skipped.
    pub fn neighbors_by_label(&self, id: &str, label: &str, direction: Direction) -> Vec<&Node> {
        self.find_edges_by_label(label)
            .iter()
            .filter_map(|e| match direction {
                Direction::Outgoing if e.source == id => Some(e.target.as_str()),
                Direction::Incoming if e.target == id => Some(e.source.as_str()),
                _ => None,
            })
            .filter_map(|other| self.nodes.get(other))
            .collect()
    }

    /// All edge pairs `(e1, e2)` with `e1.label == first`, `e2.label == second`
    /// and `e1.target == e2.source`.
    pub fn find_two_hop_paths(&self, first: &str, second: &str) -> Vec<(&Edge, &Edge)> {
        let mut by_source: HashMap<&str, Vec<&Edge>> = HashMap::new();
        for e2 in self.find_edges_by_label(second) {
            by_source.entry(e2.source.as_str()).or_default().push(e2);
        }

        let mut paths = Vec::new();
        for e1 in self.find_edges_by_label(first) {
            if let Some(continuations) = by_source.get(e1.target.as_str()) {
                for e2 in continuations {
                    paths.push((e1, *e2));
                }
            }
        }
        paths
    }

    /// Drop edges with a missing endpoint and collapse exact
    /// (source, target, label) duplicates, keeping the first occurrence.
    pub fn clean_up(&mut self) -> CleanupStats {
        let mut stats = CleanupStats::default();
        let nodes = &self.nodes;

        for bucket in self.edges.values_mut() {
            let before = bucket.len();
            bucket.retain(|e| nodes.contains_key(&e.source) && nodes.contains_key(&e.target));
            stats.dangling_removed += before - bucket.len();

            let before = bucket.len();
            let mut seen: HashSet<(String, String)> = HashSet::with_capacity(before);
            bucket.retain(|e| seen.insert((e.source.clone(), e.target.clone())));
            stats.duplicates_removed += before - bucket.len();
        }
        self.edges.retain(|_, bucket| !bucket.is_empty());

        tracing::debug!(
            "Cleanup removed {} dangling and {} duplicate edges",
            stats.dangling_removed,
            stats.duplicates_removed
        );
        stats
    }
}
