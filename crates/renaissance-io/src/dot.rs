//! Graphviz export with labeled edges

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use renaissance_core::PropertyGraph;
use std::collections::HashMap;

/// Render `graph` as DOT. Nodes are labeled with their id, edges with their
/// label; edges with a missing endpoint are left out.
pub fn render_dot(graph: &PropertyGraph) -> String {
    let mut drawing: DiGraph<&str, &str> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.node_count());
    for node in graph.all_nodes() {
        index.insert(node.id.as_str(), drawing.add_node(node.id.as_str()));
    }

    for edge in graph.all_edges() {
        if let (Some(&source), Some(&target)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        {
            drawing.add_edge(source, target, edge.label.as_str());
        }
    }

    format!("{}", Dot::new(&drawing))
}
