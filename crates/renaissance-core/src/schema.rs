//! Schema (ontology) summary: the meta-graph of label sets observed in an instance graph

use crate::graph::PropertyGraph;
use crate::model::{Edge, LabelSet, Node, PropertyValue};
use std::collections::BTreeMap;

/// Property key holding how many instances a meta-node or meta-edge stands for.
pub const COUNT_KEY: &str = "count";

/// Id of the meta-node for a label set: the sorted labels joined by `:`.
pub fn label_set_id(labels: &LabelSet) -> String {
    labels.iter().map(String::as_str).collect::<Vec<_>>().join(":")
}

impl PropertyGraph {
    /// Derive the meta-graph of this graph.
    ///
    /// One meta-node per distinct label set, one meta-edge per distinct
    /// (source label set, edge label, target label set) triple. Edges with a
    /// missing endpoint contribute nothing.
    pub fn summarize_schema(&self) -> PropertyGraph {
        let mut node_sets: BTreeMap<String, (LabelSet, i64)> = BTreeMap::new();
        for node in self.all_nodes() {
            node_sets
                .entry(label_set_id(&node.labels))
                .or_insert_with(|| (node.labels.clone(), 0))
                .1 += 1;
        }

        let mut triples: BTreeMap<(String, String, String), i64> = BTreeMap::new();
        for edge in self.all_edges() {
            let (Some(source), Some(target)) = (self.node(&edge.source), self.node(&edge.target))
            else {
                continue;
            };
            let key = (
                label_set_id(&source.labels),
                edge.label.clone(),
                label_set_id(&target.labels),
            );
            *triples.entry(key).or_insert(0) += 1;
        }

        let mut summary = PropertyGraph::new();
        for (id, (labels, count)) in node_sets {
            let mut node = Node::with_labels(id, labels);
            node.properties
                .insert(COUNT_KEY.to_string(), PropertyValue::Integer(count));
            summary.put_node(node);
        }
        for ((source, label, target), count) in triples {
            summary.add_edge(Edge::new(source, target, label).with_property(COUNT_KEY, count));
        }
        summary
    }
}

/// Render a schema summary as sorted one-line descriptions, e.g.
/// `Structure -specializes-> Structure (2)`.
pub fn schema_lines(summary: &PropertyGraph) -> Vec<String> {
    let count_of = |value: Option<&PropertyValue>| match value {
        Some(PropertyValue::Integer(n)) => *n,
        _ => 0,
    };

    let mut lines: Vec<String> = summary
        .all_nodes()
        .map(|n| format!("{} ({})", n.id, count_of(n.property(COUNT_KEY))))
        .collect();
    let mut edge_lines: Vec<String> = summary
        .all_edges()
        .map(|e| {
            format!(
                "{} -{}-> {} ({})",
                e.source,
                e.label,
                e.target,
                count_of(e.properties.get(COUNT_KEY))
            )
        })
        .collect();
    edge_lines.sort();
    lines.extend(edge_lines);
    lines
}
