//! Canonical `{"elements": {"nodes": [...], "edges": [...]}}` interchange format

use crate::error::GraphError;
use crate::graph::PropertyGraph;
use crate::model::{Edge, Node, Properties};
use serde::{Deserialize, Serialize};

/// Top-level interchange document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interchange {
    pub elements: Elements,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    #[serde(default)]
    pub nodes: Vec<NodeElement>,
    #[serde(default)]
    pub edges: Vec<EdgeElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeElement {
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub label: String,
    #[serde(default)]
    pub properties: Properties,
}

impl PropertyGraph {
    /// Snapshot the graph as an interchange document. Nodes come out in id
    /// order, edges grouped by label in insertion order.
    pub fn to_interchange(&self) -> Interchange {
        let nodes = self
            .all_nodes()
            .map(|n| NodeElement {
                data: NodeData {
                    id: n.id.clone(),
                    labels: n.labels.iter().cloned().collect(),
                    properties: n.properties.clone(),
                },
            })
            .collect();

        let edges = self
            .all_edges()
            .map(|e| EdgeElement {
                data: EdgeData {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    label: e.label.clone(),
                    properties: e.properties.clone(),
                },
            })
            .collect();

        Interchange {
            elements: Elements { nodes, edges },
        }
    }

    /// Rebuild a graph from an interchange document. Duplicate node ids and
    /// nodes without labels are rejected; dangling edges are kept.
    pub fn from_interchange(doc: Interchange) -> Result<Self, GraphError> {
        let mut graph = PropertyGraph::new();
        for NodeElement { data } in doc.elements.nodes {
            let node = Node::with_labels(data.id, data.labels).with_properties(data.properties);
            graph.insert_node(node)?;
        }
        for EdgeElement { data } in doc.elements.edges {
            graph.add_edge(
                Edge::new(data.source, data.target, data.label).with_properties(data.properties),
            );
        }
        Ok(graph)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, GraphError> {
        Ok(serde_json::to_value(self.to_interchange())?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(&self.to_interchange())?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let doc: Interchange = serde_json::from_str(json)?;
        PropertyGraph::from_interchange(doc)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, GraphError> {
        let doc: Interchange = serde_json::from_value(value)?;
        PropertyGraph::from_interchange(doc)
    }
}
