//! Unit tests for renaissance-core

use crate::*;

fn sample_graph() -> PropertyGraph {
    let mut graph = PropertyGraph::new();
    graph
        .insert_node(
            Node::with_labels("a", ["Structure", "Container"])
                .with_property("kind", "class/struct/template")
                .with_property("lines", 42i64),
        )
        .unwrap();
    graph.insert_node(Node::new("b", "Structure")).unwrap();
    graph
        .insert_node(Node::new("c", "Variable").with_property("static", true))
        .unwrap();
    graph.insert_node(Node::new("d", "Structure")).unwrap();

    graph.add_edge(Edge::new("a", "b", "contains"));
    graph.add_edge(Edge::new("a", "c", "hasVariable"));
    graph.add_edge(Edge::new("b", "d", "specializes"));
    graph.add_edge(Edge::new("a", "missing", "uses"));
    graph
}

#[test]
fn test_insert_node_rejects_duplicates() {
    let mut graph = PropertyGraph::new();
    graph.insert_node(Node::new("x", "Structure")).unwrap();

    let err = graph.insert_node(Node::new("x", "Variable")).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode(id) if id == "x"));
    assert_eq!(graph.node_count(), 1);
    assert!(graph.node("x").unwrap().has_label("Structure"));
}

#[test]
fn test_insert_node_rejects_empty_labels() {
    let mut graph = PropertyGraph::new();
    let node = Node::with_labels("x", Vec::<String>::new());
    assert!(matches!(graph.insert_node(node), Err(GraphError::EmptyLabels(_))));
}

#[test]
fn test_dangling_edges_are_accepted_on_insert() {
    let mut graph = PropertyGraph::new();
    graph.add_edge(Edge::new("nowhere", "nothing", "contains"));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_find_by_label() {
    let graph = sample_graph();

    let structures: Vec<_> = graph.find_nodes_by_label("Structure").map(|n| n.id.as_str()).collect();
    assert_eq!(structures, vec!["a", "b", "d"]);

    let containers: Vec<_> = graph.find_nodes_by_label("Container").map(|n| n.id.as_str()).collect();
    assert_eq!(containers, vec!["a"]);

    assert_eq!(graph.find_edges_by_label("contains").len(), 1);
    assert!(graph.find_edges_by_label("invoke").is_empty());
    assert!(graph.has_edge("a", "b", "contains"));
    assert!(!graph.has_edge("b", "a", "contains"));
}

#[test]
fn test_neighbors_by_label() {
    let graph = sample_graph();

    let out: Vec<_> = graph
        .neighbors_by_label("a", "contains", Direction::Outgoing)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(out, vec!["b"]);

    let incoming: Vec<_> = graph
        .neighbors_by_label("d", "specializes", Direction::Incoming)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(incoming, vec!["b"]);

    // dangling target is not a neighbor
    assert!(graph.neighbors_by_label("a", "uses", Direction::Outgoing).is_empty());
}

#[test]
fn test_two_hop_paths() {
    let mut graph = PropertyGraph::new();
    graph.add_edge(Edge::new("cls", "file1", "Source"));
    graph.add_edge(Edge::new("fn", "file1", "Source"));
    graph.add_edge(Edge::new("var", "file2", "Source"));
    graph.add_edge(Edge::new("file1", "dir", "ParentFolder"));
    graph.add_edge(Edge::new("dir", "root", "ParentFolder"));

    let paths: Vec<_> = graph
        .find_two_hop_paths("Source", "ParentFolder")
        .into_iter()
        .map(|(e1, e2)| (e1.source.as_str(), e1.target.as_str(), e2.target.as_str()))
        .collect();
    assert_eq!(paths, vec![("cls", "file1", "dir"), ("fn", "file1", "dir")]);

    let folder_chain = graph.find_two_hop_paths("ParentFolder", "ParentFolder");
    assert_eq!(folder_chain.len(), 1);
    assert_eq!(folder_chain[0].1.target, "root");
}

#[test]
fn test_clean_up_drops_dangling_and_duplicates() {
    let mut graph = sample_graph();
    graph.add_edge(Edge::new("a", "b", "contains").with_property("second", true));
    graph.add_edge(Edge::new("a", "b", "association"));
    graph.add_edge(Edge::new("ghost", "a", "contains"));

    let stats = graph.clean_up();
    assert_eq!(stats.dangling_removed, 2);
    assert_eq!(stats.duplicates_removed, 1);

    let contains = graph.find_edges_by_label("contains");
    assert_eq!(contains.len(), 1);
    assert!(contains[0].properties.get("second").is_none());
    // same endpoints under a different label is not a duplicate
    assert!(graph.has_edge("a", "b", "association"));
    assert!(graph.find_edges_by_label("uses").is_empty());
    assert_eq!(graph.edge_labels().collect::<Vec<_>>(), vec!["association", "contains", "hasVariable", "specializes"]);
}

#[test]
fn test_interchange_round_trip() {
    let mut graph = sample_graph();
    let mut nested = Properties::new();
    nested.insert("depth".to_string(), PropertyValue::Float(1.5));
    nested.insert(
        "tags".to_string(),
        PropertyValue::List(vec!["x".into(), PropertyValue::Integer(3), PropertyValue::Null]),
    );
    graph.add_edge(
        Edge::new("b", "c", "association").with_property("meta", PropertyValue::Map(nested)),
    );

    let json = graph.to_json_string_pretty().unwrap();
    let restored = PropertyGraph::from_json_str(&json).unwrap();
    assert_eq!(restored, graph);

    let value = graph.to_json_value().unwrap();
    assert_eq!(value["elements"]["nodes"][0]["data"]["id"], "a");
    assert_eq!(value["elements"]["nodes"][0]["data"]["labels"], serde_json::json!(["Container", "Structure"]));
    assert_eq!(value["elements"]["nodes"][0]["data"]["properties"]["lines"], 42);
    assert_eq!(PropertyGraph::from_json_value(value).unwrap(), graph);
}

#[test]
fn test_interchange_keeps_large_unsigned_integers() {
    let mut graph = PropertyGraph::new();
    graph
        .insert_node(
            Node::new("n", "Structure")
                .with_property("hash", u64::MAX)
                .with_property("offset", 7u64),
        )
        .unwrap();

    let json = graph.to_json_string_pretty().unwrap();
    assert!(json.contains("18446744073709551615"));
    let restored = PropertyGraph::from_json_str(&json).unwrap();
    let node = restored.node("n").unwrap();
    assert_eq!(node.property("hash"), Some(&PropertyValue::Unsigned(u64::MAX)));
    assert_eq!(node.property("offset"), Some(&PropertyValue::Integer(7)));
    assert_eq!(restored, graph);
}

#[test]
fn test_interchange_rejects_duplicate_ids() {
    let json = r#"{"elements": {"nodes": [
        {"data": {"id": "n1", "labels": ["Folder"], "properties": {}}},
        {"data": {"id": "n1", "labels": ["SourceFile"]}}
    ]}}"#;
    assert!(matches!(PropertyGraph::from_json_str(json), Err(GraphError::DuplicateNode(_))));
}

#[test]
fn test_interchange_rejects_malformed_documents() {
    assert!(matches!(PropertyGraph::from_json_str("{\"nodes\": []}"), Err(GraphError::Interchange(_))));
    assert!(PropertyGraph::from_json_str("not json").is_err());
}

#[test]
fn test_interchange_defaults_missing_sections() {
    let graph = PropertyGraph::from_json_str(r#"{"elements": {}}"#).unwrap();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_schema_summary() {
    let graph = sample_graph();
    let summary = graph.summarize_schema();

    assert_eq!(summary.node_count(), 3);
    let structure = summary.node("Structure").unwrap();
    assert_eq!(structure.property("count"), Some(&PropertyValue::Integer(2)));
    assert!(summary.node("Container:Structure").unwrap().has_label("Container"));

    insta::assert_snapshot!(schema_lines(&summary).join("\n"), @r"
    Container:Structure (1)
    Structure (2)
    Variable (1)
    Container:Structure -contains-> Structure (1)
    Container:Structure -hasVariable-> Variable (1)
    Structure -specializes-> Structure (1)
    ");
}

#[test]
fn test_schema_summary_collapses_repeated_triples() {
    let mut graph = PropertyGraph::new();
    for id in ["f1", "f2", "f3"] {
        graph.insert_node(Node::new(id, "Operation")).unwrap();
    }
    graph.add_edge(Edge::new("f1", "f2", "invoke"));
    graph.add_edge(Edge::new("f2", "f3", "invoke"));

    let summary = graph.summarize_schema();
    assert_eq!(summary.node_count(), 1);
    let invoke = summary.find_edges_by_label("invoke");
    assert_eq!(invoke.len(), 1);
    assert_eq!(invoke[0].properties.get("count"), Some(&PropertyValue::Integer(2)));
}

#[test]
fn test_node_kind_helpers() {
    let mut node = Node::new("v", "Variable");
    assert_eq!(node.kind(), None);
    node.set_kind("variable");
    node.set_kind("field");
    assert_eq!(node.kind(), Some("field"));
    assert!(node.has_any_label(&["Operation", "Variable"]));
    assert!(!node.has_any_label(&["Operation", "Script"]));
}

#[test]
fn test_synthesized_edges_carry_provenance() {
    let edge = Edge::synthesized("a", "b", "invoke");
    assert_eq!(edge.properties.get(META_SRC_KEY).and_then(PropertyValue::as_str), Some(META_SRC));
    assert_eq!(edge.key(), ("a", "b", "invoke"));
}
