//! Integration tests for Renaissance
//!
//! These run the CLI binary end to end on both input formats.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FACTS_GRAPHML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="l" for="node" attr.name="labelV" attr.type="string"/>
  <key id="s" for="node" attr.name="symbol" attr.type="string"/>
  <key id="n" for="node" attr.name="name" attr.type="string"/>
  <key id="e" for="edge" attr.name="labelE" attr.type="string"/>
  <graph edgedefault="directed">
    <node id="dir"><data key="l">Folder</data><data key="n">src</data></node>
    <node id="h"><data key="l">HeaderFile</data><data key="n">src\shape.h</data></node>
    <node id="s"><data key="l">SourceFile</data><data key="n">src\shape.cpp</data></node>
    <node id="shape"><data key="l">CppDeclaration</data><data key="s">Shape</data></node>
    <node id="area"><data key="l">CppDeclaration</data><data key="s">area_</data></node>
    <node id="decl"><data key="l">CppFunctionDeclaration</data><data key="s">area</data></node>
    <node id="def"><data key="l">CppFunctionDefinition</data><data key="s">area</data></node>
    <node id="util"><data key="l">CppFunctionDefinition</data><data key="s">square</data></node>
    <edge source="shape" target="area"><data key="e">CppContains</data></edge>
    <edge source="shape" target="decl"><data key="e">CppContains</data></edge>
    <edge source="def" target="decl"><data key="e">CppImplements</data></edge>
    <edge source="def" target="util"><data key="e">CppCalls</data></edge>
    <edge source="shape" target="h"><data key="e">Source</data></edge>
    <edge source="decl" target="h"><data key="e">Source</data></edge>
    <edge source="def" target="s"><data key="e">Source</data></edge>
    <edge source="h" target="dir"><data key="e">ParentFolder</data></edge>
    <edge source="s" target="dir"><data key="e">ParentFolder</data></edge>
  </graph>
</graphml>
"#;

fn renaissance(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_renaissance"))
        .args(args)
        .output()
        .expect("Failed to execute renaissance")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn node_ids(doc: &serde_json::Value) -> Vec<String> {
    doc["elements"]["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["data"]["id"].as_str().unwrap().to_string())
        .collect()
}

fn edge_triples(doc: &serde_json::Value) -> Vec<(String, String, String)> {
    doc["elements"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            let data = &e["data"];
            (
                data["source"].as_str().unwrap().to_string(),
                data["label"].as_str().unwrap().to_string(),
                data["target"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn has_edge(doc: &serde_json::Value, source: &str, label: &str, target: &str) -> bool {
    edge_triples(doc)
        .iter()
        .any(|(s, l, t)| s == source && l == label && t == target)
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_help() {
    let output = renaissance(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--input"));
    assert!(stdout.contains("--no-folders"));
}

#[test]
fn test_graphml_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("facts.graphml");
    let output = dir.path().join("arch.json");
    let ontology = dir.path().join("ontology.json");
    let dot = dir.path().join("arch.dot");
    fs::write(&input, FACTS_GRAPHML).unwrap();

    let run = renaissance(&[
        "-i",
        path_arg(&input),
        "-o",
        path_arg(&output),
        "-t",
        path_arg(&ontology),
        "--dot",
        path_arg(&dot),
    ]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let doc = read_json(&output);
    let ids = node_ids(&doc);
    for id in ["classshape", "variablearea", "functiondef_decl", "funcdefutil", "fileh", "files", "folderdir"] {
        assert!(ids.contains(&id.to_string()), "missing {id} in {ids:?}");
    }
    for node in doc["elements"]["nodes"].as_array().unwrap() {
        assert_eq!(node["data"]["properties"]["metaSrc"], "renaissance");
    }

    assert!(has_edge(&doc, "classshape", "hasVariable", "variablearea"));
    assert!(has_edge(&doc, "classshape", "hasScript", "functiondef_decl"));
    assert!(has_edge(&doc, "functiondef_decl", "invoke", "funcdefutil"));
    assert!(has_edge(&doc, "files", "association", "fileh"));
    assert!(has_edge(&doc, "folderdir", "contains", "fileh"));
    assert!(has_edge(&doc, "folderdir", "contains", "classshape"));
    assert!(has_edge(&doc, "fileh", "contains", "classshape"));

    let header = doc["elements"]["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["data"]["id"] == "fileh")
        .unwrap();
    assert_eq!(header["data"]["properties"]["simpleName"], "shape.h");
    assert_eq!(header["data"]["properties"]["kind"], "header file");

    let schema = read_json(&ontology);
    assert!(node_ids(&schema).contains(&"Container:Structure".to_string()));

    let dot = fs::read_to_string(&dot).unwrap();
    assert!(dot.starts_with("digraph"));
}

#[test]
fn test_json_input_with_disabled_stages() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("facts.json");
    let output = dir.path().join("arch.json");
    let doc = serde_json::json!({
        "elements": {
            "nodes": [
                {"data": {"id": "f", "labels": ["Folder"], "properties": {"name": "lib"}}},
                {"data": {"id": "c", "labels": ["SourceFile"], "properties": {"name": "lib/a.cpp"}}},
                {"data": {"id": "fn", "labels": ["CppFunctionDefinition"], "properties": {"symbol": "go"}}}
            ],
            "edges": [
                {"data": {"source": "c", "target": "f", "label": "ParentFolder", "properties": {}}},
                {"data": {"source": "fn", "target": "c", "label": "Source", "properties": {}}}
            ]
        }
    });
    fs::write(&input, serde_json::to_string(&doc).unwrap()).unwrap();

    let run = renaissance(&["-i", path_arg(&input), "-o", path_arg(&output), "--no-ops", "--no-files"]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let result = read_json(&output);
    let ids = node_ids(&result);
    assert!(ids.contains(&"folderf".to_string()));
    assert!(ids.contains(&"autoc".to_string()));
    assert!(!ids.iter().any(|id| id.starts_with("funcdef")));
    assert_eq!(edge_triples(&result), vec![("folderf".into(), "contains".into(), "autoc".into())]);
}

#[test]
fn test_config_file_and_flags() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("facts.graphml");
    let output = dir.path().join("arch.json");
    let config = dir.path().join("renaissance.toml");
    fs::write(&input, FACTS_GRAPHML).unwrap();
    fs::write(&config, "[pipeline]\nfolders = false\n").unwrap();

    let run = renaissance(&["-i", path_arg(&input), "-o", path_arg(&output), "--config", path_arg(&config)]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let doc = read_json(&output);
    assert!(!node_ids(&doc).contains(&"folderdir".to_string()));
    assert!(!edge_triples(&doc).iter().any(|(_, label, _)| label == "contains"));
}

#[test]
fn test_unsupported_extension_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("facts.csv");
    let output = dir.path().join("arch.json");
    fs::write(&input, "id,label\n").unwrap();

    let run = renaissance(&["-i", path_arg(&input), "-o", path_arg(&output)]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("unsupported input format"));
    assert!(!output.exists());
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("facts.graphml");
    let output = dir.path().join("arch.json");
    fs::write(&input, "<graphml><graph><node id=\"a\"></graph>").unwrap();

    let run = renaissance(&["-i", path_arg(&input), "-o", path_arg(&output)]);
    assert!(!run.status.success());
    assert!(!output.exists());
}
