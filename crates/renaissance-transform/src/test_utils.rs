//! Fact-graph fixtures for the pass tests

use crate::labels::input;
use renaissance_core::{Edge, Node, PropertyGraph};

/// Builder for extractor-shaped graphs.
#[derive(Default)]
pub struct FactGraph {
    graph: PropertyGraph,
}

impl FactGraph {
    pub fn new() -> Self {
        FactGraph::default()
    }

    /// A declaration-like record with `symbol` and `name`.
    pub fn symbol(mut self, id: &str, label: &str, symbol: &str) -> Self {
        let node = Node::new(id, label)
            .with_property("symbol", symbol)
            .with_property("name", format!("app::{symbol}"));
        self.graph.insert_node(node).unwrap();
        self
    }

    /// A file or folder record whose `name` is a path.
    pub fn path(mut self, id: &str, label: &str, path: &str) -> Self {
        self.graph
            .insert_node(Node::new(id, label).with_property("name", path))
            .unwrap();
        self
    }

    pub fn bare(mut self, id: &str, label: &str) -> Self {
        self.graph.insert_node(Node::new(id, label)).unwrap();
        self
    }

    pub fn edge(mut self, source: &str, target: &str, label: &str) -> Self {
        self.graph.add_edge(Edge::new(source, target, label));
        self
    }

    pub fn build(self) -> PropertyGraph {
        self.graph
    }
}

/// A small C++ project:
///
/// ```text
/// .                 (root)
/// ├── README.md     (readme)
/// └── src           (src)
///     ├── widget.h  (hdr)   class Widget : Base { int count_; struct Inner { int depth; }; void draw(); }
///     └── widget.cpp (cpp)  void Widget::draw() { helper(); }  void helper() { LOG(); }  int g_total;
/// ```
///
/// plus a build target record with no handled label, nested in the root.
pub fn sample_project() -> PropertyGraph {
    FactGraph::new()
        .path("root", input::FOLDER, ".")
        .path("src", input::FOLDER, "./src")
        .path("hdr", input::HEADER_FILE, "./src/widget.h")
        .path("cpp", input::SOURCE_FILE, "./src/widget.cpp")
        .path("readme", input::OTHER_FILE, "./README.md")
        .bare("target", "BuildTarget")
        .symbol("widget", input::DECLARATION, "Widget")
        .symbol("base", input::FORWARD_DECLARATION, "Base")
        .symbol("count", input::DECLARATION, "count_")
        .symbol("inner", input::DECLARATION, "Inner")
        .symbol("depth", input::DECLARATION, "depth")
        .symbol("total", input::DECLARATION, "g_total")
        .symbol("draw_decl", input::FUNCTION_DECLARATION, "draw")
        .symbol("draw_def", input::FUNCTION_DEFINITION, "draw")
        .symbol("helper", input::FUNCTION_DEFINITION, "helper")
        .symbol("log", input::MACRO_DEFINITION, "LOG")
        // declarations
        .edge("widget", "base", input::INHERITS)
        .edge("widget", "count", input::CONTAINS)
        .edge("widget", "inner", input::CONTAINS)
        .edge("inner", "depth", input::CONTAINS)
        .edge("widget", "draw_decl", input::CONTAINS)
        .edge("draw_def", "draw_decl", input::IMPLEMENTS)
        // calls
        .edge("draw_def", "helper", input::CALLS)
        .edge("draw_def", "draw_def", input::CALLS)
        .edge("draw_decl", "draw_def", input::CALLS)
        .edge("helper", "log", input::CALLS)
        // file references, both orientations
        .edge("widget", "hdr", input::SOURCE)
        .edge("draw_decl", "hdr", input::SOURCE)
        .edge("cpp", "draw_def", input::SOURCE)
        .edge("helper", "cpp", input::SOURCE)
        .edge("total", "cpp", input::SOURCE)
        .edge("cpp", "hdr", input::USES)
        // folders
        .edge("src", "root", input::PARENT_FOLDER)
        .edge("hdr", "src", input::PARENT_FOLDER)
        .edge("cpp", "src", input::PARENT_FOLDER)
        .edge("readme", "root", input::PARENT_FOLDER)
        .edge("target", "root", input::PARENT_FOLDER)
        .build()
}
