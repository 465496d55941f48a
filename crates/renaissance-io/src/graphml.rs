//! GraphML reader for extractor output

use crate::error::LoadError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use renaissance_core::{Edge, Node, Properties, PropertyGraph, PropertyValue};
use std::collections::HashMap;

/// Node attribute holding the node's label.
pub const NODE_LABEL_KEY: &str = "labelV";
/// Edge attribute holding the edge's label.
pub const EDGE_LABEL_KEY: &str = "labelE";
pub const UNKNOWN_NODE: &str = "UnknownNode";
pub const UNKNOWN_EDGE: &str = "UnknownEdge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyType {
    Boolean,
    Integer,
    Float,
    String,
}

impl KeyType {
    fn from_attr(value: &str) -> Self {
        match value {
            "boolean" => KeyType::Boolean,
            "int" | "long" => KeyType::Integer,
            "float" | "double" => KeyType::Float,
            _ => KeyType::String,
        }
    }

    /// Typed value for `raw`. Text that does not parse as the declared type
    /// is kept as a string.
    fn parse(self, raw: &str) -> PropertyValue {
        let trimmed = raw.trim();
        let typed = match self {
            KeyType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(PropertyValue::Bool(true)),
                "false" | "0" => Some(PropertyValue::Bool(false)),
                _ => None,
            },
            KeyType::Integer => match trimmed.parse() {
                Ok(int) => Some(PropertyValue::Integer(int)),
                Err(_) => trimmed.parse().ok().map(PropertyValue::Unsigned),
            },
            // NaN and infinities have no interchange form
            KeyType::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(PropertyValue::Float),
            KeyType::String => None,
        };
        typed.unwrap_or_else(|| PropertyValue::String(raw.to_string()))
    }
}

/// Which elements a `<key>` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Node,
    Edge,
    All,
    Other,
}

impl Domain {
    fn from_attr(value: &str) -> Self {
        match value {
            "node" => Domain::Node,
            "edge" => Domain::Edge,
            "all" => Domain::All,
            _ => Domain::Other,
        }
    }

    fn covers(self, element: Domain) -> bool {
        self == element || self == Domain::All
    }
}

#[derive(Debug, Clone)]
struct KeyDef {
    name: String,
    ty: KeyType,
    domain: Domain,
    default: Option<String>,
}

/// The element whose `<data>` children are being read.
#[derive(Debug)]
enum Open {
    Node {
        id: String,
        attrs: Properties,
    },
    Edge {
        source: String,
        target: String,
        attrs: Properties,
    },
}

/// Streaming GraphML parser. Nodes are kept in document order; a repeated
/// node id merges its attributes into the first occurrence.
#[derive(Debug, Default)]
struct GraphmlParser {
    keys: HashMap<String, KeyDef>,
    nodes: Vec<(String, Properties)>,
    node_index: HashMap<String, usize>,
    edges: Vec<(String, String, Properties)>,
    open: Option<Open>,
    /// `<key>` whose `<default>` is being read.
    key: Option<String>,
    /// `<data key=..>` being read.
    data: Option<String>,
    text: String,
    /// Elements opened and not yet closed.
    depth: usize,
    seen_root: bool,
}

impl GraphmlParser {
    fn start(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<(), LoadError> {
        if !empty {
            self.depth += 1;
        }
        match element.name().as_ref() {
            b"graphml" => self.seen_root = true,
            b"key" => {
                let attrs = attributes(element)?;
                let id = required(&attrs, "id", "key")?;
                let def = KeyDef {
                    name: attrs.get("attr.name").cloned().unwrap_or_else(|| id.clone()),
                    ty: KeyType::from_attr(attrs.get("attr.type").map_or("string", String::as_str)),
                    domain: Domain::from_attr(attrs.get("for").map_or("all", String::as_str)),
                    default: None,
                };
                if !empty {
                    self.key = Some(id.clone());
                }
                self.keys.insert(id, def);
            }
            b"default" => self.text.clear(),
            b"node" => {
                let attrs = attributes(element)?;
                let open = Open::Node {
                    id: required(&attrs, "id", "node")?,
                    attrs: Properties::new(),
                };
                self.open(open, empty);
            }
            b"edge" => {
                let attrs = attributes(element)?;
                let open = Open::Edge {
                    source: required(&attrs, "source", "edge")?,
                    target: required(&attrs, "target", "edge")?,
                    attrs: Properties::new(),
                };
                self.open(open, empty);
            }
            b"data" => {
                let attrs = attributes(element)?;
                self.data = Some(required(&attrs, "key", "data")?);
                self.text.clear();
                if empty {
                    self.end_data();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, open: Open, empty: bool) {
        self.open = Some(open);
        if empty {
            self.close();
        }
    }

    fn end(&mut self, name: &[u8]) {
        self.depth = self.depth.saturating_sub(1);
        match name {
            b"key" => self.key = None,
            b"default" => {
                if let Some(def) = self.key.as_ref().and_then(|id| self.keys.get_mut(id)) {
                    def.default = Some(std::mem::take(&mut self.text));
                }
            }
            b"data" => self.end_data(),
            b"node" | b"edge" => self.close(),
            _ => {}
        }
    }

    fn end_data(&mut self) {
        let Some(key) = self.data.take() else {
            return;
        };
        let raw = std::mem::take(&mut self.text);
        let (name, value) = match self.keys.get(&key) {
            Some(def) => (def.name.clone(), def.ty.parse(&raw)),
            None => (key, PropertyValue::String(raw)),
        };
        match &mut self.open {
            Some(Open::Node { attrs, .. } | Open::Edge { attrs, .. }) => {
                attrs.insert(name, value);
            }
            None => tracing::debug!("Ignoring graph-level data `{}`", name),
        }
    }

    fn close(&mut self) {
        match self.open.take() {
            Some(Open::Node { id, mut attrs }) => {
                self.apply_defaults(Domain::Node, &mut attrs);
                self.add_node(id, attrs);
            }
            Some(Open::Edge {
                source,
                target,
                mut attrs,
            }) => {
                self.apply_defaults(Domain::Edge, &mut attrs);
                self.edges.push((source, target, attrs));
            }
            None => {}
        }
    }

    fn apply_defaults(&self, element: Domain, attrs: &mut Properties) {
        for def in self.keys.values() {
            if let Some(default) = &def.default {
                if def.domain.covers(element) && !attrs.contains_key(&def.name) {
                    attrs.insert(def.name.clone(), def.ty.parse(default));
                }
            }
        }
    }

    fn add_node(&mut self, id: String, attrs: Properties) {
        match self.node_index.get(&id) {
            Some(&slot) => self.nodes[slot].1.extend(attrs),
            None => {
                self.node_index.insert(id.clone(), self.nodes.len());
                self.nodes.push((id, attrs));
            }
        }
    }

    /// Build the property graph. Edge endpoints that were never declared
    /// become bare `UnknownNode` nodes.
    fn finish(mut self) -> Result<PropertyGraph, LoadError> {
        if !self.seen_root || self.depth != 0 || self.open.is_some() {
            return Err(LoadError::Graphml("unexpected end of document".to_string()));
        }
        let endpoints: Vec<String> = self
            .edges
            .iter()
            .flat_map(|(source, target, _)| [source.clone(), target.clone()])
            .collect();
        for id in endpoints {
            if !self.node_index.contains_key(&id) {
                tracing::debug!("Edge endpoint `{}` has no <node> element", id);
                self.add_node(id, Properties::new());
            }
        }

        let mut graph = PropertyGraph::new();
        for (id, mut attrs) in self.nodes {
            let label = take_label(&mut attrs, NODE_LABEL_KEY, UNKNOWN_NODE);
            graph.insert_node(Node::new(id, label).with_properties(attrs))?;
        }
        for (source, target, mut attrs) in self.edges {
            let label = take_label(&mut attrs, EDGE_LABEL_KEY, UNKNOWN_EDGE);
            graph.add_edge(Edge::new(source, target, label).with_properties(attrs));
        }
        Ok(graph)
    }
}

/// Parse a GraphML document into a property graph.
pub fn parse_graphml(xml: &str) -> Result<PropertyGraph, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut parser = GraphmlParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => parser.start(&e, false)?,
            Event::Empty(e) => parser.start(&e, true)?,
            Event::Text(t) => parser.text.push_str(&t.unescape()?),
            Event::CData(c) => parser.text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(e) => parser.end(e.name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
    }

    let graph = parser.finish()?;
    tracing::debug!(
        "Parsed GraphML: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>, LoadError> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attrs.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(attrs)
}

fn required(
    attrs: &HashMap<String, String>,
    name: &str,
    element: &str,
) -> Result<String, LoadError> {
    attrs
        .get(name)
        .cloned()
        .ok_or_else(|| LoadError::Graphml(format!("<{element}> without `{name}` attribute")))
}

fn take_label(attrs: &mut Properties, key: &str, fallback: &str) -> String {
    match attrs.remove(key) {
        Some(PropertyValue::String(label)) if !label.is_empty() => label,
        Some(
            other @ (PropertyValue::Integer(_)
            | PropertyValue::Unsigned(_)
            | PropertyValue::Float(_)
            | PropertyValue::Bool(_)),
        ) => {
            other.to_string()
        }
        _ => fallback.to_string(),
    }
}
