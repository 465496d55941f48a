//! Core data structures for the property graph

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Provenance marker stamped on every node and edge this tool synthesizes.
pub const META_SRC: &str = "renaissance";

/// Property key holding the provenance marker.
pub const META_SRC_KEY: &str = "metaSrc";

/// Property key holding the subtype discriminator within a label.
pub const KIND_KEY: &str = "kind";

/// Ordered property bag shared by nodes and edges.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Set of category tags carried by a node.
pub type LabelSet = BTreeSet<String>;

/// A heterogeneous property value.
///
/// Serialized untagged so the interchange format stays plain JSON. Integers are
/// tried before floats so `1` survives a round trip as an integer; `Unsigned`
/// only holds values above `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Borrow the value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            PropertyValue::Unsigned(u) => write!(f, "{u}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            PropertyValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<u64> for PropertyValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => PropertyValue::Integer(i),
            Err(_) => PropertyValue::Unsigned(u),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        PropertyValue::Float(x)
    }
}

/// A node in the property graph.
///
/// Labels are capability tags tested by membership, so a node may be both a
/// `Structure` and a `Container`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub labels: LabelSet,
    pub properties: Properties,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut labels = LabelSet::new();
        labels.insert(label.into());
        Node {
            id: id.into(),
            labels,
            properties: Properties::new(),
        }
    }

    pub fn with_labels<I, S>(id: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node {
            id: id.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// True if the node carries at least one of `labels`.
    pub fn has_any_label(&self, labels: &[&str]) -> bool {
        labels.iter().any(|l| self.labels.contains(*l))
    }

    pub fn add_label(&mut self, label: impl Into<String>) {
        self.labels.insert(label.into());
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn kind(&self) -> Option<&str> {
        self.property(KIND_KEY).and_then(PropertyValue::as_str)
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.properties
            .insert(KIND_KEY.to_string(), PropertyValue::String(kind.into()));
    }
}

/// A directed, labeled edge. Endpoints are node ids and may dangle until the
/// owning graph is cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub properties: Properties,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    /// An edge produced by the rewriting passes, stamped with the provenance marker.
    pub fn synthesized(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Edge::new(source, target, label).with_property(META_SRC_KEY, META_SRC)
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The (source, target, label) triple that identifies duplicates.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.label)
    }
}
