//! Union-find grouping of raw declaration records into canonical entities

use crate::labels::output;
use crate::naming::{fill_missing, rename_properties};
use renaissance_core::{Node, Properties};
use std::collections::HashMap;

/// Union-find over a dense index space of raw node ids. Each representative
/// carries the merged properties of its group.
#[derive(Debug, Clone, Default)]
pub struct EntityMerger {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    parent: Vec<usize>,
    properties: Vec<Properties>,
}

/// How a finalized group is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityClass {
    Structure,
    Variable,
}

impl EntityClass {
    pub fn label(self) -> &'static str {
        match self {
            EntityClass::Structure => output::STRUCTURE,
            EntityClass::Variable => output::VARIABLE,
        }
    }

    pub fn initial_kind(self) -> &'static str {
        match self {
            EntityClass::Structure => output::kind::CLASS,
            EntityClass::Variable => output::kind::VARIABLE,
        }
    }

    /// New node id for a group with this representative.
    pub fn node_id(self, representative: &str) -> String {
        match self {
            EntityClass::Structure => format!("class{representative}"),
            EntityClass::Variable => format!("variable{representative}"),
        }
    }
}

/// A finalized group: its representative, all member ids, merged properties.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedGroup {
    pub representative: String,
    pub members: Vec<String>,
    pub properties: Properties,
}

impl MergedGroup {
    /// Build the canonical node for this group.
    pub fn to_node(&self, class: EntityClass) -> Node {
        let mut node = Node::new(class.node_id(&self.representative), class.label())
            .with_properties(rename_properties(&self.properties));
        node.set_kind(class.initial_kind());
        node
    }
}

impl EntityMerger {
    pub fn new() -> Self {
        EntityMerger::default()
    }

    /// Register a raw record. Re-adding a known id is a no-op.
    pub fn add(&mut self, id: &str, properties: &Properties) {
        if self.index.contains_key(id) {
            return;
        }
        let slot = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), slot);
        self.parent.push(slot);
        self.properties.push(properties.clone());
    }

    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut merger = EntityMerger::new();
        for node in nodes {
            merger.add(&node.id, &node.properties);
        }
        merger
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn root(&mut self, mut slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[slot] != root {
            let next = self.parent[slot];
            self.parent[slot] = root;
            slot = next;
        }
        root
    }

    /// Representative id of the group containing `id`.
    pub fn find(&mut self, id: &str) -> Option<&str> {
        let slot = *self.index.get(id)?;
        let root = self.root(slot);
        Some(&self.ids[root])
    }

    /// Merge the group of `other` into the group of `main`. `main`'s
    /// representative stays representative and keeps its properties; only keys
    /// it lacks are copied from the absorbed group.
    ///
    /// Returns false if either id is unknown or both are already grouped.
    pub fn union(&mut self, main: &str, other: &str) -> bool {
        let (Some(&main_slot), Some(&other_slot)) = (self.index.get(main), self.index.get(other))
        else {
            return false;
        };
        let main_root = self.root(main_slot);
        let other_root = self.root(other_slot);
        if main_root == other_root {
            return false;
        }

        self.parent[other_root] = main_root;
        let absorbed = std::mem::take(&mut self.properties[other_root]);
        fill_missing(&mut self.properties[main_root], &absorbed);
        true
    }

    /// Finalize into groups, ordered by the first registration of any member.
    pub fn groups(mut self) -> Vec<MergedGroup> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<MergedGroup> = Vec::new();

        for slot in 0..self.ids.len() {
            let root = self.root(slot);
            let position = *by_root.entry(root).or_insert_with(|| {
                groups.push(MergedGroup {
                    representative: self.ids[root].clone(),
                    members: Vec::new(),
                    properties: std::mem::take(&mut self.properties[root]),
                });
                groups.len() - 1
            });
            groups[position].members.push(self.ids[slot].clone());
        }
        groups
    }
}
