//! The five rewriting passes and the contract they share

pub mod files;
pub mod folders;
pub mod linker;
pub mod operations;
pub mod structures;

use crate::config::PipelineConfig;
use crate::mapping::IdMapping;
use renaissance_core::{Edge, Node, PropertyGraph};
use std::collections::BTreeMap;
use std::fmt;

pub use files::FileAssociator;
pub use folders::FolderInverter;
pub use linker::StructureLinker;
pub use operations::OperationCollector;
pub use structures::StructureCollector;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Structures,
    Operations,
    Files,
    Folders,
    Linking,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Structures => "structures & variables",
            Stage::Operations => "operations & macros",
            Stage::Files => "files & associations",
            Stage::Folders => "folder inversion",
            Stage::Linking => "source/folder linking",
        };
        f.write_str(name)
    }
}

/// Read-only view a pass runs against.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// The extractor's fact graph. No pass mutates it.
    pub original: &'a PropertyGraph,
    /// Mapping accumulated by the earlier passes.
    pub mapping: &'a IdMapping,
    /// Nodes and edges assembled from the earlier passes.
    pub produced: &'a PropertyGraph,
}

impl<'a> StageContext<'a> {
    /// Earlier-pass node an original id was rewritten to.
    pub fn resolved_node(&self, old_id: &str) -> Option<&'a Node> {
        self.mapping.get(old_id).and_then(|new_id| self.produced.node(new_id))
    }
}

/// What a pass contributes. The pipeline absorbs it before running the next pass.
#[derive(Debug, Clone, Default)]
pub struct StageOutput {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Old ids this pass claimed.
    pub mapping: IdMapping,
    /// Changes to nodes produced by earlier passes.
    pub promotions: Vec<Promotion>,
}

/// An in-place change to a node an earlier pass produced, applied at assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    Label { id: String, label: String },
    Kind { id: String, kind: String },
}

/// A rewriting pass.
pub trait Pass {
    fn stage(&self) -> Stage;

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput;
}

/// The passes enabled by `config`, in execution order.
pub fn passes_for(config: &PipelineConfig) -> Vec<Box<dyn Pass>> {
    let mut passes: Vec<Box<dyn Pass>> = vec![Box::new(StructureCollector::new(config.merge_aliases))];
    if config.operations {
        passes.push(Box::new(OperationCollector));
    }
    if config.files {
        passes.push(Box::new(FileAssociator));
    }
    if config.folders {
        passes.push(Box::new(FolderInverter));
    }
    if config.link_structures() {
        passes.push(Box::new(StructureLinker));
    }
    passes
}

/// Nodes a pass is building, plus the old ids it has claimed so far.
///
/// Lookups consult the earlier passes first, so an id an earlier pass mapped
/// is never claimed again.
#[derive(Debug, Default)]
pub(crate) struct PassState {
    pub nodes: BTreeMap<String, Node>,
    pub mapping: IdMapping,
    pub edges: Vec<Edge>,
    pub promotions: Vec<Promotion>,
}

impl PassState {
    pub fn new() -> Self {
        PassState::default()
    }

    /// Current new id for `old_id`, earlier passes first.
    pub fn resolve<'s>(&'s self, ctx: &StageContext<'s>, old_id: &str) -> Option<&'s str> {
        ctx.mapping.get(old_id).or_else(|| self.mapping.get(old_id))
    }

    /// Node an id resolves to, whether built by this pass or an earlier one.
    pub fn resolved_node<'s>(&'s self, ctx: &StageContext<'s>, old_id: &str) -> Option<&'s Node> {
        let new_id = self.resolve(ctx, old_id)?;
        self.node(ctx, new_id)
    }

    /// Node by new id, whether built by this pass or an earlier one.
    pub fn node<'s>(&'s self, ctx: &StageContext<'s>, new_id: &str) -> Option<&'s Node> {
        self.nodes.get(new_id).or_else(|| ctx.produced.node(new_id))
    }

    pub fn is_claimed(&self, ctx: &StageContext<'_>, old_id: &str) -> bool {
        ctx.mapping.contains(old_id) || self.mapping.contains(old_id)
    }

    /// Add a node and claim `old_ids` for it. Ids already claimed keep their
    /// earlier mapping.
    ///
    /// A new id that is already taken, by this pass or an earlier one, gets the
    /// first free `~2`, `~3`, ... suffix so distinct entities never merge.
    pub fn claim<'i>(
        &mut self,
        ctx: &StageContext<'_>,
        mut node: Node,
        old_ids: impl IntoIterator<Item = &'i str>,
    ) {
        if self.is_taken(ctx, &node.id) {
            let base = std::mem::take(&mut node.id);
            node.id = (2..)
                .map(|n| format!("{base}~{n}"))
                .find(|candidate| !self.is_taken(ctx, candidate))
                .unwrap_or_else(|| base.clone());
            tracing::debug!("Id `{}` is taken, using `{}`", base, node.id);
        }
        for old_id in old_ids {
            self.mapping.insert(old_id, node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    fn is_taken(&self, ctx: &StageContext<'_>, new_id: &str) -> bool {
        self.nodes.contains_key(new_id) || ctx.produced.contains_node(new_id)
    }

    /// Add `label` to a node, locally if this pass built it, otherwise as a
    /// promotion applied at assembly.
    pub fn add_label(&mut self, new_id: &str, label: &str) {
        match self.nodes.get_mut(new_id) {
            Some(node) => node.add_label(label),
            None => self.promote(Promotion::Label {
                id: new_id.to_string(),
                label: label.to_string(),
            }),
        }
    }

    /// Set `kind` on a node, the same way [`add_label`](Self::add_label) does.
    pub fn set_kind(&mut self, new_id: &str, kind: &str) {
        match self.nodes.get_mut(new_id) {
            Some(node) => node.set_kind(kind),
            None => self.promote(Promotion::Kind {
                id: new_id.to_string(),
                kind: kind.to_string(),
            }),
        }
    }

    fn promote(&mut self, promotion: Promotion) {
        if !self.promotions.contains(&promotion) {
            self.promotions.push(promotion);
        }
    }

    pub fn into_output(self) -> StageOutput {
        StageOutput {
            nodes: self.nodes.into_values().collect(),
            edges: self.edges,
            mapping: self.mapping,
            promotions: self.promotions,
        }
    }
}
