//! Pass 1: declarations → Structure / Variable

use super::{Pass, PassState, Stage, StageContext, StageOutput};
use crate::labels::{input, output};
use crate::merger::{EntityClass, EntityMerger};
use renaissance_core::{Edge, Node};
use std::collections::HashSet;

/// Merges declaration records into entities, classifies each as a Structure
/// (it nests something or takes part in inheritance) or a Variable, and
/// derives `hasVariable`, `contains` and `specializes` edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureCollector {
    merge_aliases: bool,
}

impl StructureCollector {
    pub fn new(merge_aliases: bool) -> Self {
        StructureCollector { merge_aliases }
    }
}

impl Pass for StructureCollector {
    fn stage(&self) -> Stage {
        Stage::Structures
    }

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput {
        let original = ctx.original;
        let mut state = PassState::new();

        let records: Vec<&Node> = original
            .find_nodes_by_label(input::DECLARATION)
            .chain(original.find_nodes_by_label(input::FORWARD_DECLARATION))
            .filter(|n| !ctx.mapping.contains(&n.id))
            .collect();
        let mut merger = EntityMerger::from_nodes(records.iter().copied());

        if self.merge_aliases {
            let merged = original
                .find_edges_by_label(input::ALIAS)
                .iter()
                .filter(|alias| merger.union(&alias.source, &alias.target))
                .count();
            tracing::debug!("Merged {} alias pairs", merged);
        }

        let nesting: HashSet<&str> = original
            .find_edges_by_label(input::CONTAINS)
            .iter()
            .map(|e| e.source.as_str())
            .collect();
        let inheriting: HashSet<&str> = original
            .find_edges_by_label(input::INHERITS)
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        for group in merger.groups() {
            let structural = group
                .members
                .iter()
                .any(|m| nesting.contains(m.as_str()) || inheriting.contains(m.as_str()));
            let class = if structural {
                EntityClass::Structure
            } else {
                EntityClass::Variable
            };
            let node = group.to_node(class);
            state.claim(ctx, node, group.members.iter().map(String::as_str));
        }

        collect_nesting(ctx, &mut state);
        collect_specializations(ctx, &mut state);

        tracing::debug!(
            "Structure pass claimed {} declarations into {} entities",
            state.mapping.len(),
            state.nodes.len()
        );
        state.into_output()
    }
}

/// Old contains edges from a Structure: Variable children become fields,
/// Structure children make the parent a Container.
fn collect_nesting(ctx: &StageContext<'_>, state: &mut PassState) {
    for edge in ctx.original.find_edges_by_label(input::CONTAINS) {
        let (Some(parent), Some(child)) = (
            state.mapping.get(&edge.source).map(str::to_string),
            state.mapping.get(&edge.target).map(str::to_string),
        ) else {
            continue;
        };
        if parent == child {
            continue;
        }
        let parent_is_structure = state
            .nodes
            .get(&parent)
            .is_some_and(|n| n.has_label(output::STRUCTURE));
        if !parent_is_structure {
            continue;
        }
        let Some(child_node) = state.nodes.get_mut(&child) else {
            continue;
        };

        if child_node.has_label(output::VARIABLE) {
            child_node.set_kind(output::kind::FIELD);
            state.edges.push(Edge::synthesized(parent, child, output::HAS_VARIABLE));
        } else if child_node.has_label(output::STRUCTURE) {
            state.add_label(&parent, output::CONTAINER);
            state.edges.push(Edge::synthesized(parent, child, output::CONTAINS));
        }
    }
}

/// Old inheritance edges between two Structures become `specializes`.
fn collect_specializations(ctx: &StageContext<'_>, state: &mut PassState) {
    let mut specializations = Vec::new();
    for edge in ctx.original.find_edges_by_label(input::INHERITS) {
        let (Some(source), Some(target)) = (
            state.resolved_node(ctx, &edge.source),
            state.resolved_node(ctx, &edge.target),
        ) else {
            continue;
        };
        if source.has_label(output::STRUCTURE) && target.has_label(output::STRUCTURE) {
            specializations.push(Edge::synthesized(
                source.id.clone(),
                target.id.clone(),
                output::SPECIALIZES,
            ));
        }
    }
    state.edges.extend(specializations);
}
