//! Pass 5: entity → file → folder motifs

use super::{Pass, PassState, Stage, StageContext, StageOutput};
use crate::labels::{input, output};
use renaissance_core::Edge;
use std::collections::BTreeSet;

/// Resolves `entity -Source-> file -ParentFolder-> folder` paths of the
/// original graph into `contains` edges that no single earlier pass could
/// see: the folder contains the entity, and a file contains the Structure
/// declared in it.
///
/// Runs only when both the file and folder passes ran, since it needs their
/// mappings for every endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureLinker;

impl Pass for StructureLinker {
    fn stage(&self) -> Stage {
        Stage::Linking
    }

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput {
        let mut state = PassState::new();
        let mut links: BTreeSet<(String, String)> = BTreeSet::new();

        let paths = ctx.original.find_two_hop_paths(input::SOURCE, input::PARENT_FOLDER);
        for (source, parent_folder) in &paths {
            let (Some(entity), Some(file), Some(folder)) = (
                ctx.resolved_node(&source.source),
                ctx.resolved_node(&source.target),
                ctx.resolved_node(&parent_folder.target),
            ) else {
                continue;
            };

            if folder.has_label(output::CONTAINER)
                && entity.has_any_label(&[output::CONTAINER, output::STRUCTURE])
                && folder.id != entity.id
            {
                links.insert((folder.id.clone(), entity.id.clone()));
            }

            if file.has_label(output::STRUCTURE)
                && entity.has_label(output::STRUCTURE)
                && file.id != entity.id
            {
                links.insert((file.id.clone(), entity.id.clone()));
                state.add_label(&file.id, output::CONTAINER);
            }
        }

        tracing::debug!(
            "Linker matched {} paths into {} contains edges",
            paths.len(),
            links.len()
        );
        state.edges.extend(
            links
                .into_iter()
                .map(|(parent, child)| Edge::synthesized(parent, child, output::CONTAINS)),
        );
        state.into_output()
    }
}
