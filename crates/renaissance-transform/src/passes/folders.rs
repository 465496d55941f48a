//! Pass 4: folders → Container, `ParentFolder` inverted into `contains`

use super::{Pass, PassState, Stage, StageContext, StageOutput};
use crate::labels::{input, output};
use crate::naming::{humanize_label, parse_path_as_name};
use renaissance_core::{Edge, Node};

/// Converts every folder into a Container and turns each `child → folder`
/// edge into `contains(folder, child)`.
///
/// Endpoints no earlier pass handled are promoted to a generic Structure
/// whose kind is the humanized form of their first label.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderInverter;

impl Pass for FolderInverter {
    fn stage(&self) -> Stage {
        Stage::Folders
    }

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput {
        let mut state = PassState::new();
        for folder in ctx.original.find_nodes_by_label(input::FOLDER) {
            if !state.is_claimed(ctx, &folder.id) {
                state.claim(ctx, folder_node(folder), [folder.id.as_str()]);
            }
        }
        let folders = state.nodes.len();

        let mut promoted = 0;
        let mut edges = Vec::new();
        for edge in ctx.original.find_edges_by_label(input::PARENT_FOLDER) {
            let (Some(child), Some(parent)) =
                (ctx.original.node(&edge.source), ctx.original.node(&edge.target))
            else {
                continue;
            };
            for endpoint in [child, parent] {
                if !state.is_claimed(ctx, &endpoint.id) {
                    state.claim(ctx, auto_promote(endpoint), [endpoint.id.as_str()]);
                    promoted += 1;
                }
            }

            let (Some(child), Some(parent)) = (
                state.resolve(ctx, &child.id).map(str::to_string),
                state.resolve(ctx, &parent.id).map(str::to_string),
            ) else {
                continue;
            };
            if child == parent {
                continue;
            }
            state.add_label(&parent, output::CONTAINER);
            edges.push(Edge::synthesized(parent, child, output::CONTAINS));
        }

        tracing::debug!(
            "Folder pass built {} containers, auto-promoted {} nodes",
            folders,
            promoted
        );
        state.edges.extend(edges);
        state.into_output()
    }
}

fn folder_node(folder: &Node) -> Node {
    let mut node = Node::new(format!("folder{}", folder.id), output::CONTAINER)
        .with_properties(parse_path_as_name(&folder.properties, &folder.id));
    node.set_kind(output::kind::FOLDER);
    node
}

fn auto_promote(original: &Node) -> Node {
    let kind = original
        .labels
        .iter()
        .next()
        .map(|label| humanize_label(label))
        .unwrap_or_default();
    let mut node = Node::new(format!("auto{}", original.id), output::STRUCTURE)
        .with_properties(parse_path_as_name(&original.properties, &original.id));
    node.set_kind(kind);
    node
}
