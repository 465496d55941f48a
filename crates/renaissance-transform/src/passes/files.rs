//! Pass 3: files → Structure, file references inverted into ownership edges

use super::{Pass, PassState, Stage, StageContext, StageOutput};
use crate::labels::{input, output};
use crate::naming::parse_path_as_name;
use renaissance_core::{Edge, Node};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const FILE_KINDS: [(&str, &str); 3] = [
    (input::SOURCE_FILE, output::kind::SOURCE_FILE),
    (input::HEADER_FILE, output::kind::HEADER_FILE),
    (input::OTHER_FILE, output::kind::OTHER_FILE),
];

/// Turns source/header/other files into Structures and rewrites
/// `Source` references: files own their variables (`hasVariable`) and
/// operations/scripts (`hasScript`), structures point at their file
/// (`association`), and a source file is associated with the header it
/// implements. File-level `CppUses` edges become `uses`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssociator;

impl Pass for FileAssociator {
    fn stage(&self) -> Stage {
        Stage::Files
    }

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput {
        let mut state = PassState::new();
        for (label, kind) in FILE_KINDS {
            for file in ctx.original.find_nodes_by_label(label) {
                if state.is_claimed(ctx, &file.id) {
                    continue;
                }
                let mut node = Node::new(format!("file{}", file.id), output::STRUCTURE)
                    .with_properties(parse_path_as_name(&file.properties, &file.id));
                node.set_kind(kind);
                state.claim(ctx, node, [file.id.as_str()]);
            }
        }
        let files: HashSet<String> = state.nodes.keys().cloned().collect();

        let mut edges = Vec::new();
        let mut fields = Vec::new();
        let mut referenced: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for edge in ctx.original.find_edges_by_label(input::SOURCE) {
            let (Some(source), Some(target)) =
                (state.resolve(ctx, &edge.source), state.resolve(ctx, &edge.target))
            else {
                continue;
            };
            let (file, entity) = match (files.contains(source), files.contains(target)) {
                (false, true) => (target, source),
                (true, false) => (source, target),
                _ => continue,
            };
            let Some(entity_node) = state.node(ctx, entity) else {
                continue;
            };

            if entity_node.has_label(output::VARIABLE) {
                edges.push(Edge::synthesized(file, entity, output::HAS_VARIABLE));
                fields.push(entity.to_string());
            } else if entity_node.has_any_label(&[output::OPERATION, output::SCRIPT]) {
                edges.push(Edge::synthesized(file, entity, output::HAS_SCRIPT));
            } else if entity_node.has_label(output::STRUCTURE) {
                edges.push(Edge::synthesized(entity, file, output::ASSOCIATION));
                continue;
            } else {
                continue;
            }
            referenced
                .entry(entity.to_string())
                .or_default()
                .insert(file.to_string());
        }

        edges.extend(pair_sources_with_headers(&state, &referenced));

        for edge in ctx.original.find_edges_by_label(input::USES) {
            let (Some(file), Some(target)) =
                (state.resolve(ctx, &edge.source), state.resolve(ctx, &edge.target))
            else {
                continue;
            };
            if files.contains(file) {
                edges.push(Edge::synthesized(file, target, output::USES));
            }
        }

        tracing::debug!(
            "File pass built {} files, {} entities reference a file",
            files.len(),
            referenced.len()
        );
        for variable in fields {
            state.set_kind(&variable, output::kind::FIELD);
        }
        state.edges.extend(edges);
        state.into_output()
    }
}

/// When one variable or operation is referenced by both a source file and a
/// header file, associate the source file with the header.
fn pair_sources_with_headers(
    state: &PassState,
    referenced: &BTreeMap<String, BTreeSet<String>>,
) -> Vec<Edge> {
    let kind_of = |file: &str| state.nodes.get(file).and_then(Node::kind);

    let mut pairs: BTreeSet<(&str, &str)> = BTreeSet::new();
    for files in referenced.values() {
        let of_kind = |kind: &'static str| {
            files
                .iter()
                .map(String::as_str)
                .filter(move |f| kind_of(*f) == Some(kind))
        };
        for source in of_kind(output::kind::SOURCE_FILE) {
            for header in of_kind(output::kind::HEADER_FILE) {
                pairs.insert((source, header));
            }
        }
    }

    pairs
        .into_iter()
        .map(|(source, header)| Edge::synthesized(source, header, output::ASSOCIATION))
        .collect()
}
