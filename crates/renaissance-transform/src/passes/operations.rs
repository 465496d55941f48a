//! Pass 2: function definitions/declarations → Operation, macros → Script

use super::{Pass, PassState, Stage, StageContext, StageOutput};
use crate::labels::{input, output};
use crate::naming::{fill_missing, merge_properties, rename_properties};
use renaissance_core::{Edge, Node};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Merges each definition with the declaration it implements into one
/// Operation, wraps leftovers as standalone Operations and macros as Scripts,
/// attaches them to their containing Structure with `hasScript`, and rewrites
/// the call graph into `invoke` edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationCollector;

impl Pass for OperationCollector {
    fn stage(&self) -> Stage {
        Stage::Operations
    }

    fn run(&self, ctx: &StageContext<'_>) -> StageOutput {
        let declarations = unclaimed(ctx, input::FUNCTION_DECLARATION);
        let definitions = unclaimed(ctx, input::FUNCTION_DEFINITION);
        let macros = unclaimed(ctx, input::MACRO_DEFINITION);

        let mut state = PassState::new();
        merge_implementations(ctx, &mut state, &definitions, &declarations);

        for definition in &definitions {
            if !state.is_claimed(ctx, &definition.id) {
                let node = Node::new(format!("funcdef{}", definition.id), output::OPERATION)
                    .with_properties(rename_properties(&definition.properties));
                state.claim(ctx, node, [definition.id.as_str()]);
            }
        }
        for declaration in &declarations {
            if !state.is_claimed(ctx, &declaration.id) {
                let node = Node::new(format!("funcdecl{}", declaration.id), output::OPERATION)
                    .with_properties(rename_properties(&declaration.properties));
                state.claim(ctx, node, [declaration.id.as_str()]);
            }
        }
        for script in &macros {
            if !state.is_claimed(ctx, &script.id) {
                let mut node = Node::new(format!("macro{}", script.id), output::SCRIPT)
                    .with_properties(rename_properties(&script.properties));
                node.set_kind(output::kind::MACRO);
                state.claim(ctx, node, [script.id.as_str()]);
            }
        }

        let members: Vec<&str> = definitions
            .iter()
            .chain(&declarations)
            .chain(&macros)
            .map(|n| n.id.as_str())
            .collect();
        attach_to_structures(ctx, &mut state, &members);
        rewrite_calls(ctx, &mut state);

        tracing::debug!(
            "Operation pass built {} operations/scripts from {} records",
            state.nodes.len(),
            members.len()
        );
        state.into_output()
    }
}

fn unclaimed<'g>(ctx: &StageContext<'g>, label: &str) -> Vec<&'g Node> {
    ctx.original
        .find_nodes_by_label(label)
        .filter(|n| !ctx.mapping.contains(&n.id))
        .collect()
}

/// One Operation per definition and the first unclaimed declaration it
/// implements. Further declarations of the same definition join that
/// Operation and only fill missing keys.
fn merge_implementations(
    ctx: &StageContext<'_>,
    state: &mut PassState,
    definitions: &[&Node],
    declarations: &[&Node],
) {
    let declaration_by_id: HashMap<&str, &Node> =
        declarations.iter().map(|n| (n.id.as_str(), *n)).collect();
    let definition_ids: HashSet<&str> = definitions.iter().map(|n| n.id.as_str()).collect();

    let mut implemented: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in ctx.original.find_edges_by_label(input::IMPLEMENTS) {
        if definition_ids.contains(edge.source.as_str())
            && declaration_by_id.contains_key(edge.target.as_str())
        {
            let targets = implemented.entry(edge.source.as_str()).or_default();
            if !targets.contains(&edge.target.as_str()) {
                targets.push(edge.target.as_str());
            }
        }
    }

    for definition in definitions {
        if state.is_claimed(ctx, &definition.id) {
            continue;
        }
        let Some(targets) = implemented.get(definition.id.as_str()) else {
            continue;
        };
        let pending: Vec<&Node> = targets
            .iter()
            .filter(|id| !state.is_claimed(ctx, id))
            .filter_map(|id| declaration_by_id.get(id).copied())
            .collect();
        let Some((first, rest)) = pending.split_first() else {
            continue;
        };

        let mut properties = merge_properties(&definition.properties, &first.properties);
        for extra in rest {
            fill_missing(&mut properties, &rename_properties(&extra.properties));
        }
        let node = Node::new(format!("function{}_{}", definition.id, first.id), output::OPERATION)
            .with_properties(properties);

        let claimed = [definition.id.as_str()]
            .into_iter()
            .chain(pending.iter().map(|n| n.id.as_str()));
        state.claim(ctx, node, claimed);
    }
}

/// `hasScript` from a containing Structure (mapped by an earlier pass). A
/// contained Operation becomes a method; every other Operation is a function.
fn attach_to_structures(ctx: &StageContext<'_>, state: &mut PassState, members: &[&str]) {
    let mut containers: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in ctx.original.find_edges_by_label(input::CONTAINS) {
        containers
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut methods: HashSet<String> = HashSet::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for old_id in members {
        let Some(new_id) = state.mapping.get(old_id).map(str::to_string) else {
            continue;
        };
        let is_operation = state
            .nodes
            .get(&new_id)
            .is_some_and(|n| n.has_label(output::OPERATION));

        for parent in containers.get(old_id).into_iter().flatten() {
            let Some(structure) = ctx.resolved_node(parent) else {
                continue;
            };
            if !structure.has_label(output::STRUCTURE) {
                continue;
            }
            if seen.insert((structure.id.clone(), new_id.clone())) {
                state.edges.push(Edge::synthesized(
                    structure.id.clone(),
                    new_id.clone(),
                    output::HAS_SCRIPT,
                ));
            }
            if is_operation {
                methods.insert(new_id.clone());
            }
        }
    }

    for node in state.nodes.values_mut() {
        if node.has_label(output::OPERATION) {
            let kind = if methods.contains(&node.id) {
                output::kind::METHOD
            } else {
                output::kind::FUNCTION
            };
            node.set_kind(kind);
        }
    }
}

/// Call edges between two rewritten functions/macros become one `invoke`
/// edge per distinct pair; calls that collapsed into a single Operation are dropped.
fn rewrite_calls(ctx: &StageContext<'_>, state: &mut PassState) {
    let mut pairs: BTreeSet<(String, String)> = BTreeSet::new();
    for edge in ctx.original.find_edges_by_label(input::CALLS) {
        let (Some(caller), Some(callee)) = (state.mapping.get(&edge.source), state.mapping.get(&edge.target))
        else {
            continue;
        };
        if caller != callee {
            pairs.insert((caller.to_string(), callee.to_string()));
        }
    }
    state.edges.extend(
        pairs
            .into_iter()
            .map(|(caller, callee)| Edge::synthesized(caller, callee, output::INVOKE)),
    );
}
