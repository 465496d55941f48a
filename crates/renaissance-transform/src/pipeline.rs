//! Runs the passes in order and assembles the architecture graph

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::mapping::IdMapping;
use crate::passes::{Pass, Promotion, Stage, StageContext, StageOutput, passes_for};
use renaissance_core::{CleanupStats, GraphError, PropertyGraph};

/// Node and edge counts a stage contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub graph: PropertyGraph,
    pub mapping: IdMapping,
    pub stages: Vec<StageReport>,
    pub cleanup: CleanupStats,
}

impl PipelineOutput {
    /// Label-set meta-graph of the result.
    pub fn schema(&self) -> PropertyGraph {
        self.graph.summarize_schema()
    }
}

/// Read-only transformation of a fact graph into the architecture graph.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    /// Run every enabled pass against `original`, absorbing each pass's output
    /// before the next one runs, then clean up the assembled graph.
    pub fn run(&self, original: &PropertyGraph) -> Result<PipelineOutput, PipelineError> {
        let mut graph = PropertyGraph::new();
        let mut mapping = IdMapping::new();
        let mut stages = Vec::new();

        for pass in passes_for(&self.config) {
            let output = run_pass(pass.as_ref(), original, &mapping, &graph);
            let report = StageReport {
                stage: pass.stage(),
                nodes: output.nodes.len(),
                edges: output.edges.len(),
            };
            absorb(&mut graph, &mut mapping, output)?;

            tracing::info!(
                "{}: {} nodes, {} edges ({} ids mapped)",
                report.stage,
                report.nodes,
                report.edges,
                mapping.len()
            );
            stages.push(report);
        }

        let cleanup = graph.clean_up();
        tracing::info!(
            "Assembled {} nodes, {} edges from {} original nodes",
            graph.node_count(),
            graph.edge_count(),
            original.node_count()
        );

        Ok(PipelineOutput {
            graph,
            mapping,
            stages,
            cleanup,
        })
    }
}

fn run_pass(
    pass: &dyn Pass,
    original: &PropertyGraph,
    mapping: &IdMapping,
    produced: &PropertyGraph,
) -> StageOutput {
    let ctx = StageContext {
        original,
        mapping,
        produced,
    };
    tracing::debug!("Running stage: {}", pass.stage());
    pass.run(&ctx)
}

fn absorb(
    graph: &mut PropertyGraph,
    mapping: &mut IdMapping,
    output: StageOutput,
) -> Result<(), PipelineError> {
    for node in output.nodes {
        graph.insert_node(node)?;
    }
    graph.extend_edges(output.edges);
    mapping.extend(output.mapping);
    for promotion in output.promotions {
        match promotion {
            Promotion::Label { id, label } => graph.add_label(&id, &label)?,
            Promotion::Kind { id, kind } => graph
                .node_mut(&id)
                .ok_or(GraphError::UnknownNode(id))?
                .set_kind(kind),
        }
    }
    Ok(())
}
