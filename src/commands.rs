//! CLI command implementations

use anyhow::Context;
use renaissance_core::schema_lines;
use renaissance_io::{load_graph, render_dot, write_graph};
use renaissance_transform::{Pipeline, PipelineConfig};
use std::path::Path;

/// Stage switches given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageFlags {
    pub no_ops: bool,
    pub no_files: bool,
    pub no_folders: bool,
    pub merge_aliases: bool,
}

/// Configuration file (or defaults) with the command-line flags applied on
/// top. Flags only ever disable stages, or enable alias merging.
pub fn pipeline_config(path: Option<&Path>, flags: StageFlags) -> anyhow::Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    config.operations &= !flags.no_ops;
    config.files &= !flags.no_files;
    config.folders &= !flags.no_folders;
    config.merge_aliases |= flags.merge_aliases;
    Ok(config)
}

/// Load, transform and write. Nothing is written unless the whole
/// pipeline succeeds.
pub fn transform(
    input: &Path,
    output: &Path,
    ontology: Option<&Path>,
    dot: Option<&Path>,
    config: PipelineConfig,
) -> anyhow::Result<()> {
    tracing::info!("Reading {}", input.display());
    let original = load_graph(input).with_context(|| format!("Failed to load {}", input.display()))?;

    let result = Pipeline::new(config)
        .run(&original)
        .context("Transformation failed")?;

    write_graph(&result.graph, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Wrote {} nodes, {} edges to {}",
        result.graph.node_count(),
        result.graph.edge_count(),
        output.display()
    );

    if let Some(path) = ontology {
        let schema = result.schema();
        write_graph(&schema, path)
            .with_context(|| format!("Failed to write ontology {}", path.display()))?;
        for line in schema_lines(&schema) {
            tracing::debug!("{}", line);
        }
        tracing::info!("Wrote ontology ({} label sets) to {}", schema.node_count(), path.display());
    }

    if let Some(path) = dot {
        std::fs::write(path, render_dot(&result.graph))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote DOT to {}", path.display());
    }

    Ok(())
}
