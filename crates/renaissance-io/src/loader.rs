//! Input loading by file extension, and JSON output

use crate::error::LoadError;
use crate::graphml::parse_graphml;
use renaissance_core::{Interchange, PropertyGraph};
use std::fs;
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Graphml,
    Json,
}

impl InputFormat {
    /// Format for `path`, by case-insensitive extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("graphml") => Ok(InputFormat::Graphml),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(LoadError::UnsupportedExtension(path.to_path_buf())),
        }
    }
}

/// Read a fact graph from a `.graphml` or interchange `.json` file.
pub fn load_graph(path: &Path) -> Result<PropertyGraph, LoadError> {
    let format = InputFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;

    let graph = match format {
        InputFormat::Graphml => parse_graphml(&text)?,
        InputFormat::Json => parse_interchange(&text)?,
    };
    tracing::info!(
        "Loaded {} nodes, {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Parse an interchange document.
pub fn parse_interchange(json: &str) -> Result<PropertyGraph, LoadError> {
    let doc: Interchange = serde_json::from_str(json)?;
    Ok(PropertyGraph::from_interchange(doc)?)
}

/// Write `graph` as a pretty-printed interchange document.
pub fn write_graph(graph: &PropertyGraph, path: &Path) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(&graph.to_interchange())?;
    fs::write(path, json).map_err(|e| LoadError::io(path, e))?;
    tracing::debug!("Wrote {} nodes to {}", graph.node_count(), path.display());
    Ok(())
}
