//! Pipeline errors

use renaissance_core::GraphError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to assemble output graph: {0}")]
    Assembly(#[from] GraphError),

    #[error("invalid pipeline configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
