//! Pipeline configuration

use crate::error::PipelineError;
use serde::Deserialize;
use std::path::Path;

/// Which stages run. The structure pass always runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Functions, declarations and macros (pass 2).
    pub operations: bool,
    /// Files and their associations (pass 3).
    pub files: bool,
    /// Folder inversion (pass 4).
    pub folders: bool,
    /// Union declarations joined by alias edges before classification.
    pub merge_aliases: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            operations: true,
            files: true,
            folders: true,
            merge_aliases: false,
        }
    }
}

/// Layout of a configuration file: a single `[pipeline]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    pipeline: PipelineConfig,
}

impl PipelineConfig {
    /// The linking pass needs both file and folder nodes.
    pub fn link_structures(&self) -> bool {
        self.files && self.folders
    }

    pub fn from_toml_str(source: &str) -> Result<Self, PipelineError> {
        let file: ConfigFile = toml::from_str(source)?;
        Ok(file.pipeline)
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let source = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = PipelineConfig::from_toml_str(&source)?;
        tracing::debug!("Loaded pipeline config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
