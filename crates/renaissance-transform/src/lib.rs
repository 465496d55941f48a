//! Renaissance Transform — rewrites an extractor fact graph into the architecture taxonomy

pub mod config;
pub mod error;
pub mod labels;
pub mod mapping;
pub mod merger;
pub mod naming;
pub mod passes;
pub mod pipeline;


#[cfg(test)]
pub mod test_utils;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use mapping::IdMapping;
pub use merger::{EntityClass, EntityMerger, MergedGroup};
pub use passes::{Pass, Promotion, Stage, StageContext, StageOutput};
pub use pipeline::{Pipeline, PipelineOutput, StageReport};
