//! Renaissance Core — property graph model, query primitives, interchange codec and schema summary

pub mod error;
pub mod graph;
pub mod interchange;
pub mod model;
pub mod schema;

#[cfg(test)]
mod tests;

pub use error::GraphError;
pub use graph::{CleanupStats, PropertyGraph};
pub use interchange::Interchange;
pub use model::{Edge, LabelSet, Node, Properties, PropertyValue, KIND_KEY, META_SRC, META_SRC_KEY};
pub use petgraph::Direction;
pub use schema::{label_set_id, schema_lines};
