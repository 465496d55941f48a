//! Renaissance IO — GraphML and interchange loading, JSON output, DOT export

pub mod dot;
pub mod error;
pub mod graphml;
pub mod loader;


pub use dot::render_dot;
pub use error::LoadError;
pub use graphml::parse_graphml;
pub use loader::{InputFormat, load_graph, parse_interchange, write_graph};
