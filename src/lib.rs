pub mod ancestry;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;

pub use ancestry::{earliest_ancestor, AncestorResolver, NO_ANCESTOR};
pub use error::{GraphError, GraphResult};
pub use graph::{Graph, MaximalPaths, VertexId};
