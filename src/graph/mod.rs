pub mod digraph;
pub mod paths;
pub mod traversal;

pub use digraph::{Graph, VertexId};
pub use paths::MaximalPaths;
