use thiserror::Error;

/// Errors raised by graph construction and traversal.
///
/// Vertex identifiers are rendered with `Debug` so the error stays usable for
/// any identifier type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint was not registered with `add_vertex` first.
    #[error("Vertex does not exist: {vertex}")]
    UnknownVertex { vertex: String },

    /// Neighbor lookup (or a traversal starting point) named an unregistered vertex.
    #[error("Vertex not found in graph: {vertex}")]
    VertexNotFound { vertex: String },

    /// Guarded path enumeration reached a vertex already on the current path.
    #[error("Cycle detected at vertex {vertex}")]
    CycleDetected { vertex: String },
}

impl GraphError {
    pub fn unknown_vertex<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::UnknownVertex {
            vertex: format!("{:?}", vertex),
        }
    }

    pub fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::VertexNotFound {
            vertex: format!("{:?}", vertex),
        }
    }

    pub fn cycle_detected<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::CycleDetected {
            vertex: format!("{:?}", vertex),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unsupported log level: {0}")]
    UnsupportedLogLevel(String),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_include_vertex() {
        assert_eq!(
            GraphError::unknown_vertex(&42).to_string(),
            "Vertex does not exist: 42"
        );
        assert_eq!(
            GraphError::vertex_not_found(&"a").to_string(),
            "Vertex not found in graph: \"a\""
        );
        assert_eq!(
            GraphError::cycle_detected(&7).to_string(),
            "Cycle detected at vertex 7"
        );
    }
}
