//! Graph and ancestry definitions read from YAML or JSON files.

use crate::ancestry::AncestorResolver;
use crate::graph::Graph;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A directed graph as listed vertices plus `[from, to]` edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub vertices: Vec<i64>,
    #[serde(default)]
    pub edges: Vec<(i64, i64)>,
}

/// A parent -> child relation as `[ancestor, descendant]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestryDefinition {
    pub pairs: Vec<(i64, i64)>,
}

impl GraphDefinition {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_definition(path.as_ref())
    }

    /// Build the graph, rejecting edges whose endpoints are not listed.
    pub fn build(&self) -> Result<Graph<i64>> {
        let mut graph = Graph::new();

        for &vertex in &self.vertices {
            graph.add_vertex(vertex);
        }

        for (from, to) in &self.edges {
            graph
                .add_edge(from, to)
                .with_context(|| format!("Invalid edge {} -> {}", from, to))?;
        }

        info!(
            "Graph built with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

impl AncestryDefinition {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_definition(path.as_ref())
    }

    pub fn resolver(&self) -> Result<AncestorResolver<i64>> {
        AncestorResolver::from_pairs(&self.pairs).context("Failed to build ancestry graph")
    }
}

fn load_definition<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Loading definition from: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON input: {:?}", path))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML input: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_graph() {
        let file = write_temp(".yml", "vertices: [1, 2, 3]\nedges: [[1, 2], [2, 3]]\n");
        let definition = GraphDefinition::load(file.path()).unwrap();
        let graph = definition.build().unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.breadth_first_traverse(&1).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_load_json_ancestry() {
        let file = write_temp(".json", r#"{"pairs": [[1, 3], [2, 3], [10, 1]]}"#);
        let definition = AncestryDefinition::load(file.path()).unwrap();
        let resolver = definition.resolver().unwrap();

        assert_eq!(resolver.earliest_ancestor(&3).unwrap(), Some(10));
    }

    #[test]
    fn test_edges_default_to_empty() {
        let definition: GraphDefinition = serde_yaml::from_str("vertices: [7]\n").unwrap();
        assert!(definition.edges.is_empty());
        assert_eq!(definition.build().unwrap().vertex_count(), 1);
    }

    #[test]
    fn test_unlisted_edge_endpoint_is_rejected() {
        let definition = GraphDefinition {
            vertices: vec![1],
            edges: vec![(1, 2)],
        };

        let error = definition.build().unwrap_err();
        assert!(error.to_string().contains("Invalid edge 1 -> 2"));
    }

    #[test]
    fn test_malformed_input() {
        let file = write_temp(".json", "{not json");
        assert!(GraphDefinition::load(file.path()).is_err());
    }
}
