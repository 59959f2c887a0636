use crate::error::{GraphError, GraphResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Requirements on a vertex identifier: hashable for lookup, ordered for
/// deterministic neighbor order and ancestor tie-breaks.
pub trait VertexId: Clone + Eq + Hash + Ord + Debug {}

impl<T> VertexId for T where T: Clone + Eq + Hash + Ord + Debug {}

/// Directed graph mapping each vertex to its set of successors.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    graph: DiGraph<V, ()>,
    node_map: HashMap<V, NodeIndex>,
}

impl<V: VertexId> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId> Graph<V> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Get the number of vertices in the graph
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.node_map.contains_key(vertex)
    }

    /// Register a vertex. Adding a vertex twice is a no-op.
    pub fn add_vertex(&mut self, vertex: V) {
        if self.node_map.contains_key(&vertex) {
            return;
        }

        let node_index = self.graph.add_node(vertex.clone());
        self.node_map.insert(vertex, node_index);
    }

    /// Add a directed edge `from -> to`.
    ///
    /// Both endpoints must already be registered. Re-adding an existing edge
    /// leaves the graph unchanged.
    pub fn add_edge(&mut self, from: &V, to: &V) -> GraphResult<()> {
        let from_index = *self
            .node_map
            .get(from)
            .ok_or_else(|| GraphError::unknown_vertex(from))?;
        let to_index = *self
            .node_map
            .get(to)
            .ok_or_else(|| GraphError::unknown_vertex(to))?;

        self.graph.update_edge(from_index, to_index, ());
        Ok(())
    }

    /// Get the direct successors of a vertex.
    ///
    /// An unregistered vertex yields `GraphError::VertexNotFound`; a registered
    /// vertex without outgoing edges yields an empty set.
    pub fn neighbors(&self, vertex: &V) -> GraphResult<BTreeSet<V>> {
        let node_index = self.index_of(vertex)?;

        Ok(self
            .graph
            .neighbors_directed(node_index, Direction::Outgoing)
            .map(|neighbor_index| self.graph[neighbor_index].clone())
            .collect())
    }

    /// All registered vertices in ascending order
    pub fn vertices(&self) -> Vec<V> {
        let mut vertices: Vec<V> = self.node_map.keys().cloned().collect();
        vertices.sort();
        vertices
    }

    /// Snapshot of the whole vertex -> successors mapping.
    pub fn adjacency(&self) -> BTreeMap<V, BTreeSet<V>> {
        self.node_map
            .iter()
            .map(|(vertex, &node_index)| {
                let successors = self
                    .graph
                    .neighbors_directed(node_index, Direction::Outgoing)
                    .map(|neighbor_index| self.graph[neighbor_index].clone())
                    .collect();
                (vertex.clone(), successors)
            })
            .collect()
    }

    /// Vertices with no outgoing edges
    pub fn leaf_vertices(&self) -> Vec<V> {
        let mut leaves: Vec<V> = self
            .node_map
            .iter()
            .filter(|(_, node_index)| {
                self.graph
                    .neighbors_directed(**node_index, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|(vertex, _)| vertex.clone())
            .collect();
        leaves.sort();

        debug!("Found {} leaf vertices", leaves.len());
        leaves
    }

    pub(crate) fn index_of(&self, vertex: &V) -> GraphResult<NodeIndex> {
        self.node_map
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    pub(crate) fn vertex_at(&self, node_index: NodeIndex) -> &V {
        &self.graph[node_index]
    }

    /// Successor indices ordered by vertex identifier.
    pub(crate) fn sorted_successors(&self, node_index: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node_index, Direction::Outgoing)
            .collect();
        successors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        successors
    }
}
