use crate::error::GraphResult;
use crate::graph::{Graph, VertexId};
use tracing::{debug, info};

/// Sentinel returned by [`earliest_ancestor`] when the query vertex has no parent.
pub const NO_ANCESTOR: i64 = -1;

/// Resolves the most distant ancestor of a vertex over a parent -> child relation.
///
/// The relation is stored reversed (child -> parent), so walking forward from
/// a vertex climbs towards its ancestors and longer maximal paths reach more
/// distant ones.
#[derive(Debug, Clone)]
pub struct AncestorResolver<V> {
    graph: Graph<V>,
    cycle_guard: bool,
}

impl<V: VertexId> AncestorResolver<V> {
    /// Wrap a graph whose edges already point from child to parent.
    pub fn from_graph(graph: Graph<V>) -> Self {
        Self {
            graph,
            cycle_guard: false,
        }
    }

    /// Build the reversed graph from `(ancestor, descendant)` pairs.
    pub fn from_pairs(pairs: &[(V, V)]) -> GraphResult<Self> {
        let mut graph = Graph::new();

        // First pass: every value mentioned becomes a vertex
        for (ancestor, descendant) in pairs {
            graph.add_vertex(ancestor.clone());
            graph.add_vertex(descendant.clone());
        }

        // Second pass: descendant -> ancestor edges
        for (ancestor, descendant) in pairs {
            graph.add_edge(descendant, ancestor)?;
        }

        info!(
            "Ancestry graph built with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        Ok(Self::from_graph(graph))
    }

    /// Fail with `GraphError::CycleDetected` on cyclic ancestry instead of
    /// enumerating forever.
    pub fn with_cycle_guard(mut self, enabled: bool) -> Self {
        self.cycle_guard = enabled;
        self
    }

    pub fn graph(&self) -> &Graph<V> {
        &self.graph
    }

    /// Find the earliest ancestor of `vertex`.
    ///
    /// Returns `None` when `vertex` has no recorded parent, including when it
    /// never appeared in the relation at all.
    pub fn earliest_ancestor(&self, vertex: &V) -> GraphResult<Option<V>> {
        if !self.graph.contains_vertex(vertex) {
            debug!("Vertex {:?} is not part of the ancestry graph", vertex);
            return Ok(None);
        }

        let paths = if self.cycle_guard {
            self.graph.try_collect_maximal_paths(vertex)?
        } else {
            self.graph.collect_maximal_paths(vertex)?
        };

        let ancestor = select_earliest(&paths);
        debug!("Earliest ancestor of {:?}: {:?}", vertex, ancestor);
        Ok(ancestor)
    }
}

/// Pick the final vertex of the longest path, preferring the smallest vertex
/// among equally long paths.
fn select_earliest<V: VertexId>(paths: &[Vec<V>]) -> Option<V> {
    if let [only] = paths {
        if only.len() == 1 {
            return None;
        }
    }

    let mut best: Option<(usize, &V)> = None;

    for path in paths {
        let Some(last) = path.last() else {
            continue;
        };

        best = match best {
            None => Some((path.len(), last)),
            Some((longest, _)) if path.len() > longest => Some((path.len(), last)),
            Some((longest, ancestor)) if path.len() == longest && last < ancestor => {
                Some((longest, last))
            }
            unchanged => unchanged,
        };
    }

    best.map(|(_, ancestor)| ancestor.clone())
}

/// Earliest ancestor of `starting_vertex` given `(ancestor, descendant)` pairs,
/// or [`NO_ANCESTOR`] when it has none.
pub fn earliest_ancestor(ancestors: &[(i64, i64)], starting_vertex: i64) -> GraphResult<i64> {
    let resolver = AncestorResolver::from_pairs(ancestors)?;

    Ok(resolver
        .earliest_ancestor(&starting_vertex)?
        .unwrap_or(NO_ANCESTOR))
}
