use crate::error::{GraphError, GraphResult};
use crate::graph::digraph::{Graph, VertexId};
use petgraph::graph::NodeIndex;
use tracing::debug;

/// Lazy depth-first enumeration of maximal paths.
///
/// Each yielded path starts at the origin vertex and ends at a vertex with no
/// outgoing edges. Paths come out in the same order a recursive walk over
/// ascending neighbors would produce them. Cloning the iterator gives an
/// independent enumeration.
///
/// The walk never terminates if a cycle is reachable from the origin; use
/// [`Graph::try_collect_maximal_paths`] when that cannot be ruled out.
#[derive(Debug, Clone)]
pub struct MaximalPaths<'g, V> {
    graph: &'g Graph<V>,
    stack: Vec<Vec<NodeIndex>>,
}

impl<'g, V: VertexId> MaximalPaths<'g, V> {
    /// Expand the work stack until the next maximal path is complete.
    ///
    /// With `cycle_guard` set, a successor already on the current path is
    /// reported as `GraphError::CycleDetected`; without it this never fails.
    fn advance(&mut self, cycle_guard: bool) -> GraphResult<Option<Vec<V>>> {
        while let Some(path) = self.stack.pop() {
            let Some(&last) = path.last() else {
                continue;
            };

            let successors = self.graph.sorted_successors(last);
            if successors.is_empty() {
                return Ok(Some(
                    path.iter()
                        .map(|&node_index| self.graph.vertex_at(node_index).clone())
                        .collect(),
                ));
            }

            // Reverse so the smallest neighbor is expanded first.
            for successor in successors.into_iter().rev() {
                if cycle_guard && path.contains(&successor) {
                    return Err(GraphError::cycle_detected(self.graph.vertex_at(successor)));
                }
                let mut branch = path.clone();
                branch.push(successor);
                self.stack.push(branch);
            }
        }

        Ok(None)
    }
}

impl<'g, V: VertexId> Iterator for MaximalPaths<'g, V> {
    type Item = Vec<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance(false).ok().flatten()
    }
}

impl<V: VertexId> Graph<V> {
    /// Enumerate every maximal path starting at `start`.
    ///
    /// The graph must be acyclic along every walk reachable from `start`.
    pub fn enumerate_maximal_paths(&self, start: &V) -> GraphResult<MaximalPaths<'_, V>> {
        let start_index = self.index_of(start)?;

        Ok(MaximalPaths {
            graph: self,
            stack: vec![vec![start_index]],
        })
    }

    /// Eagerly collect [`Graph::enumerate_maximal_paths`].
    pub fn collect_maximal_paths(&self, start: &V) -> GraphResult<Vec<Vec<V>>> {
        let paths: Vec<Vec<V>> = self.enumerate_maximal_paths(start)?.collect();

        debug!("Found {} maximal paths from vertex {:?}", paths.len(), start);
        Ok(paths)
    }

    /// Like [`Graph::collect_maximal_paths`], but fails with
    /// `GraphError::CycleDetected` instead of looping when a walk would
    /// return to a vertex already on its own path.
    pub fn try_collect_maximal_paths(&self, start: &V) -> GraphResult<Vec<Vec<V>>> {
        let mut walk = self.enumerate_maximal_paths(start)?;
        let mut paths = Vec::new();

        while let Some(path) = walk.advance(true)? {
            paths.push(path);
        }

        debug!("Found {} maximal paths from vertex {:?}", paths.len(), start);
        Ok(paths)
    }
}
