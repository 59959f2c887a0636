use crate::error::GraphResult;
use crate::graph::digraph::{Graph, VertexId};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

impl<V: VertexId> Graph<V> {
    /// Breadth-first traversal from `start`, returning vertices in visit order.
    ///
    /// A vertex is marked visited when it is dequeued, so it may sit in the
    /// queue more than once but is emitted only the first time.
    pub fn breadth_first_traverse(&self, start: &V) -> GraphResult<Vec<V>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }

            for neighbor in self.neighbors(&current)? {
                if !visited.contains(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
            order.push(current);
        }

        debug!("Breadth-first traversal from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Iterative depth-first traversal from `start`.
    ///
    /// Every neighbor of a freshly visited vertex is pushed, visited or not;
    /// stale entries are dropped when popped.
    pub fn depth_first_traverse(&self, start: &V) -> GraphResult<Vec<V>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![start.clone()];

        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }

            visited.insert(current.clone());
            stack.extend(self.neighbors(&current)?);
            order.push(current);
        }

        debug!("Depth-first traversal from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Recursive preorder depth-first traversal from `start`.
    pub fn depth_first_traverse_recursive(&self, start: &V) -> GraphResult<Vec<V>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        self.depth_first_visit(start, &mut visited, &mut order)?;

        Ok(order)
    }

    fn depth_first_visit(
        &self,
        vertex: &V,
        visited: &mut HashSet<V>,
        order: &mut Vec<V>,
    ) -> GraphResult<()> {
        if visited.contains(vertex) {
            return Ok(());
        }

        visited.insert(vertex.clone());
        order.push(vertex.clone());

        for neighbor in self.neighbors(vertex)? {
            self.depth_first_visit(&neighbor, visited, order)?;
        }

        Ok(())
    }

    /// Shortest path (fewest edges) from `start` to `destination`, found by
    /// breadth-first search over partial paths.
    pub fn shortest_path_breadth_first(
        &self,
        start: &V,
        destination: &V,
    ) -> GraphResult<Option<Vec<V>>> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        queue.push_back(vec![start.clone()]);

        while let Some(path) = queue.pop_front() {
            let Some(current) = path.last() else {
                continue;
            };

            if !visited.insert(current.clone()) {
                continue;
            }

            if current == destination {
                debug!("Found path of {} vertices from {:?} to {:?}", path.len(), start, destination);
                return Ok(Some(path));
            }

            for neighbor in self.neighbors(current)? {
                let mut new_path = path.clone();
                new_path.push(neighbor);
                queue.push_back(new_path);
            }
        }

        debug!("No path from {:?} to {:?}", start, destination);
        Ok(None)
    }

    /// Some path from `start` to `destination`, found by depth-first search
    /// over partial paths. Not necessarily the shortest.
    pub fn path_depth_first(&self, start: &V, destination: &V) -> GraphResult<Option<Vec<V>>> {
        let mut visited = HashSet::new();
        let mut stack = vec![vec![start.clone()]];

        while let Some(path) = stack.pop() {
            let Some(current) = path.last() else {
                continue;
            };

            if !visited.insert(current.clone()) {
                continue;
            }

            if current == destination {
                debug!("Found path of {} vertices from {:?} to {:?}", path.len(), start, destination);
                return Ok(Some(path));
            }

            for neighbor in self.neighbors(current)? {
                let mut new_path = path.clone();
                new_path.push(neighbor);
                stack.push(new_path);
            }
        }

        debug!("No path from {:?} to {:?}", start, destination);
        Ok(None)
    }

    /// Shortest path from `start` to `destination` by exhaustive recursion.
    ///
    /// Only vertices already on the current path are excluded, so a vertex can
    /// be revisited on a different branch. Returns `None` when `start` is not
    /// registered (unless it is the destination itself) or nothing is reachable.
    pub fn shortest_path_depth_first_recursive(&self, start: &V, destination: &V) -> Option<Vec<V>> {
        self.shortest_path_from(start, destination, Vec::new())
    }

    fn shortest_path_from(&self, vertex: &V, destination: &V, mut path: Vec<V>) -> Option<Vec<V>> {
        path.push(vertex.clone());

        if vertex == destination {
            return Some(path);
        }

        let neighbors = self.neighbors(vertex).ok()?;
        let mut shortest: Option<Vec<V>> = None;

        for neighbor in neighbors {
            if path.contains(&neighbor) {
                continue;
            }

            if let Some(candidate) = self.shortest_path_from(&neighbor, destination, path.clone()) {
                let is_shorter = shortest
                    .as_ref()
                    .map_or(true, |best| candidate.len() < best.len());
                if is_shorter {
                    shortest = Some(candidate);
                }
            }
        }

        shortest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    /// The seven-vertex sample graph:
    /// {1: {2}, 2: {3, 4}, 3: {5}, 4: {6, 7}, 5: {3}, 6: {3}, 7: {1, 6}}
    fn create_test_graph() -> Graph<i64> {
        let mut graph = Graph::new();
        for vertex in 1..=7 {
            graph.add_vertex(vertex);
        }
        let edges = [
            (5, 3),
            (6, 3),
            (7, 1),
            (4, 7),
            (1, 2),
            (7, 6),
            (2, 4),
            (3, 5),
            (2, 3),
            (4, 6),
        ];
        for (from, to) in edges {
            graph.add_edge(&from, &to).unwrap();
        }
        graph
    }

    #[test]
    fn test_breadth_first_traverse() {
        let graph = create_test_graph();
        let order = graph.breadth_first_traverse(&1).unwrap();

        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_depth_first_traverse() {
        let graph = create_test_graph();
        let order = graph.depth_first_traverse(&1).unwrap();

        // Larger neighbors are popped first.
        assert_eq!(order, vec![1, 2, 4, 7, 6, 3, 5]);
    }

    #[test]
    fn test_depth_first_traverse_recursive() {
        let graph = create_test_graph();
        let order = graph.depth_first_traverse_recursive(&1).unwrap();

        assert_eq!(order, vec![1, 2, 3, 5, 4, 6, 7]);
    }

    #[test]
    fn test_recursive_traversal_does_not_leak_state() {
        let graph = create_test_graph();
        let first = graph.depth_first_traverse_recursive(&1).unwrap();
        let second = graph.depth_first_traverse_recursive(&1).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.len(), 7);
    }

    #[test]
    fn test_traversals_from_unknown_vertex() {
        let graph = create_test_graph();

        assert_eq!(
            graph.breadth_first_traverse(&42),
            Err(GraphError::vertex_not_found(&42))
        );
        assert_eq!(
            graph.depth_first_traverse(&42),
            Err(GraphError::vertex_not_found(&42))
        );
        assert_eq!(
            graph.depth_first_traverse_recursive(&42),
            Err(GraphError::vertex_not_found(&42))
        );
        assert!(graph.shortest_path_breadth_first(&42, &1).is_err());
        assert!(graph.path_depth_first(&42, &1).is_err());
    }

    #[test]
    fn test_shortest_path_breadth_first() {
        let graph = create_test_graph();
        let path = graph.shortest_path_breadth_first(&1, &6).unwrap();

        assert_eq!(path, Some(vec![1, 2, 4, 6]));
    }

    #[test]
    fn test_path_depth_first() {
        let graph = create_test_graph();
        let path = graph.path_depth_first(&1, &6).unwrap();

        assert_eq!(path, Some(vec![1, 2, 4, 7, 6]));
    }

    #[test]
    fn test_shortest_path_depth_first_recursive() {
        let graph = create_test_graph();

        assert_eq!(
            graph.shortest_path_depth_first_recursive(&1, &6),
            Some(vec![1, 2, 4, 6])
        );
        assert_eq!(graph.shortest_path_depth_first_recursive(&42, &6), None);
        assert_eq!(
            graph.shortest_path_depth_first_recursive(&42, &42),
            Some(vec![42])
        );
    }

    #[test]
    fn test_unreachable_destination() {
        let mut graph = create_test_graph();
        graph.add_vertex(8);

        assert_eq!(graph.shortest_path_breadth_first(&1, &8).unwrap(), None);
        assert_eq!(graph.path_depth_first(&1, &8).unwrap(), None);
        assert_eq!(graph.shortest_path_depth_first_recursive(&1, &8), None);
    }

    #[test]
    fn test_path_to_self() {
        let graph = create_test_graph();

        assert_eq!(graph.shortest_path_breadth_first(&3, &3).unwrap(), Some(vec![3]));
        assert_eq!(graph.path_depth_first(&3, &3).unwrap(), Some(vec![3]));
    }
}
