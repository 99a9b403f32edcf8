//! Depth-first and breadth-first traversal.
//!
//! Both DFS forms visit in identical order: the explicit-stack variant
//! pushes neighbors in reverse so the first adjacency record is expanded
//! first, exactly as the recursive form does.

use std::collections::VecDeque;

use tracing::debug;

use super::{Graph, GraphError};

impl<T> Graph<T> {
    /// Recursive depth-first visitation order from `start`.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        self.check(start)?;
        debug!(start, "dfs");
        let mut visited = vec![false; self.node_count()];
        let mut order = Vec::new();
        self.dfs_visit(start, &mut visited, &mut order);
        Ok(order)
    }

    fn dfs_visit(&self, u: usize, visited: &mut [bool], order: &mut Vec<usize>) {
        visited[u] = true;
        order.push(u);
        for edge in self.edges_from(u) {
            if !visited[edge.to] {
                self.dfs_visit(edge.to, visited, order);
            }
        }
    }

    /// Explicit-stack depth-first traversal with the same visitation order
    /// as [`Graph::dfs`].
    pub fn dfs_iterative(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        self.check(start)?;
        let mut visited = vec![false; self.node_count()];
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(u);
            for edge in self.edges_from(u).iter().rev() {
                if !visited[edge.to] {
                    stack.push(edge.to);
                }
            }
        }
        Ok(order)
    }

    /// Queue-based level-order traversal from `start`.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>, GraphError> {
        self.check(start)?;
        debug!(start, "bfs");
        let mut visited = vec![false; self.node_count()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for edge in self.edges_from(u) {
                if !visited[edge.to] {
                    visited[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<()> {
        // 0 -> 1 -> 3, 0 -> 2 -> 3
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1, 1.0, true).unwrap();
        g.add_edge(0, 2, 1.0, true).unwrap();
        g.add_edge(1, 3, 1.0, true).unwrap();
        g.add_edge(2, 3, 1.0, true).unwrap();
        g
    }

    #[test]
    fn dfs_forms_agree() {
        let g = diamond();
        assert_eq!(g.dfs(0).unwrap(), g.dfs_iterative(0).unwrap());
        assert_eq!(g.dfs(0).unwrap(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn bfs_is_level_order() {
        let g = diamond();
        assert_eq!(g.bfs(0).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn traversal_checks_start() {
        let g: Graph<()> = Graph::with_nodes(1);
        assert!(g.dfs(4).is_err());
    }
}
