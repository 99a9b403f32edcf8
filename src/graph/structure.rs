//! Structural analysis: cycles, topology, components, spanning trees.

use std::collections::VecDeque;

use tracing::debug;

use super::paths::WeightHeap;
use super::{Graph, GraphError};

/// Minimum spanning tree as grown by Prim's algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct MstResult {
    pub total_weight: f64,
    /// `(parent, node, weight)` per tree edge, in growth order.
    pub edges: Vec<(usize, usize, f64)>,
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

impl<T> Graph<T> {
    /// Three-color cycle detection. Undirected records back to the
    /// immediate parent are not cycles.
    pub fn has_cycle(&self) -> bool {
        let n = self.node_count();
        let mut color = vec![Color::White; n];
        for start in 0..n {
            if color[start] == Color::White
                && self.cycle_visit(start, usize::MAX, &mut color)
            {
                return true;
            }
        }
        false
    }

    fn cycle_visit(&self, u: usize, parent: usize, color: &mut [Color]) -> bool {
        color[u] = Color::Gray;
        for edge in self.edges_from(u) {
            if !edge.directed && edge.to == parent {
                continue;
            }
            match color[edge.to] {
                Color::Gray => return true,
                Color::White => {
                    if self.cycle_visit(edge.to, u, color) {
                        return true;
                    }
                }
                Color::Black => {}
            }
        }
        color[u] = Color::Black;
        false
    }

    /// Kahn's algorithm over the directed records only.
    ///
    /// Raises [`GraphError::CycleDetected`] when fewer nodes are emitted
    /// than exist, i.e. the directed subgraph has a cycle.
    pub fn topological_sort(&self) -> Result<Vec<usize>, GraphError> {
        let n = self.node_count();
        debug!(nodes = n, "topological sort");
        let mut in_degree = vec![0usize; n];
        for u in 0..n {
            for edge in self.edges_from(u) {
                if edge.directed {
                    in_degree[edge.to] += 1;
                }
            }
        }
        let mut queue: VecDeque<usize> = (0..n).filter(|&u| in_degree[u] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for edge in self.edges_from(u) {
                if edge.directed {
                    in_degree[edge.to] -= 1;
                    if in_degree[edge.to] == 0 {
                        queue.push_back(edge.to);
                    }
                }
            }
        }
        if order.len() < n {
            return Err(GraphError::CycleDetected {
                operation: "topological_sort",
            });
        }
        Ok(order)
    }

    /// Components of the undirected view (directed records count both
    /// ways), via BFS.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let undirected = self.symmetrized();
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            seen[start] = true;
            while let Some(u) = queue.pop_front() {
                component.push(u);
                for &v in &undirected[u] {
                    if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// True when the undirected view has at most one component.
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    fn symmetrized(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let mut adjacency = vec![Vec::new(); n];
        for u in 0..n {
            for edge in self.edges_from(u) {
                adjacency[u].push(edge.to);
                if edge.directed {
                    adjacency[edge.to].push(u);
                }
            }
        }
        adjacency
    }

    /// Kosaraju's strongly connected components: finish-order DFS,
    /// transpose, second DFS in reverse finish order.
    pub fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let mut visited = vec![false; n];
        let mut finish_order = Vec::with_capacity(n);
        for start in 0..n {
            if !visited[start] {
                self.finish_visit(start, &mut visited, &mut finish_order);
            }
        }

        let mut transpose = vec![Vec::new(); n];
        for u in 0..n {
            for edge in self.edges_from(u) {
                transpose[edge.to].push(u);
            }
        }

        let mut assigned = vec![false; n];
        let mut components = Vec::new();
        for &start in finish_order.iter().rev() {
            if assigned[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![start];
            assigned[start] = true;
            while let Some(u) = stack.pop() {
                component.push(u);
                for &v in &transpose[u] {
                    if !assigned[v] {
                        assigned[v] = true;
                        stack.push(v);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    fn finish_visit(&self, u: usize, visited: &mut [bool], order: &mut Vec<usize>) {
        visited[u] = true;
        for edge in self.edges_from(u) {
            if !visited[edge.to] {
                self.finish_visit(edge.to, visited, order);
            }
        }
        order.push(u);
    }

    /// Prim's minimum spanning tree grown from node 0 over the stored
    /// adjacency. Unreachable nodes are simply absent from the result.
    pub fn prim_mst(&self) -> MstResult {
        let n = self.node_count();
        let mut result = MstResult {
            total_weight: 0.0,
            edges: Vec::new(),
        };
        if n == 0 {
            return result;
        }
        let mut in_tree = vec![false; n];
        let mut heap = WeightHeap::new();
        in_tree[0] = true;
        for edge in self.edges_from(0) {
            heap.push(edge.weight, (0, edge.to));
        }
        while let Some((weight, (parent, node))) = heap.pop() {
            if in_tree[node] {
                continue;
            }
            in_tree[node] = true;
            result.total_weight += weight;
            result.edges.push((parent, node, weight));
            for edge in self.edges_from(node) {
                if !in_tree[edge.to] {
                    heap.push(edge.weight, (node, edge.to));
                }
            }
        }
        result
    }
}
