//! Shortest-path algorithms and strategy selection.
//!
//! All algorithms use positive infinity as the unreachable sentinel and
//! `usize::MAX` as the missing-predecessor sentinel. The front door,
//! [`Graph::shortest_path`], picks the cheapest applicable algorithm from
//! the incrementally maintained aggregates: unweighted graphs use BFS
//! distances, weighted graphs without negative edges use Dijkstra, and
//! anything with a negative edge falls back to Bellman-Ford.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use tracing::debug;

use super::{Graph, GraphError};

/// Missing-predecessor sentinel.
pub const NO_PREDECESSOR: usize = usize::MAX;

/// Single-source result: per-node distance and predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// `f64::INFINITY` for unreachable nodes.
    pub distances: Vec<f64>,
    /// [`NO_PREDECESSOR`] for the source and unreachable nodes.
    pub predecessors: Vec<usize>,
}

impl ShortestPaths {
    fn unreached(n: usize) -> Self {
        ShortestPaths {
            distances: vec![f64::INFINITY; n],
            predecessors: vec![NO_PREDECESSOR; n],
        }
    }

    /// Walk predecessors back from `dst`. `None` when the walk does not
    /// reach `src` (unreachable destination or foreign predecessor table).
    pub fn reconstruct(&self, src: usize, dst: usize) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut at = dst;
        loop {
            path.push(at);
            if at == src {
                break;
            }
            at = *self.predecessors.get(at)?;
            if at == NO_PREDECESSOR || path.len() > self.predecessors.len() {
                return None;
            }
        }
        path.reverse();
        if path.first() == Some(&src) && path.last() == Some(&dst) {
            Some(path)
        } else {
            None
        }
    }
}

/// Min-heap keyed by `f64` weight, shared by Dijkstra and Prim.
pub(crate) struct WeightHeap<K> {
    heap: BinaryHeap<WeightEntry<K>>,
}

struct WeightEntry<K> {
    weight: f64,
    key: K,
}

impl<K: Ord> PartialEq for WeightEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.weight.total_cmp(&other.weight) == Ordering::Equal && self.key == other.key
    }
}

impl<K: Ord> Eq for WeightEntry<K> {}

impl<K: Ord> Ord for WeightEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the smallest weight.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord> PartialOrd for WeightEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> WeightHeap<K> {
    pub(crate) fn new() -> Self {
        WeightHeap {
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn push(&mut self, weight: f64, key: K) {
        self.heap.push(WeightEntry { weight, key });
    }

    pub(crate) fn pop(&mut self) -> Option<(f64, K)> {
        self.heap.pop().map(|e| (e.weight, e.key))
    }
}

impl<T> Graph<T> {
    /// Dijkstra from `src`. Requires non-negative edge weights; stale heap
    /// entries are skipped rather than decreased.
    pub fn dijkstra(&self, src: usize) -> Result<ShortestPaths, GraphError> {
        self.check(src)?;
        debug!(src, "dijkstra");
        let mut out = ShortestPaths::unreached(self.node_count());
        out.distances[src] = 0.0;
        let mut heap = WeightHeap::new();
        heap.push(0.0, src);
        while let Some((dist, node)) = heap.pop() {
            if dist > out.distances[node] {
                continue;
            }
            for edge in self.edges_from(node) {
                let candidate = dist + edge.weight;
                if candidate < out.distances[edge.to] {
                    out.distances[edge.to] = candidate;
                    out.predecessors[edge.to] = node;
                    heap.push(candidate, edge.to);
                }
            }
        }
        Ok(out)
    }

    /// Hop-count distances from `src` for unweighted graphs.
    pub fn bfs_distances(&self, src: usize) -> Result<ShortestPaths, GraphError> {
        self.check(src)?;
        let mut out = ShortestPaths::unreached(self.node_count());
        out.distances[src] = 0.0;
        let mut queue = VecDeque::from([src]);
        while let Some(u) = queue.pop_front() {
            for edge in self.edges_from(u) {
                if out.distances[edge.to].is_infinite() {
                    out.distances[edge.to] = out.distances[u] + 1.0;
                    out.predecessors[edge.to] = u;
                    queue.push_back(edge.to);
                }
            }
        }
        Ok(out)
    }

    /// Bellman-Ford from `src`: V-1 relaxation rounds with early
    /// termination, then one more pass to detect a negative cycle.
    pub fn bellman_ford(&self, src: usize) -> Result<ShortestPaths, GraphError> {
        self.check(src)?;
        debug!(src, "bellman-ford");
        let n = self.node_count();
        let mut out = ShortestPaths::unreached(n);
        out.distances[src] = 0.0;
        for _ in 1..n {
            let mut relaxed = false;
            for u in 0..n {
                if out.distances[u].is_infinite() {
                    continue;
                }
                for edge in self.edges_from(u) {
                    let candidate = out.distances[u] + edge.weight;
                    if candidate < out.distances[edge.to] {
                        out.distances[edge.to] = candidate;
                        out.predecessors[edge.to] = u;
                        relaxed = true;
                    }
                }
            }
            if !relaxed {
                break;
            }
        }
        for u in 0..n {
            if out.distances[u].is_infinite() {
                continue;
            }
            for edge in self.edges_from(u) {
                if out.distances[u] + edge.weight < out.distances[edge.to] {
                    return Err(GraphError::NegativeCycle);
                }
            }
        }
        Ok(out)
    }

    /// All-pairs distances in O(V^3). Parallel edges collapse to their
    /// minimum weight; unreachable pairs stay at positive infinity.
    pub fn floyd_warshall(&self) -> Vec<Vec<f64>> {
        let n = self.node_count();
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (u, row) in dist.iter_mut().enumerate() {
            row[u] = 0.0;
            for edge in self.edges_from(u) {
                if edge.weight < row[edge.to] {
                    row[edge.to] = edge.weight;
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                if dist[i][k].is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }
        dist
    }

    /// Strategy-selected single-pair shortest path.
    ///
    /// Returns `None` when `dst` is unreachable; raises
    /// [`GraphError::NegativeCycle`] when the Bellman-Ford fallback finds
    /// one.
    pub fn shortest_path(
        &self,
        src: usize,
        dst: usize,
    ) -> Result<Option<(Vec<usize>, f64)>, GraphError> {
        self.check(src)?;
        self.check(dst)?;
        let table = if !self.is_weighted() {
            self.bfs_distances(src)?
        } else if !self.has_negative_edges() {
            self.dijkstra(src)?
        } else {
            self.bellman_ford(src)?
        };
        if table.distances[dst].is_infinite() {
            return Ok(None);
        }
        Ok(table
            .reconstruct(src, dst)
            .map(|path| (path, table.distances[dst])))
    }
}
