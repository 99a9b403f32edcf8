//! General-purpose weighted graph engine.
//!
//! [`Graph`] stores `N` nodes indexed `0..N-1` with per-node adjacency lists
//! of directed or undirected weighted edges, plus an optional payload per
//! node. The engine never depends on the value core; the bridge
//! (`crate::bridge`) instantiates it with `Value` payloads.
//!
//! Three aggregates are maintained incrementally by every mutation so the
//! shortest-path front door can pick a strategy without rescanning:
//! the count of non-zero-weight edge records, the count of negative-weight
//! records, and whether the most recently added edge was directed.
//!
//! An undirected edge `(u, v)` keeps matching records in `edges[u]` and
//! `edges[v]`; removing one side without its mirror is an explicit,
//! documented invariant break.
//!
//! ```
//! use vargraph::graph::Graph;
//!
//! let mut g: Graph<()> = Graph::with_nodes(3);
//! g.add_edge(0, 1, 1.0, false).unwrap();
//! g.add_edge(1, 2, 2.0, false).unwrap();
//! assert!(g.has_edge(1, 0).unwrap());
//! assert_eq!(g.shortest_path(0, 2).unwrap().unwrap().1, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

mod errors;
pub mod paths;
pub mod serialize;
pub mod structure;
pub mod traversal;

pub use errors::GraphError;
pub use paths::ShortestPaths;
pub use structure::MstResult;

/// One adjacency record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination node index.
    pub to: usize,
    pub weight: f64,
    /// Directed records exist only in the source node's list; undirected
    /// records have a mirror.
    pub directed: bool,
}

/// Adjacency-list graph with optional per-node payloads.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    payloads: Vec<Option<T>>,
    edges: Vec<Vec<Edge>>,
    /// Non-zero-weight record count.
    weighted_records: usize,
    /// Negative-weight record count.
    negative_records: usize,
    last_edge_directed: bool,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Graph::new()
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Graph {
            payloads: Vec::new(),
            edges: Vec::new(),
            weighted_records: 0,
            negative_records: 0,
            last_edge_directed: false,
        }
    }

    /// A graph with `n` payload-less nodes and no edges.
    pub fn with_nodes(n: usize) -> Self {
        let mut g = Graph::new();
        for _ in 0..n {
            g.add_node(None);
        }
        g
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Logical edge count: undirected pairs count once.
    pub fn edge_count(&self) -> usize {
        let records: usize = self.edges.iter().map(Vec::len).sum();
        let undirected: usize = self
            .edges
            .iter()
            .flatten()
            .filter(|e| !e.directed)
            .count();
        records - undirected / 2
    }

    /// True when any edge record carries a non-zero weight.
    pub fn is_weighted(&self) -> bool {
        self.weighted_records > 0
    }

    /// True when any edge record carries a negative weight.
    pub fn has_negative_edges(&self) -> bool {
        self.negative_records > 0
    }

    /// Whether the most recently added edge was directed.
    pub fn last_edge_directed(&self) -> bool {
        self.last_edge_directed
    }

    pub(crate) fn check(&self, index: usize) -> Result<(), GraphError> {
        if index < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::invalid_node(index, self.node_count()))
        }
    }

    pub(crate) fn edges_from(&self, u: usize) -> &[Edge] {
        &self.edges[u]
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a node; returns its index.
    pub fn add_node(&mut self, payload: Option<T>) -> usize {
        self.payloads.push(payload);
        self.edges.push(Vec::new());
        self.edges.len() - 1
    }

    fn track_insert(&mut self, weight: f64) {
        if weight != 0.0 {
            self.weighted_records += 1;
        }
        if weight < 0.0 {
            self.negative_records += 1;
        }
    }

    fn track_remove(&mut self, weight: f64) {
        if weight != 0.0 {
            self.weighted_records -= 1;
        }
        if weight < 0.0 {
            self.negative_records -= 1;
        }
    }

    /// Add an edge. Undirected edges also record the mirror `(v, u)` with
    /// the same weight.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64, directed: bool) -> Result<(), GraphError> {
        self.add_edge_with_mirror_weight(u, v, weight, weight, directed)
    }

    /// Undirected edge with asymmetric weights: `w_uv` on `u -> v`, `w_vu`
    /// on the mirror.
    pub fn add_edge_asym(&mut self, u: usize, v: usize, w_uv: f64, w_vu: f64) -> Result<(), GraphError> {
        self.add_edge_with_mirror_weight(u, v, w_uv, w_vu, false)
    }

    fn add_edge_with_mirror_weight(
        &mut self,
        u: usize,
        v: usize,
        w_uv: f64,
        w_vu: f64,
        directed: bool,
    ) -> Result<(), GraphError> {
        self.check(u)?;
        self.check(v)?;
        debug!(u, v, weight = w_uv, directed, "add edge");
        self.edges[u].push(Edge {
            to: v,
            weight: w_uv,
            directed,
        });
        self.track_insert(w_uv);
        if !directed && u != v {
            self.edges[v].push(Edge {
                to: u,
                weight: w_vu,
                directed,
            });
            self.track_insert(w_vu);
        }
        self.last_edge_directed = directed;
        Ok(())
    }

    /// Remove the first matching `u -> v` record and, when it is undirected
    /// and `remove_mirror` is set, its `v -> u` mirror. Passing
    /// `remove_mirror = false` for an undirected edge deliberately breaks the
    /// mirror invariant.
    pub fn remove_edge(&mut self, u: usize, v: usize, remove_mirror: bool) -> Result<(), GraphError> {
        self.check(u)?;
        self.check(v)?;
        let pos = self.edges[u]
            .iter()
            .position(|e| e.to == v)
            .ok_or(GraphError::EdgeNotFound { from: u, to: v })?;
        let removed = self.edges[u].remove(pos);
        self.track_remove(removed.weight);
        if !removed.directed && remove_mirror {
            if let Some(mirror) = self.edges[v].iter().position(|e| e.to == u && !e.directed) {
                let m = self.edges[v].remove(mirror);
                self.track_remove(m.weight);
            }
        }
        Ok(())
    }

    /// Remove a node and renumber every higher index down by one. Callers
    /// must not retain indices across this call.
    pub fn remove_node(&mut self, u: usize) -> Result<(), GraphError> {
        self.check(u)?;
        for record in self.edges[u].drain(..).collect::<Vec<_>>() {
            self.track_remove(record.weight);
        }
        self.payloads.remove(u);
        self.edges.remove(u);
        for list in &mut self.edges {
            let mut i = 0;
            while i < list.len() {
                if list[i].to == u {
                    let gone = list.remove(i);
                    self.weighted_records -= (gone.weight != 0.0) as usize;
                    self.negative_records -= (gone.weight < 0.0) as usize;
                } else {
                    if list[i].to > u {
                        list[i].to -= 1;
                    }
                    i += 1;
                }
            }
        }
        Ok(())
    }

    /// Update the weight of the first `u -> v` record (and its undirected
    /// mirror).
    pub fn set_edge_weight(&mut self, u: usize, v: usize, weight: f64) -> Result<(), GraphError> {
        self.check(u)?;
        self.check(v)?;
        let pos = self.edges[u]
            .iter()
            .position(|e| e.to == v)
            .ok_or(GraphError::EdgeNotFound { from: u, to: v })?;
        let old = self.edges[u][pos].weight;
        let directed = self.edges[u][pos].directed;
        self.track_remove(old);
        self.edges[u][pos].weight = weight;
        self.track_insert(weight);
        if !directed {
            if let Some(mirror) = self.edges[v].iter().position(|e| e.to == u && !e.directed) {
                let m_old = self.edges[v][mirror].weight;
                self.track_remove(m_old);
                self.edges[v][mirror].weight = weight;
                self.track_insert(weight);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn has_edge(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check(u)?;
        self.check(v)?;
        Ok(self.edges[u].iter().any(|e| e.to == v))
    }

    /// Weight of the first `u -> v` record, if any.
    pub fn edge_weight(&self, u: usize, v: usize) -> Result<Option<f64>, GraphError> {
        self.check(u)?;
        self.check(v)?;
        Ok(self.edges[u].iter().find(|e| e.to == v).map(|e| e.weight))
    }

    /// Destination indices of every record leaving `u`.
    pub fn neighbors(&self, u: usize) -> Result<Vec<usize>, GraphError> {
        self.check(u)?;
        Ok(self.edges[u].iter().map(|e| e.to).collect())
    }

    pub fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check(u)?;
        Ok(self.edges[u].len())
    }

    /// Records arriving at `u`. O(V + E) scan.
    pub fn in_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check(u)?;
        Ok(self
            .edges
            .iter()
            .flatten()
            .filter(|e| e.to == u)
            .count())
    }

    pub fn payload(&self, u: usize) -> Result<Option<&T>, GraphError> {
        self.check(u)?;
        Ok(self.payloads[u].as_ref())
    }

    pub fn payload_mut(&mut self, u: usize) -> Result<Option<&mut T>, GraphError> {
        self.check(u)?;
        Ok(self.payloads[u].as_mut())
    }

    pub fn set_payload(&mut self, u: usize, payload: T) -> Result<(), GraphError> {
        self.check(u)?;
        self.payloads[u] = Some(payload);
        Ok(())
    }
}
