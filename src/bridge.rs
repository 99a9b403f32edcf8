//! Shared-ownership bridge between the value core and the graph engine.
//!
//! [`GraphHandle`] wraps a [`Graph<Value>`] behind an atomically
//! reference-counted, interior-mutable cell. Cloning a graph-shaped
//! [`Value`] clones the handle, not the graph, so every copy observes the
//! same mutations; this is the one shape that breaks the otherwise-total
//! deep-copy invariant. The crate adds no internal synchronization beyond
//! the lock itself; embedders sharing a handle across threads get
//! last-writer-wins semantics.
//!
//! Shape validation happens at [`Value::as_graph`], which raises
//! `TypeMismatch` for a non-graph receiver. A poisoned lock surfaces as
//! [`ValueError::GraphState`]; algorithm failures surface as the wrapped
//! [`GraphError`](crate::graph::GraphError).
//!
//! Index results become integer lists; pair results become string-keyed
//! maps with fixed keys: `path`, `distance`, `weight`, `edges`,
//! `distances`, `predecessors`.
//!
//! ```
//! use vargraph::value::Value;
//!
//! let v = Value::graph(4);
//! let alias = v.clone();
//! let g = v.as_graph().unwrap();
//! g.add_edge(0, 1, 1.0, false).unwrap();
//! // The alias sees the mutation.
//! assert!(alias.as_graph().unwrap().has_edge(1, 0).unwrap());
//! ```

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::ValueError;
use crate::graph::paths::NO_PREDECESSOR;
use crate::graph::Graph;
use crate::value::Value;

/// Shared handle to one graph instance.
#[derive(Debug, Clone)]
pub struct GraphHandle {
    inner: Arc<RwLock<Graph<Value>>>,
}

impl Default for GraphHandle {
    fn default() -> Self {
        GraphHandle::new()
    }
}

impl GraphHandle {
    pub fn new() -> Self {
        GraphHandle::from_graph(Graph::new())
    }

    /// A handle over a fresh graph with `n` payload-less nodes.
    pub fn with_nodes(n: usize) -> Self {
        GraphHandle::from_graph(Graph::with_nodes(n))
    }

    pub fn from_graph(graph: Graph<Value>) -> Self {
        GraphHandle {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// True when both handles alias the same graph.
    pub fn same_graph(&self, other: &GraphHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Stable identity for hashing and storage ordering.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Graph<Value>>, ValueError> {
        self.inner
            .read()
            .map_err(|_| ValueError::GraphState("graph lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Graph<Value>>, ValueError> {
        self.inner
            .write()
            .map_err(|_| ValueError::GraphState("graph lock poisoned".into()))
    }

    // ========================================================================
    // Mutation & queries
    // ========================================================================

    pub fn node_count(&self) -> Result<usize, ValueError> {
        Ok(self.read()?.node_count())
    }

    pub fn edge_count(&self) -> Result<usize, ValueError> {
        Ok(self.read()?.edge_count())
    }

    /// Append a node; a `Value::None` payload stores as payload-less.
    pub fn add_node(&self, payload: Value) -> Result<usize, ValueError> {
        let payload = if payload.is_none() { None } else { Some(payload) };
        Ok(self.write()?.add_node(payload))
    }

    pub fn add_edge(&self, u: usize, v: usize, weight: f64, directed: bool) -> Result<(), ValueError> {
        Ok(self.write()?.add_edge(u, v, weight, directed)?)
    }

    /// Undirected edge with asymmetric weights.
    pub fn add_edge_asym(&self, u: usize, v: usize, w_uv: f64, w_vu: f64) -> Result<(), ValueError> {
        Ok(self.write()?.add_edge_asym(u, v, w_uv, w_vu)?)
    }

    pub fn remove_edge(&self, u: usize, v: usize, remove_mirror: bool) -> Result<(), ValueError> {
        Ok(self.write()?.remove_edge(u, v, remove_mirror)?)
    }

    pub fn remove_node(&self, u: usize) -> Result<(), ValueError> {
        Ok(self.write()?.remove_node(u)?)
    }

    pub fn set_edge_weight(&self, u: usize, v: usize, weight: f64) -> Result<(), ValueError> {
        Ok(self.write()?.set_edge_weight(u, v, weight)?)
    }

    pub fn edge_weight(&self, u: usize, v: usize) -> Result<Option<f64>, ValueError> {
        Ok(self.read()?.edge_weight(u, v)?)
    }

    pub fn has_edge(&self, u: usize, v: usize) -> Result<bool, ValueError> {
        Ok(self.read()?.has_edge(u, v)?)
    }

    pub fn out_degree(&self, u: usize) -> Result<usize, ValueError> {
        Ok(self.read()?.out_degree(u)?)
    }

    pub fn in_degree(&self, u: usize) -> Result<usize, ValueError> {
        Ok(self.read()?.in_degree(u)?)
    }

    /// Per-node metadata, `Value::None` when absent.
    pub fn metadata(&self, u: usize) -> Result<Value, ValueError> {
        Ok(self.read()?.payload(u)?.cloned().unwrap_or(Value::None))
    }

    pub fn set_metadata(&self, u: usize, payload: Value) -> Result<(), ValueError> {
        Ok(self.write()?.set_payload(u, payload)?)
    }

    /// Neighbor indices as an integer list.
    pub fn neighbors(&self, u: usize) -> Result<Value, ValueError> {
        Ok(index_list(self.read()?.neighbors(u)?))
    }

    // ========================================================================
    // Algorithms
    // ========================================================================

    pub fn dfs(&self, start: usize) -> Result<Value, ValueError> {
        Ok(index_list(self.read()?.dfs(start)?))
    }

    pub fn dfs_iterative(&self, start: usize) -> Result<Value, ValueError> {
        Ok(index_list(self.read()?.dfs_iterative(start)?))
    }

    pub fn bfs(&self, start: usize) -> Result<Value, ValueError> {
        Ok(index_list(self.read()?.bfs(start)?))
    }

    /// Strategy-selected shortest path as `{path, distance}`;
    /// `Value::None` when the destination is unreachable.
    pub fn shortest_path(&self, src: usize, dst: usize) -> Result<Value, ValueError> {
        match self.read()?.shortest_path(src, dst)? {
            Some((path, distance)) => Ok(Value::map([
                ("path", index_list(path)),
                ("distance", Value::F64(distance)),
            ])),
            None => Ok(Value::None),
        }
    }

    /// Single-source Dijkstra as `{distances, predecessors}`.
    pub fn dijkstra(&self, src: usize) -> Result<Value, ValueError> {
        Ok(paths_map(self.read()?.dijkstra(src)?))
    }

    /// Single-source Bellman-Ford as `{distances, predecessors}`.
    pub fn bellman_ford(&self, src: usize) -> Result<Value, ValueError> {
        Ok(paths_map(self.read()?.bellman_ford(src)?))
    }

    /// All-pairs distance matrix as a list of float lists.
    pub fn floyd_warshall(&self) -> Result<Value, ValueError> {
        let matrix = self.read()?.floyd_warshall();
        Ok(Value::list(matrix.into_iter().map(|row| {
            Value::list(row.into_iter().map(Value::F64))
        })))
    }

    pub fn has_cycle(&self) -> Result<bool, ValueError> {
        Ok(self.read()?.has_cycle())
    }

    pub fn topological_sort(&self) -> Result<Value, ValueError> {
        Ok(index_list(self.read()?.topological_sort()?))
    }

    pub fn connected_components(&self) -> Result<Value, ValueError> {
        Ok(Value::list(
            self.read()?
                .connected_components()
                .into_iter()
                .map(index_list),
        ))
    }

    pub fn is_connected(&self) -> Result<bool, ValueError> {
        Ok(self.read()?.is_connected())
    }

    pub fn strongly_connected_components(&self) -> Result<Value, ValueError> {
        Ok(Value::list(
            self.read()?
                .strongly_connected_components()
                .into_iter()
                .map(index_list),
        ))
    }

    /// Prim spanning tree as `{weight, edges}` with `[parent, node, weight]`
    /// edge triples.
    pub fn prim_mst(&self) -> Result<Value, ValueError> {
        let mst = self.read()?.prim_mst();
        Ok(Value::map([
            ("weight", Value::F64(mst.total_weight)),
            (
                "edges",
                Value::list(mst.edges.into_iter().map(|(parent, node, weight)| {
                    Value::list([
                        Value::I64(parent as i64),
                        Value::I64(node as i64),
                        Value::F64(weight),
                    ])
                })),
            ),
        ]))
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ValueError> {
        Ok(self.read()?.save(path)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ValueError> {
        Ok(GraphHandle::from_graph(Graph::load(path)?))
    }

    pub fn to_dot(&self) -> Result<String, ValueError> {
        // Render from a snapshot so the lock is released before payload
        // display runs. A payload may hold a handle aliasing this graph,
        // and re-locking on the same thread would deadlock.
        let snapshot = self.read()?.clone();
        Ok(snapshot.to_dot())
    }

    /// The engine's flat text form; backs the graph shape's display.
    pub fn describe(&self) -> Result<String, ValueError> {
        Ok(self.read()?.to_flat_string())
    }

    /// Run a closure against the underlying graph without cloning results.
    pub fn with_graph<R>(&self, f: impl FnOnce(&Graph<Value>) -> R) -> Result<R, ValueError> {
        Ok(f(&*self.read()?))
    }
}

fn index_list(indices: Vec<usize>) -> Value {
    Value::list(indices.into_iter().map(|i| Value::I64(i as i64)))
}

/// `{distances, predecessors}` with `-1` for the missing-predecessor
/// sentinel and infinity preserved for unreachable distances.
fn paths_map(table: crate::graph::ShortestPaths) -> Value {
    Value::map([
        (
            "distances",
            Value::list(table.distances.into_iter().map(Value::F64)),
        ),
        (
            "predecessors",
            Value::list(table.predecessors.into_iter().map(|p| {
                if p == NO_PREDECESSOR {
                    Value::I64(-1)
                } else {
                    Value::I64(p as i64)
                }
            })),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_mutations() {
        let v = Value::graph(3);
        let alias = v.clone();
        v.as_graph().unwrap().add_edge(0, 1, 1.0, true).unwrap();
        assert!(alias.as_graph().unwrap().has_edge(0, 1).unwrap());
        assert!(v.as_graph().unwrap().same_graph(&alias.as_graph().unwrap()));
    }

    #[test]
    fn fresh_graphs_are_distinct() {
        let a = Value::graph(1);
        let b = Value::graph(1);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn shortest_path_result_shape() {
        let g = GraphHandle::with_nodes(4);
        g.add_edge(0, 1, 1.0, false).unwrap();
        g.add_edge(1, 2, 2.0, false).unwrap();
        g.add_edge(0, 2, 5.0, false).unwrap();
        g.add_edge(2, 3, 1.0, false).unwrap();
        let result = g.shortest_path(0, 3).unwrap();
        assert_eq!(
            result.get("path").unwrap(),
            Some(&index_list(vec![0, 1, 2, 3]))
        );
        assert_eq!(result.get("distance").unwrap(), Some(&Value::F64(4.0)));
    }

    #[test]
    fn unreachable_shortest_path_is_none() {
        let g = GraphHandle::with_nodes(2);
        assert_eq!(g.shortest_path(0, 1).unwrap(), Value::None);
    }

    #[test]
    fn metadata_roundtrip() {
        let g = GraphHandle::with_nodes(1);
        assert_eq!(g.metadata(0).unwrap(), Value::None);
        g.set_metadata(0, Value::from("hub")).unwrap();
        assert_eq!(g.metadata(0).unwrap(), Value::from("hub"));
    }

    #[test]
    fn predecessor_sentinel_maps_to_minus_one() {
        let g = GraphHandle::with_nodes(2);
        g.add_edge(0, 1, 2.0, true).unwrap();
        let result = g.dijkstra(0).unwrap();
        let preds = result.get("predecessors").unwrap().unwrap().clone();
        assert_eq!(*preds.at(0).unwrap(), Value::I64(-1));
        assert_eq!(*preds.at(1).unwrap(), Value::I64(0));
    }

    #[test]
    fn wrong_shape_receiver_raises() {
        assert!(Value::from(1).as_graph().is_err());
    }
}
