//! # Vargraph: a dynamic value core with an embedded graph engine
//!
//! Vargraph provides one dynamically-typed value abstraction, the kind of
//! representation a scripting-language interpreter keeps behind every
//! variable, embedded in statically-typed Rust, plus a general-purpose
//! weighted graph engine that can itself live inside a value.
//!
//! ## Core Concepts
//!
//! - **Value**: a closed sum type over fourteen runtime shapes, from the
//!   absence marker through numerics and strings to five container shapes
//!   and a graph handle
//! - **Promotion**: mixed-shape arithmetic resolves its result shape on a
//!   numeric ladder, with overflow-checked math underneath
//! - **Containers**: growable sequences, hash and ordered sets, hash and
//!   ordered string-keyed maps, all nesting arbitrarily, with slicing and
//!   a uniform iterator
//! - **Graph**: adjacency-list storage with traversal, shortest paths,
//!   spanning trees, components, and cycle analysis
//! - **Bridge**: the shared-ownership handle that makes a graph one more
//!   value shape
//!
//! ## Quick Start
//!
//! ### Dynamic arithmetic
//!
//! ```
//! use vargraph::value::{BinOp, Value};
//!
//! // Mixed shapes promote; results narrow to the smallest fit.
//! let sum = Value::from(2).bin_op(BinOp::Add, &Value::from(3i64)).unwrap();
//! assert_eq!(sum, Value::from(5));
//!
//! // Same-width overflow raises instead of wrapping.
//! let big = Value::from(2_000_000_000);
//! assert!(big.bin_op(BinOp::Add, &big).is_err());
//!
//! // Strings force string semantics.
//! let banner = Value::from("=").bin_op(BinOp::Mul, &Value::from(5)).unwrap();
//! assert_eq!(banner, Value::from("====="));
//! ```
//!
//! ### Containers
//!
//! ```
//! use vargraph::{vlist, vmap};
//! use vargraph::value::{BinOp, Value};
//!
//! let mut v = vlist![3, 1, 2];
//! v.sort().unwrap();
//! assert_eq!(v, vlist![1, 2, 3]);
//! assert_eq!(v.slice(None, None, -1).unwrap(), vlist![3, 2, 1]);
//!
//! // Map union: the right-hand side wins key collisions.
//! let merged = vmap!{"a" => 1}.bin_op(BinOp::Or, &vmap!{"a" => 2, "b" => 3}).unwrap();
//! assert_eq!(merged, vmap!{"a" => 2, "b" => 3});
//! ```
//!
//! ### Graphs inside values
//!
//! ```
//! use vargraph::value::Value;
//!
//! let v = Value::graph(4);
//! let g = v.as_graph().unwrap();
//! g.add_edge(0, 1, 1.0, false).unwrap();
//! g.add_edge(1, 2, 2.0, false).unwrap();
//! g.add_edge(0, 2, 5.0, false).unwrap();
//! g.add_edge(2, 3, 1.0, false).unwrap();
//!
//! let best = g.shortest_path(0, 3).unwrap();
//! assert_eq!(best.get("distance").unwrap(), Some(&Value::from(4.0)));
//!
//! // Copies of a graph-shaped value alias the same graph.
//! let alias = v.clone();
//! assert_eq!(alias.as_graph().unwrap().node_count().unwrap(), 4);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`errors::ValueError`] or
//! [`graph::GraphError`]; nothing panics, retries, or logs on an error
//! path. With the `diagnostics` feature both enums derive
//! `miette::Diagnostic` for rich reports.

pub mod bridge;
pub mod checked;
pub mod errors;
pub mod graph;
pub mod macros;
pub mod promote;
pub mod telemetry;
pub mod value;

pub use bridge::GraphHandle;
pub use errors::ValueError;
pub use graph::{Graph, GraphError};
pub use value::{BinOp, Tag, Value};
