//! Errors raised by the graph engine.

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;
use thiserror::Error;

/// Fatal errors from graph mutation, algorithms, and serialization.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GraphError {
    /// A node index is outside `0..node_count`.
    #[error("invalid node index {index} (graph has {count} nodes)")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::graph::invalid_node)))]
    InvalidNode { index: usize, count: usize },

    /// No edge exists between the given endpoints.
    #[error("no edge between {from} and {to}")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::graph::edge_not_found))
    )]
    EdgeNotFound { from: usize, to: usize },

    /// An acyclic-only operation found a cycle.
    #[error("graph contains a cycle; {operation} requires an acyclic graph")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::graph::cycle)))]
    CycleDetected { operation: &'static str },

    /// Bellman-Ford detected a cycle whose total weight is negative.
    #[error("graph contains a negative cycle")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(vargraph::graph::negative_cycle))
    )]
    NegativeCycle,

    /// Reading or writing a graph file failed.
    #[error("graph serialization failed: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::graph::serialize)))]
    Serialize(#[from] std::io::Error),

    /// A graph file line did not match the expected format.
    #[error("malformed graph file at line {line}: {detail}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(vargraph::graph::parse)))]
    Parse { line: usize, detail: String },
}

impl GraphError {
    pub(crate) fn invalid_node(index: usize, count: usize) -> Self {
        GraphError::InvalidNode { index, count }
    }
}
