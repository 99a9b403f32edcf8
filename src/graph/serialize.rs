//! Flat text serialization and dot export.
//!
//! The flat format is line oriented: the first line carries the node count,
//! every following line one edge as `from to weight directed` with
//! `directed` encoded as `0` or `1`. Undirected edges are written once,
//! when `from < to`; the loader re-adds each line with its recorded
//! directedness, which recreates the mirror records.

use std::fmt::Display;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Graph, GraphError};

impl<T> Graph<T> {
    /// Render the flat text form.
    pub fn to_flat_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.node_count());
        for u in 0..self.node_count() {
            for edge in self.edges_from(u) {
                if !edge.directed && u > edge.to {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "{} {} {} {}",
                    u,
                    edge.to,
                    edge.weight,
                    edge.directed as u8
                );
            }
        }
        out
    }

    /// Parse the flat text form into a payload-less graph.
    pub fn from_flat_string(text: &str) -> Result<Self, GraphError> {
        let mut lines = text.lines().enumerate();
        let (_, header) = lines.next().ok_or(GraphError::Parse {
            line: 1,
            detail: "empty input".into(),
        })?;
        let nodes: usize = header.trim().parse().map_err(|_| GraphError::Parse {
            line: 1,
            detail: format!("bad node count '{header}'"),
        })?;
        let mut graph = Graph::with_nodes(nodes);
        for (idx, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let parsed = (|| {
                let from: usize = fields.next()?.parse().ok()?;
                let to: usize = fields.next()?.parse().ok()?;
                let weight: f64 = fields.next()?.parse().ok()?;
                let directed = match fields.next()? {
                    "0" => false,
                    "1" => true,
                    _ => return None,
                };
                Some((from, to, weight, directed))
            })();
            let (from, to, weight, directed) = parsed.ok_or_else(|| GraphError::Parse {
                line: idx + 1,
                detail: format!("expected 'from to weight directed', got '{line}'"),
            })?;
            graph.add_edge(from, to, weight, directed)?;
        }
        Ok(graph)
    }

    /// Write the flat form to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        debug!(path = %path.as_ref().display(), "save graph");
        fs::write(path, self.to_flat_string())?;
        Ok(())
    }

    /// Read a flat-form file into a payload-less graph.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        debug!(path = %path.as_ref().display(), "load graph");
        let text = fs::read_to_string(path)?;
        Self::from_flat_string(&text)
    }
}

impl<T: Display> Graph<T> {
    /// Graphviz-style description.
    ///
    /// A graph with any directed edge renders as a `digraph`; its undirected
    /// edges appear once with a no-arrow marker. A purely undirected graph
    /// renders as an undirected `graph` with `--` connectors. Nodes with a
    /// payload are labeled by its display form.
    pub fn to_dot(&self) -> String {
        let any_directed = (0..self.node_count())
            .flat_map(|u| self.edges_from(u))
            .any(|e| e.directed);
        let mut out = String::new();
        let (header, connector) = if any_directed {
            ("digraph G {", "->")
        } else {
            ("graph G {", "--")
        };
        out.push_str(header);
        out.push('\n');
        for u in 0..self.node_count() {
            if let Ok(Some(payload)) = self.payload(u) {
                let _ = writeln!(out, "  {u} [label=\"{payload}\"];");
            }
        }
        for u in 0..self.node_count() {
            for edge in self.edges_from(u) {
                if !edge.directed && u > edge.to {
                    continue;
                }
                let suffix = if any_directed && !edge.directed {
                    ", dir=none"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "  {} {} {} [label=\"{}\"{}];",
                    u, connector, edge.to, edge.weight, suffix
                );
            }
        }
        out.push_str("}\n");
        out
    }
}
