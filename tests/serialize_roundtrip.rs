//! File-backed persistence of graphs, through the engine and the bridge.

use vargraph::graph::{Graph, GraphError};
use vargraph::value::Value;
use vargraph::GraphHandle;

#[test]
fn save_then_load_restores_the_adjacency() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.graph");

    let mut g: Graph<()> = Graph::with_nodes(4);
    g.add_edge(0, 1, 1.0, false).unwrap();
    g.add_edge(1, 2, 2.0, false).unwrap();
    g.add_edge(0, 2, 5.0, false).unwrap();
    g.add_edge(2, 3, 1.0, false).unwrap();
    g.save(&path).unwrap();

    let back: Graph<()> = Graph::load(&path).unwrap();
    assert_eq!(back.node_count(), 4);
    assert_eq!(back.edge_count(), 4);
    assert!(back.has_edge(2, 1).unwrap());
    assert!(back.is_weighted());

    // The restored graph routes identically.
    let (path_nodes, dist) = back.shortest_path(0, 3).unwrap().unwrap();
    assert_eq!(path_nodes, vec![0, 1, 2, 3]);
    assert_eq!(dist, 4.0);
}

#[test]
fn directedness_survives_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.graph");

    let mut g: Graph<()> = Graph::with_nodes(3);
    g.add_edge(0, 1, 1.0, true).unwrap();
    g.add_edge(1, 2, -3.5, false).unwrap();
    g.save(&path).unwrap();

    let back: Graph<()> = Graph::load(&path).unwrap();
    assert!(back.has_edge(0, 1).unwrap());
    assert!(!back.has_edge(1, 0).unwrap());
    assert!(back.has_edge(2, 1).unwrap());
    assert_eq!(back.edge_weight(2, 1).unwrap(), Some(-3.5));
    assert!(back.has_negative_edges());
}

#[test]
fn bridge_save_and_load_work_on_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("handle.graph");

    let g = GraphHandle::with_nodes(2);
    g.add_edge(0, 1, 2.0, true).unwrap();
    g.save(&path).unwrap();

    let back = GraphHandle::load(&path).unwrap();
    assert_eq!(back.node_count().unwrap(), 2);
    assert!(back.has_edge(0, 1).unwrap());
    // The loaded graph is a new instance, not an alias.
    assert!(!back.same_graph(&g));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.graph");
    assert!(matches!(
        Graph::<()>::load(&path),
        Err(GraphError::Serialize(_))
    ));
}

#[test]
fn flat_text_roundtrips_through_the_display_form() {
    let v = Value::graph(3);
    let g = v.as_graph().unwrap();
    g.add_edge(0, 2, 1.25, true).unwrap();

    let shown = format!("{v}");
    let back: Graph<()> = Graph::from_flat_string(&shown).unwrap();
    assert_eq!(back.node_count(), 3);
    assert_eq!(back.edge_weight(0, 2).unwrap(), Some(1.25));
}

#[test]
fn dot_export_through_the_bridge_labels_metadata() {
    let g = GraphHandle::new();
    let a = g.add_node(Value::from("start")).unwrap();
    let b = g.add_node(Value::None).unwrap();
    g.add_edge(a, b, 1.0, true).unwrap();

    let dot = g.to_dot().unwrap();
    assert!(dot.starts_with("digraph G {"));
    assert!(dot.contains("label=\"start\""));
    assert!(dot.contains("0 -> 1"));
}
