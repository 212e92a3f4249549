//! Graphs the editor can start from.

use crate::config::WeightSettings;
use crate::error::SnapshotError;
use crate::geometry::{Point, Vector};
use crate::graph::{EditorGraph, NodeSlot, WeightText, random_weight};
use crate::snapshot::GraphSnapshot;
use rand::Rng;

const STARTER_NODES: [(f32, f32); 4] = [(60.0, 50.0), (150.0, 90.0), (340.0, 90.0), (50.0, 240.0)];
const STARTER_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (1, 3)];

const DEMO_NODES: [(f32, f32); 11] = [
    (150.0, 125.0),
    (150.0, 225.0),
    (250.0, 300.0),
    (250.0, 125.0),
    (250.0, 225.0),
    (350.0, 225.0),
    (450.0, 225.0),
    (450.0, 125.0),
    (350.0, 125.0),
    (300.0, 25.0),
    (350.0, 300.0),
];
const DEMO_EDGES: [(usize, usize); 14] = [
    (0, 1),
    (0, 3),
    (0, 5),
    (1, 2),
    (1, 4),
    (1, 8),
    (2, 6),
    (2, 10),
    (3, 5),
    (3, 9),
    (4, 5),
    (6, 7),
    (7, 8),
    (8, 9),
];

fn build<R: Rng + ?Sized>(
    nodes: &[(f32, f32)],
    edges: &[(usize, usize)],
    shift: Vector,
    settings: &WeightSettings,
    rng: &mut R,
) -> EditorGraph {
    let mut graph = EditorGraph::new();
    for &(x, y) in nodes {
        graph.add_node(Point::new(x, y) + shift);
    }
    for &(a, b) in edges {
        let weight = random_weight(settings, rng);
        graph.add_edge(NodeSlot(a), NodeSlot(b), weight);
    }
    graph
}

/// The small sample shown when the editor opens: four nodes, three edges.
pub fn starter_graph<R: Rng + ?Sized>(settings: &WeightSettings, rng: &mut R) -> EditorGraph {
    build(&STARTER_NODES, &STARTER_EDGES, Vector::ZERO, settings, rng)
}

/// Eleven nodes and fourteen edges laid out for traversal playback,
/// translated by `center`.
pub fn traversal_demo_graph<R: Rng + ?Sized>(
    center: Vector,
    settings: &WeightSettings,
    rng: &mut R,
) -> EditorGraph {
    build(&DEMO_NODES, &DEMO_EDGES, center, settings, rng)
}

impl EditorGraph {
    /// Rebuild a graph from collaborator data, keeping its ids.
    ///
    /// Missing ids become tombstones so every listed node lands in the slot
    /// its id names. Ids at or past `max_slots` are refused before anything
    /// is allocated. Edges the graph would refuse are dropped.
    pub fn from_snapshot(
        snapshot: &GraphSnapshot,
        max_slots: usize,
    ) -> Result<Self, SnapshotError> {
        if let Some((&id, _)) = snapshot.nodes.last_key_value()
            && id.index() >= max_slots
        {
            return Err(SnapshotError::IdOutOfRange { id, limit: max_slots });
        }

        let mut graph = EditorGraph::new();
        for (&slot, node) in &snapshot.nodes {
            while graph.slot_count() < slot.index() {
                graph.push_tombstone();
            }
            graph.add_node(Point::new(node.x, node.y));
        }
        for edge in &snapshot.edges {
            let weight = WeightText::from_number(edge.weight);
            if graph.add_edge(edge.n1, edge.n2, weight).is_none() {
                log::warn!("dropped seed edge {}-{}", edge.n1, edge.n2);
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{SnapshotEdge, SnapshotNode};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_starter_graph() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = starter_graph(&WeightSettings::default(), &mut rng);

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.position(NodeSlot(2)), Some(Point::new(340.0, 90.0)));
        assert!(g.find_edge(NodeSlot(3), NodeSlot(1)).is_some());
    }

    #[test]
    fn test_demo_graph_is_shifted() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = traversal_demo_graph(Vector::new(10.0, 20.0), &WeightSettings::default(), &mut rng);

        assert_eq!(g.node_count(), 11);
        assert_eq!(g.edge_count(), 14);
        assert_eq!(g.position(NodeSlot(9)), Some(Point::new(310.0, 45.0)));
    }

    #[test]
    fn test_from_snapshot_preserves_sparse_ids() {
        let mut snapshot = GraphSnapshot::default();
        snapshot.nodes.insert(NodeSlot(0), SnapshotNode { x: 1.0, y: 1.0 });
        snapshot.nodes.insert(NodeSlot(3), SnapshotNode { x: 2.0, y: 2.0 });
        snapshot.edges.push(SnapshotEdge { n1: NodeSlot(0), n2: NodeSlot(3), weight: 8.0 });
        snapshot.edges.push(SnapshotEdge { n1: NodeSlot(0), n2: NodeSlot(1), weight: 2.0 });

        let g = EditorGraph::from_snapshot(&snapshot, 100).unwrap();

        assert_eq!(g.slot_count(), 4);
        assert_eq!(g.node_count(), 2);
        assert!(!g.is_live(NodeSlot(1)));
        assert_eq!(g.position(NodeSlot(3)), Some(Point::new(2.0, 2.0)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0).unwrap().weight.as_str(), "8");
        assert_eq!(g.snapshot().unwrap(), snapshot_without_bad_edge(&snapshot));
    }

    fn snapshot_without_bad_edge(snapshot: &GraphSnapshot) -> GraphSnapshot {
        GraphSnapshot {
            nodes: snapshot.nodes.clone(),
            edges: snapshot.edges[..1].to_vec(),
        }
    }

    #[test]
    fn test_from_snapshot_refuses_huge_ids() {
        let snapshot = GraphSnapshot::from_json(
            r#"{ "nodes": { "20000000": { "x": 1, "y": 2 } }, "edges": [] }"#,
        )
        .unwrap();

        let err = EditorGraph::from_snapshot(&snapshot, 10_000).unwrap_err();
        assert!(
            matches!(
                err,
                SnapshotError::IdOutOfRange { id: NodeSlot(20_000_000), limit: 10_000 }
            ),
            "unexpected error {:?}",
            err
        );
    }

    #[test]
    fn test_from_snapshot_accepts_last_slot_below_limit() {
        let mut snapshot = GraphSnapshot::default();
        snapshot.nodes.insert(NodeSlot(9), SnapshotNode { x: 0.0, y: 0.0 });

        let g = EditorGraph::from_snapshot(&snapshot, 10).unwrap();
        assert_eq!(g.slot_count(), 10);
        assert!(EditorGraph::from_snapshot(&snapshot, 9).is_err());
    }
}
