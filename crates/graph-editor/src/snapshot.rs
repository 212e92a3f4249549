//! The serializable graph handed to the traversal service.
//!
//! Node ids are the editor's slot indices, written as strings. Tombstoned
//! slots are simply absent, so ids may be sparse; highlight sets returned
//! by the service use the same ids and need no translation.

use crate::error::SnapshotError;
use crate::graph::{EditorGraph, NodeSlot};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Rendered position of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub n1: NodeSlot,
    pub n2: NodeSlot,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: BTreeMap<NodeSlot, SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl EditorGraph {
    /// Capture live nodes and edges for submission.
    ///
    /// Weights are parsed here and nowhere earlier; text that is not a
    /// finite number fails the whole snapshot.
    pub fn snapshot(&self) -> Result<GraphSnapshot, SnapshotError> {
        let nodes = self
            .nodes()
            .map(|(slot, node)| {
                let p = node.position();
                (slot, SnapshotNode { x: p.x, y: p.y })
            })
            .collect();

        let edges = self
            .edges()
            .iter()
            .enumerate()
            .map(|(idx, edge)| -> Result<SnapshotEdge, SnapshotError> {
                let weight = edge.weight.value().ok_or_else(|| SnapshotError::InvalidWeight {
                    edge: idx,
                    raw: edge.weight.as_str().to_string(),
                })?;
                Ok(SnapshotEdge {
                    n1: edge.a,
                    n2: edge.b,
                    weight,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = GraphSnapshot { nodes, edges };
        log::info!(
            "snapshot taken: {} nodes, {} edges",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        Ok(snapshot)
    }
}

impl GraphSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an undirected petgraph graph with slots as node weights.
    ///
    /// Edges naming a node that is not in the snapshot are skipped.
    pub fn to_petgraph(&self) -> (UnGraph<NodeSlot, f64>, HashMap<NodeSlot, NodeIndex>) {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index = HashMap::with_capacity(self.nodes.len());
        for &slot in self.nodes.keys() {
            index.insert(slot, graph.add_node(slot));
        }
        for edge in &self.edges {
            match (index.get(&edge.n1), index.get(&edge.n2)) {
                (Some(&a), Some(&b)) => {
                    graph.add_edge(a, b, edge.weight);
                }
                _ => log::warn!(
                    "snapshot edge {}-{} names a missing node, skipped",
                    edge.n1,
                    edge.n2
                ),
            }
        }
        (graph, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Vector};
    use crate::graph::WeightText;
    use pretty_assertions::assert_eq;

    fn sample() -> EditorGraph {
        let mut g = EditorGraph::new();
        let a = g.add_node(Point::new(10.0, 20.0));
        let b = g.add_node(Point::new(30.0, 40.0));
        let c = g.add_node(Point::new(50.0, 60.0));
        g.add_edge(a, b, WeightText::new("12"));
        g.add_edge(b, c, WeightText::new("3.5"));
        g
    }

    #[test]
    fn test_snapshot_keeps_sparse_ids() {
        let mut g = sample();
        g.remove_node(NodeSlot(0));
        g.move_node(NodeSlot(2), Vector::new(1.0, -1.0));

        let snap = g.snapshot().unwrap();

        let ids: Vec<NodeSlot> = snap.nodes.keys().copied().collect();
        assert_eq!(ids, vec![NodeSlot(1), NodeSlot(2)]);
        assert_eq!(snap.nodes[&NodeSlot(2)], SnapshotNode { x: 51.0, y: 59.0 });
        assert_eq!(
            snap.edges,
            vec![SnapshotEdge { n1: NodeSlot(1), n2: NodeSlot(2), weight: 3.5 }]
        );
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut g = sample();
        g.remove_node(NodeSlot(2));
        let json = g.snapshot().unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "nodes": {
                    "0": { "x": 10.0, "y": 20.0 },
                    "1": { "x": 30.0, "y": 40.0 }
                },
                "edges": [ { "n1": "0", "n2": "1", "weight": 12.0 } ]
            })
        );
    }

    #[test]
    fn test_non_numeric_weight_fails_snapshot() {
        let mut g = sample();
        g.set_edge_weight(1, "4.", 5);
        assert!(g.snapshot().is_ok());

        g.set_edge_weight(1, "-", 5);
        let err = g.snapshot().unwrap_err();
        assert!(
            matches!(&err, SnapshotError::InvalidWeight { edge: 1, raw } if raw == "-"),
            "unexpected error {:?}",
            err
        );
    }

    #[test]
    fn test_from_json_accepts_numeric_ids() {
        let snap = GraphSnapshot::from_json(
            r#"{ "nodes": { "0": { "x": 1, "y": 2 }, "4": { "x": 3, "y": 4 } },
                 "edges": [ { "n1": 0, "n2": "4", "weight": 7 } ] }"#,
        )
        .unwrap();

        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.edges[0].n1, NodeSlot(0));
        assert_eq!(snap.edges[0].n2, NodeSlot(4));
    }

    #[test]
    fn test_to_petgraph() {
        let snap = sample().snapshot().unwrap();
        let (graph, index) = snap.to_petgraph();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let a = index[&NodeSlot(0)];
        let b = index[&NodeSlot(1)];
        assert!(graph.find_edge(b, a).is_some());
        assert!(graph.find_edge(a, index[&NodeSlot(2)]).is_none());
    }
}
