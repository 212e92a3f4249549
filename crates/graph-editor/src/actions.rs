use crate::config::EditorConfig;
use crate::geometry::{Point, Vector};
use crate::graph::{EditorGraph, NodeSlot, WeightText};
use std::collections::BTreeSet;

/// Mutations that can be dispatched against the editor graph
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a node at a canvas position
    AddNode { at: Point },
    /// Tombstone a node and drop its edges
    RemoveNode { slot: NodeSlot },
    /// Connect two nodes
    AddEdge {
        a: NodeSlot,
        b: NodeSlot,
        weight: WeightText,
    },
    /// Remove edges by position
    RemoveEdges { positions: BTreeSet<usize> },
    /// Replace an edge's raw weight text
    SetEdgeWeight { edge: usize, raw: String },
    /// Shift a node's drag offset
    MoveNode { slot: NodeSlot, delta: Vector },
}

/// Apply a single action to the graph. Returns whether anything changed.
pub fn update(graph: &mut EditorGraph, config: &EditorConfig, action: Action) -> bool {
    match action {
        Action::AddNode { at } => {
            graph.add_node(at);
            true
        }
        Action::RemoveNode { slot } => graph.remove_node(slot),
        Action::AddEdge { a, b, weight } => graph.add_edge(a, b, weight).is_some(),
        Action::RemoveEdges { positions } => graph.remove_edges(&positions) > 0,
        Action::SetEdgeWeight { edge, raw } => {
            graph.set_edge_weight(edge, &raw, config.weights.text_cap)
        }
        Action::MoveNode { slot, delta } => graph.move_node(slot, delta),
    }
}
