//! Step-by-step highlight playback for a depth-first traversal.
//!
//! The overlay is read-only with respect to the graph: it only answers
//! which nodes and edges to paint differently at the current step.

use crate::error::OverlayError;
use crate::graph::NodeSlot;
use crate::snapshot::GraphSnapshot;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

// ------------------------------------------------------------------
// Wire types
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalResult {
    pub steps: Vec<TraversalStep>,
    /// Nodes in the order the traversal finished visiting them.
    #[serde(default)]
    pub traversal_result: Vec<NodeSlot>,
    pub start_node: NodeSlot,
}

impl TraversalResult {
    pub fn from_json(json: &str) -> Result<Self, OverlayError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalStep {
    pub stack: Vec<StackEntry>,
    pub current_node: Vec<NodeSlot>,
    pub visited_nodes: Vec<NodeSlot>,
    pub visited_edges: Vec<EdgeRef>,
    pub description: String,
}

/// A pending node on the traversal stack and the node that pushed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: NodeSlot,
    #[serde(default, deserialize_with = "optional_slot")]
    pub from: Option<NodeSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRef {
    pub n1: NodeSlot,
    pub n2: NodeSlot,
}

// The start node is pushed with an empty or missing `from`.
fn optional_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NodeSlot>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Slot(NodeSlot),
        Other(serde_json::Value),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Slot(slot)) => Some(slot),
        Some(Raw::Other(_)) | None => None,
    })
}

// ------------------------------------------------------------------
// Highlight
// ------------------------------------------------------------------

/// Highlight sets for a single step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepHighlight {
    current: BTreeSet<NodeSlot>,
    visited: BTreeSet<NodeSlot>,
    edges: BTreeSet<(NodeSlot, NodeSlot)>,
}

fn unordered(a: NodeSlot, b: NodeSlot) -> (NodeSlot, NodeSlot) {
    if a <= b { (a, b) } else { (b, a) }
}

impl StepHighlight {
    pub fn from_step(step: &TraversalStep) -> Self {
        Self {
            current: step.current_node.iter().copied().collect(),
            visited: step.visited_nodes.iter().copied().collect(),
            edges: step
                .visited_edges
                .iter()
                .map(|e| unordered(e.n1, e.n2))
                .collect(),
        }
    }

    pub fn is_current(&self, slot: NodeSlot) -> bool {
        self.current.contains(&slot)
    }

    pub fn is_visited(&self, slot: NodeSlot) -> bool {
        self.visited.contains(&slot)
    }

    pub fn edge_visited(&self, a: NodeSlot, b: NodeSlot) -> bool {
        self.edges.contains(&unordered(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.visited.is_empty() && self.edges.is_empty()
    }
}

// ------------------------------------------------------------------
// Overlay
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TraversalOverlay {
    result: TraversalResult,
    /// Number of steps shown; 0 is the state before the first step.
    cursor: usize,
    graph_version: u64,
}

impl TraversalOverlay {
    /// Accept a result only if every node and edge it names exists in
    /// `snapshot`, including the start node and the visit order.
    pub fn load(result: TraversalResult, snapshot: &GraphSnapshot) -> Result<Self, OverlayError> {
        let (graph, index) = snapshot.to_petgraph();

        let summary = std::iter::once(result.start_node)
            .chain(result.traversal_result.iter().copied());
        for node in summary {
            if !index.contains_key(&node) {
                return Err(OverlayError::UnknownResultNode { node });
            }
        }

        for (step_idx, step) in result.steps.iter().enumerate() {
            let nodes = step
                .stack
                .iter()
                .flat_map(|entry| std::iter::once(entry.id).chain(entry.from))
                .chain(step.current_node.iter().copied())
                .chain(step.visited_nodes.iter().copied());
            for node in nodes {
                if !index.contains_key(&node) {
                    return Err(OverlayError::UnknownNode { step: step_idx, node });
                }
            }

            for edge in &step.visited_edges {
                let known = match (index.get(&edge.n1), index.get(&edge.n2)) {
                    (Some(&a), Some(&b)) => graph.find_edge(a, b).is_some(),
                    _ => false,
                };
                if !known {
                    return Err(OverlayError::UnknownEdge {
                        step: step_idx,
                        a: edge.n1,
                        b: edge.n2,
                    });
                }
            }
        }

        log::info!(
            "traversal from node {} loaded with {} steps",
            result.start_node,
            result.steps.len()
        );
        Ok(Self {
            result,
            cursor: 0,
            graph_version: 0,
        })
    }

    /// Record the graph version the result was validated against.
    pub fn at_graph_version(mut self, version: u64) -> Self {
        self.graph_version = version;
        self
    }

    pub fn graph_version(&self) -> u64 {
        self.graph_version
    }

    pub fn result(&self) -> &TraversalResult {
        &self.result
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.result.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.steps.is_empty()
    }

    pub fn step_forward(&mut self) -> bool {
        if self.cursor < self.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn step_backward(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The step currently shown, if playback has started.
    pub fn current_step(&self) -> Option<&TraversalStep> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.result.steps.get(idx))
    }

    pub fn highlight(&self) -> StepHighlight {
        self.current_step()
            .map(StepHighlight::from_step)
            .unwrap_or_default()
    }
}
