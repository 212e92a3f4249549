//! The editable graph: nodes in fixed slots, edges referring to slots.
//!
//! Removing a node empties its slot instead of shifting later nodes, so
//! every edge (and every id already handed to a collaborator) keeps pointing
//! at the same node for the life of the graph.

use crate::config::WeightSettings;
use crate::geometry::{Point, Vector};
use rand::Rng;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

// ------------------------------------------------------------------
// Identity
// ------------------------------------------------------------------

/// Index of a node slot. Assigned on insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeSlot(pub usize);

impl NodeSlot {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Node ids travel as strings ("3") because the traversal service keys its
// node maps by id.
impl Serialize for NodeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotVisitor;

        impl Visitor<'_> for SlotVisitor {
            type Value = NodeSlot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a node id as a string or unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeSlot, E> {
                usize::try_from(v)
                    .map(NodeSlot)
                    .map_err(|_| E::custom(format!("node id {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeSlot, E> {
                v.trim()
                    .parse::<usize>()
                    .map(NodeSlot)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SlotVisitor)
    }
}

// ------------------------------------------------------------------
// Nodes and edges
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Where the node was created; never changes.
    pub base: Point,
    /// Accumulated drag translation.
    pub offset: Vector,
}

impl Node {
    pub fn new(base: Point) -> Self {
        Self {
            base,
            offset: Vector::ZERO,
        }
    }

    /// Rendered position: base plus drag offset.
    pub fn position(&self) -> Point {
        self.base + self.offset
    }
}

/// Edge weight exactly as typed.
///
/// Kept as text so half-typed input ("", "-", "4.") survives until the
/// graph is submitted; numeric interpretation happens only in
/// [`WeightText::value`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightText(String);

impl WeightText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_number(value: f64) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value, or `None` when the text is not a finite number.
    pub fn value(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// A random integer weight within the configured range, for new edges.
pub fn random_weight<R: Rng + ?Sized>(settings: &WeightSettings, rng: &mut R) -> WeightText {
    let lo = settings.min.min(settings.max);
    let hi = settings.max.max(settings.min);
    WeightText(rng.random_range(lo..=hi).to_string())
}

impl fmt::Display for WeightText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Undirected connection between two slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub a: NodeSlot,
    pub b: NodeSlot,
    pub weight: WeightText,
}

impl Edge {
    pub fn touches(&self, slot: NodeSlot) -> bool {
        self.a == slot || self.b == slot
    }

    /// True if this edge joins `x` and `y`, in either direction.
    pub fn connects(&self, x: NodeSlot, y: NodeSlot) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

// ------------------------------------------------------------------
// Graph store
// ------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorGraph {
    slots: Vec<Option<Node>>,
    edges: Vec<Edge>,
}

impl EditorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at `base` with no drag offset.
    pub fn add_node(&mut self, base: Point) -> NodeSlot {
        let slot = NodeSlot(self.slots.len());
        self.slots.push(Some(Node::new(base)));
        log::trace!("added node {slot} at ({}, {})", base.x, base.y);
        slot
    }

    /// Append an empty slot, keeping later ids aligned with a sparse source.
    pub(crate) fn push_tombstone(&mut self) {
        self.slots.push(None);
    }

    /// Empty the slot and drop every edge touching it.
    ///
    /// Returns `false` without mutating anything when the slot is already
    /// empty or was never assigned.
    pub fn remove_node(&mut self, slot: NodeSlot) -> bool {
        let Some(entry) = self.slots.get_mut(slot.index()) else {
            return false;
        };
        if entry.take().is_none() {
            log::debug!("node {slot} already removed");
            return false;
        }

        let incident: BTreeSet<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.touches(slot))
            .map(|(idx, _)| idx)
            .collect();
        let dropped = self.remove_edges(&incident);
        log::trace!("removed node {slot} and {dropped} incident edge(s)");
        true
    }

    /// Connect two live, distinct, not-yet-connected slots.
    ///
    /// Returns the new edge's position, or `None` if the edge was refused.
    pub fn add_edge(
        &mut self,
        a: NodeSlot,
        b: NodeSlot,
        weight: WeightText,
    ) -> Option<usize> {
        if a == b {
            log::debug!("refused self loop on node {a}");
            return None;
        }
        if !self.is_live(a) || !self.is_live(b) {
            log::debug!("refused edge {a}-{b}: endpoint is not a live node");
            return None;
        }
        if let Some(existing) = self.find_edge(a, b) {
            log::debug!("refused edge {a}-{b}: already present at {existing}");
            return None;
        }
        self.edges.push(Edge { a, b, weight });
        Some(self.edges.len() - 1)
    }

    /// Remove the edges at the given positions. Remaining edges keep their
    /// relative order. Returns how many edges were removed.
    pub fn remove_edges(&mut self, positions: &BTreeSet<usize>) -> usize {
        if positions.is_empty() {
            return 0;
        }
        let before = self.edges.len();
        let mut idx = 0;
        self.edges.retain(|_| {
            let keep = !positions.contains(&idx);
            idx += 1;
            keep
        });
        before - self.edges.len()
    }

    /// Replace an edge's weight text if it is shorter than `cap` characters.
    pub fn set_edge_weight(&mut self, edge: usize, raw: &str, cap: usize) -> bool {
        if raw.chars().count() >= cap {
            log::debug!("refused weight {raw:?} for edge {edge}: cap is {cap}");
            return false;
        }
        match self.edges.get_mut(edge) {
            Some(e) if e.weight.as_str() != raw => {
                e.weight = WeightText::new(raw);
                true
            }
            _ => false,
        }
    }

    /// Shift a node's drag offset. The base position is untouched.
    pub fn move_node(&mut self, slot: NodeSlot, delta: Vector) -> bool {
        if delta == Vector::ZERO {
            return false;
        }
        match self.node_mut(slot) {
            Some(node) => {
                node.offset += delta;
                true
            }
            None => false,
        }
    }

    // --------------------------------------------------------------
    // Queries
    // --------------------------------------------------------------

    pub fn node(&self, slot: NodeSlot) -> Option<&Node> {
        self.slots.get(slot.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: NodeSlot) -> Option<&mut Node> {
        self.slots.get_mut(slot.index()).and_then(Option::as_mut)
    }

    pub fn is_live(&self, slot: NodeSlot) -> bool {
        self.node(slot).is_some()
    }

    /// Live nodes in slot order; tombstones are skipped.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = (NodeSlot, &Node)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|node| (NodeSlot(idx), node)))
    }

    pub fn edge(&self, position: usize) -> Option<&Edge> {
        self.edges.get(position)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Position of the edge joining `a` and `b`, in either direction.
    pub fn find_edge(&self, a: NodeSlot, b: NodeSlot) -> Option<usize> {
        self.edges.iter().position(|edge| edge.connects(a, b))
    }

    /// Rendered position of a live node.
    pub fn position(&self, slot: NodeSlot) -> Option<Point> {
        self.node(slot).map(Node::position)
    }

    /// Number of slots ever assigned, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn w(raw: &str) -> WeightText {
        WeightText::new(raw)
    }

    fn three_nodes() -> (EditorGraph, NodeSlot, NodeSlot, NodeSlot) {
        let mut g = EditorGraph::new();
        let a = g.add_node(Point::new(100.0, 100.0));
        let b = g.add_node(Point::new(200.0, 100.0));
        let c = g.add_node(Point::new(150.0, 200.0));
        (g, a, b, c)
    }

    #[test]
    fn test_add_node_appends_with_zero_offset() {
        let mut g = EditorGraph::new();
        let a = g.add_node(Point::new(50.0, 75.0));
        let b = g.add_node(Point::new(10.0, 10.0));

        assert_eq!(a, NodeSlot(0));
        assert_eq!(b, NodeSlot(1));
        let node = g.node(a).unwrap();
        assert_eq!(node.base, Point::new(50.0, 75.0));
        assert_eq!(node.offset, Vector::ZERO);
    }

    #[test]
    fn test_remove_node_keeps_other_slots() {
        let (mut g, a, b, c) = three_nodes();
        assert!(g.remove_node(b));

        assert!(!g.is_live(b));
        assert_eq!(g.slot_count(), 3);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.position(c), Some(Point::new(150.0, 200.0)));
        let live: Vec<NodeSlot> = g.nodes().map(|(slot, _)| slot).collect();
        assert_eq!(live, vec![a, c]);

        // a new node never reuses the emptied slot
        let d = g.add_node(Point::new(1.0, 1.0));
        assert_eq!(d, NodeSlot(3));
    }

    #[test]
    fn test_remove_node_cascades_to_incident_edges() {
        let (mut g, a, b, c) = three_nodes();
        g.add_edge(a, b, w("1"));
        g.add_edge(b, c, w("2"));
        g.add_edge(a, c, w("3"));

        g.remove_node(b);

        assert_eq!(g.edge_count(), 1);
        let edge = g.edge(0).unwrap();
        assert!(edge.connects(c, a));
        assert_eq!(edge.weight, w("3"));
        for edge in g.edges() {
            assert!(g.is_live(edge.a) && g.is_live(edge.b));
        }
    }

    #[test]
    fn test_remove_node_twice_is_idempotent() {
        let (mut g, a, b, _) = three_nodes();
        g.add_edge(a, b, w("5"));
        assert!(g.remove_node(a));
        let after_first = g.clone();

        assert!(!g.remove_node(a));
        assert_eq!(g, after_first);
        assert!(!g.remove_node(NodeSlot(42)));
    }

    #[test]
    fn test_self_loop_is_refused() {
        let (mut g, a, _, _) = three_nodes();
        assert_eq!(g.add_edge(a, a, w("1")), None);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_edge_keeps_original_weight() {
        let (mut g, a, b, _) = three_nodes();
        assert_eq!(g.add_edge(a, b, w("10")), Some(0));
        assert_eq!(g.add_edge(a, b, w("20")), None);
        assert_eq!(g.add_edge(b, a, w("30")), None);

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0).unwrap().weight, w("10"));
    }

    #[test]
    fn test_edge_to_removed_node_is_refused() {
        let (mut g, a, b, _) = three_nodes();
        g.remove_node(b);
        assert_eq!(g.add_edge(a, b, w("1")), None);
        assert_eq!(g.add_edge(a, NodeSlot(9), w("1")), None);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_edges_compacts_in_order() {
        let (mut g, a, b, c) = three_nodes();
        g.add_edge(a, b, w("1"));
        g.add_edge(b, c, w("2"));
        g.add_edge(a, c, w("3"));

        let removed = g.remove_edges(&BTreeSet::from([0, 2, 7]));

        assert_eq!(removed, 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0).unwrap().weight, w("2"));
    }

    #[test]
    fn test_weight_text_cap() {
        let (mut g, a, b, _) = three_nodes();
        g.add_edge(a, b, w("7"));

        assert!(g.set_edge_weight(0, "1234", 5));
        assert!(!g.set_edge_weight(0, "12345", 5));
        assert_eq!(g.edge(0).unwrap().weight, w("1234"));

        // partial input is stored verbatim
        assert!(g.set_edge_weight(0, "-", 5));
        assert_eq!(g.edge(0).unwrap().weight.as_str(), "-");
        assert!(g.set_edge_weight(0, "", 5));
        assert!(!g.set_edge_weight(3, "1", 5));
    }

    #[test]
    fn test_move_node_changes_offset_only() {
        let (mut g, a, _, _) = three_nodes();
        assert!(g.move_node(a, Vector::new(5.0, -3.0)));
        assert!(g.move_node(a, Vector::new(1.0, 1.0)));

        let node = g.node(a).unwrap();
        assert_eq!(node.base, Point::new(100.0, 100.0));
        assert_eq!(node.offset, Vector::new(6.0, -2.0));
        assert_eq!(node.position(), Point::new(106.0, 98.0));

        g.remove_node(a);
        assert!(!g.move_node(a, Vector::new(1.0, 1.0)));
    }

    #[test]
    fn test_weight_value_parsing() {
        assert_eq!(w("42").value(), Some(42.0));
        assert_eq!(w(" 2.5 ").value(), Some(2.5));
        assert_eq!(w("-").value(), None);
        assert_eq!(w("").value(), None);
        assert_eq!(w("inf").value(), None);
        assert_eq!(w("NaN").value(), None);
    }

    #[test]
    fn test_random_weight_in_range() {
        let settings = WeightSettings::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let weight = random_weight(&settings, &mut rng);
            let value = weight.value().unwrap();
            assert!((1.0..=100.0).contains(&value), "weight {} out of range", value);
            assert_eq!(value.fract(), 0.0);
        }
    }

    #[test]
    fn test_node_slot_serializes_as_string() {
        let json = serde_json::to_string(&NodeSlot(12)).unwrap();
        assert_eq!(json, "\"12\"");

        let from_str: NodeSlot = serde_json::from_str("\"7\"").unwrap();
        let from_int: NodeSlot = serde_json::from_str("7").unwrap();
        assert_eq!(from_str, NodeSlot(7));
        assert_eq!(from_int, NodeSlot(7));
        assert!(serde_json::from_str::<NodeSlot>("\"seven\"").is_err());
    }
}
