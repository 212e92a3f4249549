use crate::config::EditorConfig;
use crate::geometry::{LabelPlacement, Point, Segment, label_placement};
use crate::graph::{EditorGraph, NodeSlot};
use crate::interaction::Interaction;
use crate::overlay::StepHighlight;

/// How a node should be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Plain,
    /// Armed for connection.
    Active,
    /// Being visited at the current traversal step.
    Current,
    /// Visited at an earlier traversal step.
    Visited,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    pub slot: NodeSlot,
    pub center: Point,
    pub radius: f32,
    pub label: String,
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    /// Position in the graph's edge list.
    pub index: usize,
    pub segment: Segment,
    pub label: LabelPlacement,
    pub text: String,
    pub visited: bool,
}

/// Everything to paint for one frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub edges: Vec<EdgeShape>,
    pub rubber_band: Option<Segment>,
    pub nodes: Vec<NodeShape>,
}

impl Scene {
    pub fn build(
        graph: &EditorGraph,
        interaction: &Interaction,
        config: &EditorConfig,
        highlight: Option<&StepHighlight>,
    ) -> Self {
        let active = interaction.active_node();

        let edges = graph
            .edges()
            .iter()
            .enumerate()
            .filter_map(|(index, edge)| {
                let p = graph.position(edge.a)?;
                let q = graph.position(edge.b)?;
                Some(EdgeShape {
                    index,
                    segment: Segment::new(p, q),
                    label: label_placement(p, q),
                    text: edge.weight.to_string(),
                    visited: highlight.is_some_and(|h| h.edge_visited(edge.a, edge.b)),
                })
            })
            .collect();

        let rubber_band = active
            .and_then(|slot| graph.position(slot))
            .zip(interaction.pointer())
            .map(|(from, to)| Segment::new(from, to));

        let nodes = graph
            .nodes()
            .map(|(slot, node)| {
                let role = if active == Some(slot) {
                    NodeRole::Active
                } else if highlight.is_some_and(|h| h.is_current(slot)) {
                    NodeRole::Current
                } else if highlight.is_some_and(|h| h.is_visited(slot)) {
                    NodeRole::Visited
                } else {
                    NodeRole::Plain
                };
                NodeShape {
                    slot,
                    center: node.position(),
                    radius: config.node.radius,
                    label: slot.to_string(),
                    role,
                }
            })
            .collect();

        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            edges,
            rubber_band,
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LabelSide, Vector};
    use crate::graph::WeightText;
    use crate::hit::Hit;
    use crate::interaction::Gesture;
    use crate::overlay::{EdgeRef, TraversalStep};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph() -> EditorGraph {
        let mut g = EditorGraph::new();
        let a = g.add_node(Point::new(100.0, 200.0));
        let b = g.add_node(Point::new(200.0, 100.0));
        let c = g.add_node(Point::new(300.0, 300.0));
        g.add_edge(a, b, WeightText::new("17"));
        g.add_edge(b, c, WeightText::new("4"));
        g
    }

    #[test]
    fn test_edges_follow_node_positions() {
        let mut g = graph();
        g.move_node(NodeSlot(1), Vector::new(0.0, 50.0));
        let scene = Scene::build(&g, &Interaction::new(), &EditorConfig::default(), None);

        let first = &scene.edges[0];
        assert_eq!(first.segment.to, Point::new(200.0, 150.0));
        assert_eq!(first.label.anchor, Point::new(150.0, 175.0));
        assert_eq!(first.label.side, LabelSide::BelowRight);
        assert_eq!(first.text, "17");
        assert_eq!(scene.rubber_band, None);
    }

    #[test]
    fn test_tombstones_are_not_drawn() {
        let mut g = graph();
        g.remove_node(NodeSlot(1));
        let scene = Scene::build(&g, &Interaction::new(), &EditorConfig::default(), None);

        let labels: Vec<&str> = scene.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "2"]);
        assert!(scene.edges.is_empty());
    }

    #[test]
    fn test_rubber_band_and_roles() {
        let g = graph();
        let config = EditorConfig::default();
        let mut interaction = Interaction::new();
        let mut rng = StdRng::seed_from_u64(0);
        let pointer = Point::new(400.0, 50.0);
        interaction.handle(Gesture::PointerMove { at: pointer }, Hit::Canvas, 0.0, &g, &config, &mut rng);
        interaction.handle(
            Gesture::Click { at: Point::new(100.0, 200.0) },
            Hit::Node(NodeSlot(0)),
            1.0,
            &g,
            &config,
            &mut rng,
        );

        let step = TraversalStep {
            current_node: vec![NodeSlot(2)],
            visited_nodes: vec![NodeSlot(1), NodeSlot(2)],
            visited_edges: vec![EdgeRef { n1: NodeSlot(2), n2: NodeSlot(1) }],
            ..TraversalStep::default()
        };
        let highlight = StepHighlight::from_step(&step);
        let scene = Scene::build(&g, &interaction, &config, Some(&highlight));

        assert_eq!(
            scene.rubber_band,
            Some(Segment::new(Point::new(100.0, 200.0), pointer))
        );
        let roles: Vec<NodeRole> = scene.nodes.iter().map(|n| n.role).collect();
        assert_eq!(roles, vec![NodeRole::Active, NodeRole::Visited, NodeRole::Current]);
        assert!(!scene.edges[0].visited);
        assert!(scene.edges[1].visited);
    }
}
