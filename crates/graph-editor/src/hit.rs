use crate::config::EditorConfig;
use crate::geometry::{Point, Segment};
use crate::graph::{EditorGraph, NodeSlot};

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Node(NodeSlot),
    /// Edge position in the graph's edge list.
    Edge(usize),
    Canvas,
}

/// Resolve a canvas point to the topmost element under it.
///
/// Nodes are painted over edges and later slots over earlier ones, so nodes
/// are tested first and both lists are walked from the end.
pub fn hit_test(graph: &EditorGraph, config: &EditorConfig, at: Point) -> Hit {
    let radius = config.node.radius;
    if let Some((slot, _)) = graph
        .nodes()
        .rev()
        .find(|(_, node)| node.position().distance(at) <= radius)
    {
        return Hit::Node(slot);
    }

    let reach = config.edge.hit_distance();
    let edge = graph.edges().iter().enumerate().rev().find(|(_, edge)| {
        match (graph.position(edge.a), graph.position(edge.b)) {
            (Some(p), Some(q)) => Segment::new(p, q).distance_to(at) <= reach,
            _ => false,
        }
    });
    match edge {
        Some((position, _)) => Hit::Edge(position),
        None => Hit::Canvas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightText;
    use crate::geometry::Vector;

    fn pair() -> EditorGraph {
        let mut g = EditorGraph::new();
        let a = g.add_node(Point::new(100.0, 100.0));
        let b = g.add_node(Point::new(200.0, 100.0));
        g.add_edge(a, b, WeightText::new("1"));
        g
    }

    #[test]
    fn test_hit_node_edge_canvas() {
        let g = pair();
        let cfg = EditorConfig::default();

        assert_eq!(hit_test(&g, &cfg, Point::new(105.0, 95.0)), Hit::Node(NodeSlot(0)));
        assert_eq!(hit_test(&g, &cfg, Point::new(150.0, 104.0)), Hit::Edge(0));
        assert_eq!(hit_test(&g, &cfg, Point::new(150.0, 110.0)), Hit::Canvas);
    }

    #[test]
    fn test_overlapping_nodes_pick_latest_slot() {
        let mut g = EditorGraph::new();
        g.add_node(Point::new(100.0, 100.0));
        g.add_node(Point::new(110.0, 100.0));
        let cfg = EditorConfig::default();

        assert_eq!(hit_test(&g, &cfg, Point::new(105.0, 100.0)), Hit::Node(NodeSlot(1)));
    }

    #[test]
    fn test_hit_follows_drag_offset_and_skips_tombstones() {
        let mut g = pair();
        let cfg = EditorConfig::default();
        g.move_node(NodeSlot(1), Vector::new(0.0, 100.0));

        assert_eq!(hit_test(&g, &cfg, Point::new(200.0, 200.0)), Hit::Node(NodeSlot(1)));
        assert_eq!(hit_test(&g, &cfg, Point::new(200.0, 100.0)), Hit::Canvas);

        g.remove_node(NodeSlot(0));
        assert_eq!(hit_test(&g, &cfg, Point::new(100.0, 100.0)), Hit::Canvas);
    }
}
