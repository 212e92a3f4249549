pub mod actions;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod hit;
pub mod interaction;
pub mod overlay;
pub mod scene;
pub mod seed;
pub mod snapshot;
pub mod state;
pub mod versioned;

pub use actions::Action;
pub use config::EditorConfig;
pub use error::{ConfigError, OverlayError, SnapshotError};
pub use geometry::{DragBounds, LabelPlacement, LabelSide, Point, Segment, Vector};
pub use graph::{Edge, EditorGraph, Node, NodeSlot, WeightText, random_weight};
pub use hit::{Hit, hit_test};
pub use interaction::{ConnectionState, Gesture, Interaction, WeightEditor};
pub use overlay::{
    EdgeRef, StackEntry, StepHighlight, TraversalOverlay, TraversalResult, TraversalStep,
};
pub use scene::{EdgeShape, NodeRole, NodeShape, Scene};
pub use seed::{starter_graph, traversal_demo_graph};
pub use snapshot::{GraphSnapshot, SnapshotEdge, SnapshotNode};
pub use state::EditorState;
pub use versioned::Versioned;
