use crate::actions::{self, Action};
use crate::config::EditorConfig;
use crate::error::{OverlayError, SnapshotError};
use crate::geometry::Vector;
use crate::graph::EditorGraph;
use crate::hit::{Hit, hit_test};
use crate::interaction::{Gesture, Interaction};
use crate::overlay::{TraversalOverlay, TraversalResult};
use crate::scene::Scene;
use crate::seed;
use crate::snapshot::GraphSnapshot;
use crate::versioned::Versioned;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The editor as a whole: the graph, the gesture machine and an optional
/// traversal overlay.
pub struct EditorState {
    config: EditorConfig,
    graph: Versioned<EditorGraph>,
    interaction: Interaction,
    overlay: Option<TraversalOverlay>,
    rng: StdRng,
    action_queue: Vec<Action>,
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_graph(config, EditorGraph::new())
    }

    pub fn with_graph(config: EditorConfig, graph: EditorGraph) -> Self {
        let rng = match config.weights.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            graph: Versioned::new(graph),
            interaction: Interaction::new(),
            overlay: None,
            rng,
            action_queue: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn graph(&self) -> &EditorGraph {
        self.graph.get()
    }

    pub fn graph_version(&self) -> u64 {
        self.graph.version()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn overlay(&self) -> Option<&TraversalOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut TraversalOverlay> {
        self.overlay.as_mut()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    /// Apply every queued action in order.
    pub fn flush_actions(&mut self) {
        let queue = std::mem::take(&mut self.action_queue);
        for action in queue {
            let config = &self.config;
            self.graph.mutate(|graph| actions::update(graph, config, action));
        }
    }

    /// Feed one pointer gesture through hit testing and the gesture machine,
    /// then apply the resulting actions before returning.
    pub fn handle_gesture(&mut self, gesture: Gesture, now: f64) {
        let hit = gesture
            .position()
            .map_or(Hit::Canvas, |at| hit_test(self.graph.get(), &self.config, at));
        let actions = self.interaction.handle(
            gesture,
            hit,
            now,
            self.graph.get(),
            &self.config,
            &mut self.rng,
        );
        for action in actions {
            self.dispatch(action);
        }
        self.flush_actions();
    }

    /// Raw text of the edge under the open weight editor.
    pub fn weight_text(&self) -> Option<&str> {
        let editor = self.interaction.weight_editor()?;
        self.graph().edge(editor.edge).map(|e| e.weight.as_str())
    }

    /// Set the weight of the edge under the open weight editor.
    pub fn edit_weight(&mut self, raw: &str) -> bool {
        let Some(editor) = self.interaction.weight_editor() else {
            return false;
        };
        let config = &self.config;
        self.graph.mutate(|graph| {
            actions::update(
                graph,
                config,
                Action::SetEdgeWeight {
                    edge: editor.edge,
                    raw: raw.to_string(),
                },
            )
        })
    }

    pub fn close_weight_editor(&mut self) {
        self.interaction.close_weight_editor();
    }

    pub fn snapshot(&self) -> Result<GraphSnapshot, SnapshotError> {
        self.graph().snapshot()
    }

    pub fn scene(&self) -> Scene {
        let highlight = self.overlay.as_ref().map(TraversalOverlay::highlight);
        Scene::build(self.graph(), &self.interaction, &self.config, highlight.as_ref())
    }

    /// Validate `result` against the current graph and show it.
    pub fn load_overlay(&mut self, result: TraversalResult) -> Result<(), OverlayError> {
        let snapshot = self.snapshot()?;
        let overlay = TraversalOverlay::load(result, &snapshot)?;
        self.overlay = Some(overlay.at_graph_version(self.graph.version()));
        Ok(())
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    /// True when the graph changed after the overlay was loaded.
    pub fn overlay_is_stale(&self) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|o| o.graph_version() != self.graph.version())
    }

    /// Swap in a new graph, dropping selection, popup and overlay.
    pub fn replace_graph(&mut self, graph: EditorGraph) {
        self.graph.set(graph);
        self.interaction = Interaction::new();
        self.overlay = None;
        self.action_queue.clear();
    }

    pub fn load_starter_graph(&mut self) {
        let graph = seed::starter_graph(&self.config.weights, &mut self.rng);
        self.replace_graph(graph);
    }

    pub fn load_demo_graph(&mut self, center: Vector) {
        let graph = seed::traversal_demo_graph(center, &self.config.weights, &mut self.rng);
        self.replace_graph(graph);
    }
}
