use crate::canvas;
use crate::controls;
use crate::effects::{self, Effect};
use eframe::egui;
use graph_editor::{EditorConfig, EditorGraph, EditorState, GraphSnapshot, TraversalResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

const CONFIG_FILE: &str = "editor.json";
const GRAPH_FILE: &str = "graph.json";

/// Traversal JSON picked asynchronously, waiting to be applied.
pub type TraversalInbox = Arc<Mutex<Option<String>>>;

pub struct GraphEditorApp {
    pub(crate) state: EditorState,
    pub(crate) error_message: Option<String>,
    /// JSON of the last successful submission.
    pub(crate) last_submission: Option<String>,
    pub(crate) inbox: TraversalInbox,
    effect_queue: Vec<Effect>,
}

// ------------------------------------------------------------------
// Initialization helpers
// ------------------------------------------------------------------

fn load_config() -> EditorConfig {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return EditorConfig::default();
    }
    match EditorConfig::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Error loading {CONFIG_FILE}: {e}. Using defaults.");
            EditorConfig::default()
        }
    }
}

fn load_seed_graph(config: &EditorConfig) -> Option<EditorGraph> {
    let path = Path::new(GRAPH_FILE);
    if !path.exists() {
        return None;
    }
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            GraphSnapshot::from_json(&json)
                .and_then(|snapshot| {
                    EditorGraph::from_snapshot(&snapshot, config.node.max_slots)
                })
                .map_err(|e| e.to_string())
        });
    match loaded {
        Ok(graph) => Some(graph),
        Err(e) => {
            log::warn!("Error loading {GRAPH_FILE}: {e}. Using the starter graph.");
            None
        }
    }
}

// ------------------------------------------------------------------

impl GraphEditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config();
        let state = match load_seed_graph(&config) {
            Some(graph) => EditorState::with_graph(config, graph),
            None => {
                let mut state = EditorState::new(config);
                state.load_starter_graph();
                state
            }
        };
        Self {
            state,
            error_message: None,
            last_submission: None,
            inbox: Arc::new(Mutex::new(None)),
            effect_queue: Vec::new(),
        }
    }

    pub(crate) fn queue_effect(&mut self, effect: Effect) {
        self.effect_queue.push(effect);
    }

    fn flush_effects(&mut self, ctx: &egui::Context) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(self, ctx, effect);
        }
    }

    /// Parse a traversal result and show it over the current graph.
    pub(crate) fn apply_traversal_json(&mut self, json: &str) {
        let loaded = TraversalResult::from_json(json)
            .and_then(|result| self.state.load_overlay(result));
        if let Err(e) = loaded {
            self.error_message = Some(e.to_string());
        }
    }

    fn drain_inbox(&mut self) {
        let pending = self.inbox.lock().ok().and_then(|mut slot| slot.take());
        if let Some(json) = pending {
            self.apply_traversal_json(&json);
        }
    }
}

impl eframe::App for GraphEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_inbox();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            controls::show_toolbar(ui, self);
        });

        egui::SidePanel::right("steps")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                controls::show_step_panel(ui, self);
            });

        let mut origin = egui::Pos2::ZERO;
        egui::CentralPanel::default().show(ctx, |ui| {
            origin = canvas::show(ui, &mut self.state);
        });
        canvas::show_weight_editor(ctx, &mut self.state, origin);

        // Display error dialog if there's an error message
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        self.flush_effects(ctx);
    }
}
