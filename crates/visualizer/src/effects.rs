use crate::app::GraphEditorApp;
use eframe::egui;
use std::path::PathBuf;

/// Deferred effects that run after the frame's UI pass (clipboard, file IO)
#[derive(Debug, Clone)]
pub enum Effect {
    /// Serialize the graph for the traversal service
    SubmitGraph,
    /// Read a traversal result from disk and show it as an overlay
    LoadTraversal { path: PathBuf },
}

/// Execute a single effect against the app
pub fn run(app: &mut GraphEditorApp, ctx: &egui::Context, effect: Effect) {
    match effect {
        Effect::SubmitGraph => {
            let json = app
                .state
                .snapshot()
                .and_then(|snapshot| snapshot.to_json());
            match json {
                Ok(json) => {
                    log::info!("submitting graph:\n{json}");
                    ctx.copy_text(json.clone());
                    app.last_submission = Some(json);
                }
                Err(e) => app.error_message = Some(e.to_string()),
            }
        }
        Effect::LoadTraversal { path } => {
            match std::fs::read_to_string(&path) {
                Ok(json) => app.apply_traversal_json(&json),
                Err(e) => {
                    app.error_message =
                        Some(format!("failed to read {}: {e}", path.display()));
                }
            }
        }
    }
}
