use crate::app::GraphEditorApp;
use crate::effects::Effect;
use eframe::egui;
use graph_editor::{ConnectionState, Vector};

/// Where the demo layout is placed on the canvas.
const DEMO_OFFSET: Vector = Vector::new(60.0, 60.0);

pub fn show_toolbar(ui: &mut egui::Ui, app: &mut GraphEditorApp) {
    ui.horizontal(|ui| {
        if ui.button("Starter graph").clicked() {
            app.state.load_starter_graph();
        }
        if ui.button("Demo graph").clicked() {
            app.state.load_demo_graph(DEMO_OFFSET);
        }

        ui.separator();

        if ui.button("Submit").clicked() {
            app.queue_effect(Effect::SubmitGraph);
        }
        if ui.button("Load steps…").clicked() {
            open_traversal(ui.ctx(), app);
        }

        ui.separator();

        let has_overlay = app.state.overlay().is_some();
        ui.add_enabled_ui(has_overlay, |ui| {
            if ui.button("Reset").clicked()
                && let Some(overlay) = app.state.overlay_mut()
            {
                overlay.reset();
            }
            if ui.button("Backward").clicked()
                && let Some(overlay) = app.state.overlay_mut()
            {
                overlay.step_backward();
            }
            if ui.button("Forward").clicked()
                && let Some(overlay) = app.state.overlay_mut()
            {
                overlay.step_forward();
            }
            if ui.button("Clear").clicked() {
                app.state.clear_overlay();
            }
        });
    });

    let hint = match app.state.interaction().connection() {
        ConnectionState::Idle => {
            "Double-click to add a node. Click two nodes to connect them. \
             Right-click to delete."
                .to_string()
        }
        ConnectionState::Connecting(slot) => {
            format!(
                "Connecting from node {slot}. Click another node, \
                 or right-click the canvas to cancel."
            )
        }
    };
    ui.label(hint);
}

#[cfg(not(target_arch = "wasm32"))]
fn open_traversal(_ctx: &egui::Context, app: &mut GraphEditorApp) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .pick_file()
    {
        app.queue_effect(Effect::LoadTraversal { path });
    }
}

#[cfg(target_arch = "wasm32")]
fn open_traversal(ctx: &egui::Context, app: &mut GraphEditorApp) {
    crate::web::open_traversal_dialog(ctx.clone(), app.inbox.clone());
}

pub fn show_step_panel(ui: &mut egui::Ui, app: &GraphEditorApp) {
    ui.heading("Traversal");

    match app.state.overlay() {
        None => {
            ui.label("No steps loaded.");
        }
        Some(overlay) => {
            let result = overlay.result();
            ui.label(format!("Start node: {}", result.start_node));
            ui.label(format!("Step {} / {}", overlay.cursor(), overlay.len()));

            if app.state.overlay_is_stale() {
                let warn = ui.visuals().warn_fg_color;
                ui.colored_label(warn, "The graph changed after these steps were loaded.");
            }

            ui.separator();
            match overlay.current_step() {
                Some(step) => {
                    ui.label(&step.description);
                    ui.add_space(6.0);
                    ui.strong("Stack");
                    if step.stack.is_empty() {
                        ui.label("(empty)");
                    }
                    for entry in step.stack.iter().rev() {
                        match entry.from {
                            Some(from) => ui.monospace(format!("{} (from {from})", entry.id)),
                            None => ui.monospace(entry.id.to_string()),
                        };
                    }
                }
                None => {
                    ui.label("Press Forward to start.");
                }
            }

            if !result.traversal_result.is_empty() {
                ui.separator();
                let order: Vec<String> =
                    result.traversal_result.iter().map(|s| s.to_string()).collect();
                ui.label(format!("Visit order: {}", order.join(" → ")));
            }
        }
    }

    if let Some(json) = &app.last_submission {
        ui.separator();
        egui::CollapsingHeader::new("Last submission")
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    ui.monospace(json);
                });
            });
    }
}
