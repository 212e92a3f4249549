mod app;
mod canvas;
mod controls;
mod effects;

pub mod native;
pub mod web;

pub use app::GraphEditorApp;

/// Build the app for either entry point.
pub fn create_app(cc: &eframe::CreationContext<'_>) -> GraphEditorApp {
    GraphEditorApp::new(cc)
}
