#![cfg(not(target_arch = "wasm32"))]

use crate::create_app;

/// Entry point used by the native executable.
pub fn run() -> eframe::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Graph Traversal Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(create_app(cc)))),
    )
}
