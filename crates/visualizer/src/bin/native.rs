#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    visualizer::native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browsers enter through `visualizer::web::start`.
}
