#![cfg(target_arch = "wasm32")]

use crate::app::TraversalInbox;
use crate::create_app;
use eframe::{WebRunner, egui};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

const CANVAS_ID: &str = "the_canvas_id";

/// Browser entry point: mounts the editor on the page's canvas element.
#[wasm_bindgen]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("graph editor logging unavailable: {e}").into());
    }

    let canvas = editor_canvas()?;
    WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(create_app(cc)))),
        )
        .await
}

fn editor_canvas() -> Result<HtmlCanvasElement, JsValue> {
    let window = web_sys::window().ok_or("page has no window")?;
    let document = window.document().ok_or("window has no document")?;
    let element = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| format!("no element with id {CANVAS_ID}"))?;
    Ok(element.dyn_into::<HtmlCanvasElement>()?)
}

/// Ask the browser for a traversal result file; its text lands in `inbox`.
pub fn open_traversal_dialog(ctx: egui::Context, inbox: TraversalInbox) {
    use rfd::AsyncFileDialog;
    use wasm_bindgen_futures::spawn_local;

    let task = AsyncFileDialog::new()
        .add_filter("JSON", &["json"])
        .pick_file();

    spawn_local(async move {
        if let Some(file) = task.await {
            let data = file.read().await;
            let text = String::from_utf8_lossy(&data).into_owned();
            if let Ok(mut slot) = inbox.lock() {
                *slot = Some(text);
            }
            ctx.request_repaint();
        }
    });
}
