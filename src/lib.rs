pub mod canvas;
pub mod components;
pub mod config;
pub mod image_loader;
pub mod state;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);
    log::info!("pixelboard {} starting", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(components::app::App);
}
