pub mod app;
pub mod cleanup;
pub mod components;
pub mod content;
pub mod dom;
pub mod lazy_media;
pub mod pages;
pub mod router;
pub mod sections;
pub mod template;
pub mod view;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Configure the panic hook to log to console.error
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    app::bootstrap()
}
