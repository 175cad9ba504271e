mod boot_loader;
mod routes;
mod start;

pub use routes::routes;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

/// Boot the application: wire the UI immediately, then retire the splash
/// screen in the background once the page settles.
pub fn bootstrap() -> Result<(), JsValue> {
    start::start()?;

    spawn_local(boot_loader::run());

    Ok(())
}
