use js_sys::{Array, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, HtmlImageElement};

use crate::content;
use crate::dom;

const BOOT_LOADER_SELECTOR: &str = "#boot-loader";
const BOOT_LEAVING_CLASS: &str = "is-leaving";
const BOOT_MIN_VISIBLE_MS: i32 = 320;
const BOOT_FADE_OUT_MS: i32 = 220;
const BOOT_MAX_WAIT_MS: i32 = 10_000;

/// Dismiss the splash screen once the page is ready: hold it for a minimum
/// visible time, wait for page load and critical image decode (capped by a
/// maximum), then fade out and remove. Under `prefers-reduced-motion` the
/// fade is skipped. Pages without a splash element return immediately.
pub async fn run() {
    let Ok(Some(loader)) = dom::document().query_selector(BOOT_LOADER_SELECTOR) else {
        return;
    };

    let ready = Promise::all(&Array::of2(
        &page_load_promise().into(),
        &critical_images_promise().into(),
    ));
    let capped = Promise::race(&Array::of2(&ready.into(), &delay(BOOT_MAX_WAIT_MS).into()));
    let gate = Promise::all(&Array::of2(
        &delay(BOOT_MIN_VISIBLE_MS).into(),
        &capped.into(),
    ));
    let _ = JsFuture::from(gate).await;

    if prefers_reduced_motion() {
        loader.remove();
        return;
    }

    loader
        .class_list()
        .add_1(BOOT_LEAVING_CLASS)
        .expect("leaving class to apply");
    let _ = JsFuture::from(delay(BOOT_FADE_OUT_MS)).await;

    loader.remove();
}

/// Promise resolving after `ms` milliseconds.
fn delay(ms: i32) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        dom::window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("timer to schedule");
    })
}

/// Resolved once the document has fully loaded.
fn page_load_promise() -> Promise {
    if dom::document().ready_state() == "complete" {
        return Promise::resolve(&JsValue::UNDEFINED);
    }

    Promise::new(&mut |resolve, _reject| {
        let mut options = AddEventListenerOptions::new();
        options.once(true);

        dom::window()
            .add_event_listener_with_callback_and_add_event_listener_options(
                "load", &resolve, &options,
            )
            .expect("load listener to attach");
    })
}

/// Resolved once every critical image has been fetched and decoded. Failed
/// decodes resolve too; the gate only cares about "done trying".
fn critical_images_promise() -> Promise {
    let decodes = Array::new();

    for src in content::BOOT_CRITICAL_IMAGES {
        decodes.push(&decode_image(src).into());
    }

    Promise::all(&decodes)
}

fn decode_image(src: &str) -> Promise {
    match HtmlImageElement::new() {
        Ok(image) => {
            image.set_src(src);
            let noop = Closure::<dyn FnMut(JsValue)>::new(|_: JsValue| {});
            let promise = image.decode().catch(&noop);
            noop.forget();
            promise
        }
        Err(_) => Promise::resolve(&JsValue::UNDEFINED),
    }
}

fn prefers_reduced_motion() -> bool {
    dom::window()
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}
