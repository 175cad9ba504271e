use js_sys::{Array, Reflect};
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{
    Element, HtmlElement, HtmlVideoElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom;

const DEFAULT_ROOT_MARGIN: &str = "300px 0px";

/// Marks elements already handed to the observer, so repeated scans of the
/// same subtree do not observe twice. Hydration removes the `data-lazy-*`
/// attributes themselves, so hydrated elements simply stop matching.
const OBSERVED_MARKER: &str = "data-lazy-observed";

const LAZY_SELECTOR: &str = "img[data-lazy-src], img[data-lazy-srcset], img[data-lazy-sizes], \
     picture source[data-lazy-src], picture source[data-lazy-srcset], \
     video[data-lazy-src], video[data-lazy-poster], \
     video source[data-lazy-src], video source[data-lazy-srcset], \
     [data-lazy-bg-src]";

/// Defers media loading until elements approach the viewport: real sources
/// live in `data-lazy-*` attributes, and hydration promotes them onto the
/// live ones. Without `IntersectionObserver` support everything hydrates
/// immediately on scan.
pub struct LazyMedia {
    observer: Option<IntersectionObserver>,

    /// Keeps the observer callback alive for as long as it may fire.
    _callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl LazyMedia {
    pub fn new() -> Self {
        Self::with_root_margin(DEFAULT_ROOT_MARGIN)
    }

    pub fn with_root_margin(root_margin: &str) -> Self {
        if !observer_supported() {
            return Self {
                observer: None,
                _callback: None,
            };
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    observer.unobserve(&target);
                    hydrate(&target);
                }
            },
        );

        let mut init = IntersectionObserverInit::new();
        init.root_margin(root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .expect("intersection observer to construct");

        Self {
            observer: Some(observer),
            _callback: Some(callback),
        }
    }

    /// Queue every lazy carrier under `root` (default: the whole document)
    /// for hydration when it nears the viewport.
    pub fn scan(&self, root: Option<&Element>) {
        let candidates = match root {
            Some(root) => root.query_selector_all(LAZY_SELECTOR),
            None => dom::document().query_selector_all(LAZY_SELECTOR),
        }
        .expect("lazy selector to parse");

        for index in 0..candidates.length() {
            let Some(candidate) = candidates
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };

            let target = observation_target(candidate);
            if target.has_attribute(OBSERVED_MARKER) {
                continue;
            }

            match &self.observer {
                Some(observer) => {
                    target
                        .set_attribute(OBSERVED_MARKER, "")
                        .expect("observed marker to set");
                    observer.observe(&target);
                }
                None => hydrate(&target),
            }
        }
    }

    /// Stop observing. Already-hydrated media keeps its promoted sources.
    pub fn disconnect(&self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

impl Default for LazyMedia {
    fn default() -> Self {
        Self::new()
    }
}

fn observer_supported() -> bool {
    Reflect::get(&dom::window(), &"IntersectionObserver".into())
        .map(|value| !value.is_undefined())
        .unwrap_or(false)
}

/// A `<source>` is loaded by its parent `<picture>`/`<video>`, so that parent
/// is what enters the viewport.
fn observation_target(element: Element) -> Element {
    if !is_tag(&element, "source") {
        return element;
    }

    match element.parent_element() {
        Some(parent) if is_tag(&parent, "picture") || is_tag(&parent, "video") => parent,
        _ => element,
    }
}

fn is_tag(element: &Element, tag_name: &str) -> bool {
    element.tag_name().eq_ignore_ascii_case(tag_name)
}

/// Promote every deferred attribute on `target` and its lazy descendants
/// immediately. The observer path lands here once a target nears the
/// viewport; it is also the whole story when observation is unsupported.
pub fn hydrate(target: &Element) {
    apply_deferred(target);

    let nested = target
        .query_selector_all(LAZY_SELECTOR)
        .expect("lazy selector to parse");
    for index in 0..nested.length() {
        let Some(element) = nested
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        apply_deferred(&element);
    }

    let _ = target.remove_attribute(OBSERVED_MARKER);
}

fn apply_deferred(element: &Element) {
    apply_deferred_image(element);
    apply_deferred_source(element);
    apply_deferred_video(element);
    apply_deferred_background(element);
}

/// Read and strip a `data-lazy-*` attribute in one step, so hydrated
/// elements stop matching the scan selector.
fn take_deferred(element: &Element, name: &str) -> Option<String> {
    let value = element.get_attribute(name)?;
    let _ = element.remove_attribute(name);
    Some(value)
}

fn apply_deferred_image(element: &Element) {
    if !is_tag(element, "img") {
        return;
    }

    // srcset/sizes first, so the src assignment already sees them.
    if let Some(srcset) = take_deferred(element, "data-lazy-srcset") {
        element
            .set_attribute("srcset", &srcset)
            .expect("srcset to set");
    }
    if let Some(sizes) = take_deferred(element, "data-lazy-sizes") {
        element
            .set_attribute("sizes", &sizes)
            .expect("sizes to set");
    }
    if let Some(src) = take_deferred(element, "data-lazy-src") {
        element.set_attribute("src", &src).expect("src to set");
    }
}

fn apply_deferred_source(element: &Element) -> bool {
    if !is_tag(element, "source") {
        return false;
    }

    let mut changed = false;

    if let Some(srcset) = take_deferred(element, "data-lazy-srcset") {
        element
            .set_attribute("srcset", &srcset)
            .expect("srcset to set");
        changed = true;
    }
    if let Some(src) = take_deferred(element, "data-lazy-src") {
        element.set_attribute("src", &src).expect("src to set");
        changed = true;
    }

    changed
}

fn apply_deferred_video(element: &Element) {
    if !is_tag(element, "video") {
        return;
    }

    if let Some(poster) = take_deferred(element, "data-lazy-poster") {
        element
            .set_attribute("poster", &poster)
            .expect("poster to set");
    }

    let mut reload = false;

    if let Some(src) = take_deferred(element, "data-lazy-src") {
        element.set_attribute("src", &src).expect("src to set");
        reload = true;
    }

    let sources = element
        .query_selector_all("source")
        .expect("source selector to parse");
    for index in 0..sources.length() {
        let Some(source) = sources
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if apply_deferred_source(&source) {
            reload = true;
        }
    }

    // Sources changed under the element; ask it to pick again.
    if reload {
        if let Some(video) = element.dyn_ref::<HtmlVideoElement>() {
            video.load();
        }
    }
}

fn apply_deferred_background(element: &Element) {
    let Some(src) = take_deferred(element, "data-lazy-bg-src") else {
        return;
    };
    let Some(html_element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };

    let image = format!("url(\"{src}\")");
    match take_deferred(element, "data-lazy-bg-css-var") {
        Some(css_var) => html_element
            .style()
            .set_property(&css_var, &image)
            .expect("background variable to set"),
        None => html_element
            .style()
            .set_property("background-image", &image)
            .expect("background image to set"),
    }
}
