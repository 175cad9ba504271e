#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nocturne::dom;
use nocturne::template::Template;
use nocturne::view::{Mountable, View, ViewCore, ViewExt, ViewOptions};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> Element {
    dom::document().create_element("div").unwrap()
}

/// Leaf view marking itself with a class.
struct Leaf {
    core: ViewCore,
}

impl Leaf {
    fn new(class: &str) -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("span", ViewOptions::new().class("leaf").class(class)),
        })
    }
}

impl View for Leaf {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().text("leaf")
    }
}

/// Parent embedding its children mid-template.
struct Parent {
    core: ViewCore,
    children: Vec<Rc<Leaf>>,
}

impl Parent {
    fn new(children: Vec<Rc<Leaf>>) -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("div", ViewOptions::new().class("parent")),
            children,
        })
    }
}

impl View for Parent {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        let mut template = Template::new().markup("<div class=\"kids\">");
        for child in &self.children {
            template = template.child(Rc::clone(child));
        }
        template.markup("</div>")
    }
}

/// View with internal state driving its rendition.
struct Counter {
    core: ViewCore,
    count: Cell<u32>,
}

impl Counter {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("p", ViewOptions::new()),
            count: Cell::new(0),
        })
    }
}

impl View for Counter {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().value(self.count.get())
    }
}

/// View that records mount-time listener teardown.
struct Tracked {
    core: ViewCore,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Tracked {
    fn new(log: Rc<RefCell<Vec<&'static str>>>) -> Rc<Self> {
        Rc::new(Self {
            core: ViewCore::new("div", ViewOptions::new()),
            log,
        })
    }
}

impl View for Tracked {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn render(&self) -> Template {
        Template::new().text("tracked")
    }

    fn on_mount(self: Rc<Self>) {
        let log = Rc::clone(&self.log);
        self.core()
            .cleanup()
            .add(move || log.borrow_mut().push("torn down"));
    }
}

#[wasm_bindgen_test]
fn mount_renders_and_attaches() {
    let container = container();
    let counter = Counter::new();

    counter.mount(&container);

    assert_eq!(container.child_element_count(), 1);
    let root = container.first_element_child().unwrap();
    assert_eq!(root.text_content(), Some("0".to_string()));
}

#[wasm_bindgen_test]
fn rerender_swaps_children_without_reattaching() {
    let container = container();
    let counter = Counter::new();
    counter.mount(&container);

    counter.count.set(7);
    counter.rerender();

    assert_eq!(container.child_element_count(), 1);
    assert_eq!(
        container.first_element_child().unwrap().text_content(),
        Some("7".to_string())
    );
}

#[wasm_bindgen_test]
fn destroyed_views_ignore_rerender() {
    let container = container();
    let counter = Counter::new();
    counter.mount(&container);

    Mountable::destroy(&counter);
    counter.count.set(9);
    counter.rerender();

    assert!(!counter.core().is_alive());
    assert!(counter.core().element().parent_node().is_none());
    assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn destruction_is_terminal_and_mount_is_refused() {
    let container = container();
    let counter = Counter::new();
    counter.mount(&container);
    Mountable::destroy(&counter);

    counter.mount(&container);

    assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn embedded_children_render_in_place() {
    let container = container();
    let children = vec![Leaf::new("a"), Leaf::new("b")];
    let parent = Parent::new(children.clone());

    parent.mount(&container);

    let kids = container.query_selector(".kids").unwrap().unwrap();
    assert_eq!(kids.query_selector_all(".leaf").unwrap().length(), 2);
    for child in &children {
        assert!(child.core().is_alive());
        assert_eq!(child.core().element().text_content(), Some("leaf".to_string()));
    }
}

#[wasm_bindgen_test]
fn destroying_a_parent_destroys_embedded_children() {
    let container = container();
    let children = vec![Leaf::new("a"), Leaf::new("b")];
    let parent = Parent::new(children.clone());
    parent.mount(&container);

    Mountable::destroy(&parent);

    for child in &children {
        assert!(!child.core().is_alive());
        assert!(child.core().element().parent_node().is_none());
    }
    assert!(parent.core().element().parent_node().is_none());
}

#[wasm_bindgen_test]
fn rerender_disposes_the_previous_generation_of_children() {
    let container = container();
    let children = vec![Leaf::new("a")];
    let parent = Parent::new(children.clone());
    parent.mount(&container);

    parent.rerender();

    // The first generation was torn down; the fresh render embedded the same
    // (now destroyed) child handles, so their roots are detached spans.
    assert!(!children[0].core().is_alive());
}

#[wasm_bindgen_test]
fn slot_hands_ownership_to_the_slotting_view() {
    let container = container();
    let host = Counter::new();
    host.mount(&container);

    let leaf = Leaf::new("slotted");
    let node = host.slot(Rc::clone(&leaf));
    host.core().element().append_child(&node).unwrap();

    assert!(leaf.core().is_alive());

    Mountable::destroy(&host);
    assert!(!leaf.core().is_alive());
}

#[wasm_bindgen_test]
fn mount_child_cascades_destruction() {
    let container = container();
    let host = Counter::new();
    host.mount(&container);

    let leaf = Leaf::new("nested");
    host.mount_child(Rc::clone(&leaf));

    assert_eq!(
        host.core().element().query_selector_all(".leaf").unwrap().length(),
        1
    );

    Mountable::destroy(&host);
    assert!(!leaf.core().is_alive());
}

#[wasm_bindgen_test]
fn mount_hooks_register_teardown_that_runs_once_on_destroy() {
    let container = container();
    let log = Rc::new(RefCell::new(Vec::new()));
    let tracked = Tracked::new(Rc::clone(&log));

    tracked.mount(&container);
    assert!(log.borrow().is_empty());

    Mountable::destroy(&tracked);
    Mountable::destroy(&tracked);

    assert_eq!(*log.borrow(), vec!["torn down"]);
}
