mod options;

pub use options::{AttrValue, ViewOptions};

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement, Node};

use crate::cleanup::CleanupRegistry;
use crate::dom;
use crate::template::Template;

/// Shared plumbing owned by every view: the root element, the cleanup
/// registry holding everything the current render acquired, and a liveness
/// flag that turns false once the view has been destroyed.
pub struct ViewCore {
    document: Document,
    element: HtmlElement,
    cleanup: CleanupRegistry,
    alive: Cell<bool>,
}

impl ViewCore {
    /// Create the root element for a view. An invalid tag is a programmer
    /// error and fails fast.
    pub fn new(tag: &str, options: ViewOptions) -> Self {
        let document = dom::document();
        let element: HtmlElement = document
            .create_element(tag)
            .expect("to create the view root element")
            .dyn_into()
            .expect("view root to be an HtmlElement");

        options.apply(&element);

        Self {
            document,
            element,
            cleanup: CleanupRegistry::new(),
            alive: Cell::new(true),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn cleanup(&self) -> &CleanupRegistry {
        &self.cleanup
    }

    /// False once the owning view has been destroyed. Asynchronous
    /// continuations must check this before touching view state: a response
    /// arriving after the user navigated away must be dropped, not rendered.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}

/// A UI unit owning one root element and the resources acquired while
/// rendering into it. Concrete views implement [`View::render`] as a pure
/// description of their current state; attachment, re-rendering, and
/// teardown are provided by [`ViewExt`] and [`Mountable`].
pub trait View: 'static {
    /// The shared core for this view.
    fn core(&self) -> &ViewCore;

    /// Describe the current visual state. Must stay free of side effects
    /// beyond building the template; listener setup belongs in
    /// [`View::on_mount`].
    fn render(&self) -> Template;

    /// Hook invoked after the root element has been rendered and attached.
    /// Receives the shared handle so listeners can hold weak back-references.
    fn on_mount(self: Rc<Self>) {}
}

/// Lifecycle operations shared by every [`View`].
pub trait ViewExt: View + Sized {
    /// Drain prior registrations, compile the current template, and replace
    /// the root element's children with the result.
    fn render_into_root(&self) {
        let core = self.core();

        core.cleanup().run();

        let fragment = self
            .render()
            .compile(core.document(), core.cleanup())
            .expect("view template to compile");

        dom::replace_children(core.element(), Some(fragment.as_ref()));
    }

    /// Re-run [`View::render`] and swap the root element's children in
    /// place. Used by views after internal state changes (eg async data
    /// arrival); a no-op once the view has been destroyed, so a stale
    /// continuation cannot revive a detached tree.
    fn rerender(&self) {
        if self.core().is_alive() {
            self.render_into_root();
        }
    }

    /// Compile a nested template against this view's document and cleanup
    /// registry, for interpolation as a node inside an outer template.
    fn tpl(&self, template: Template) -> Node {
        let core = self.core();

        template
            .compile(core.document(), core.cleanup())
            .expect("nested template to compile")
            .into()
    }

    /// Render `child` to its root node for manual placement, while this view
    /// takes ownership of its teardown.
    fn slot<C: View>(&self, child: Rc<C>) -> Node {
        let node = child.to_node();
        self.core().cleanup().add(move || child.dispose());
        node
    }

    /// Mount `child` into this view's root element and make its destruction
    /// part of this view's teardown.
    fn mount_child<C: View>(&self, child: Rc<C>) {
        let element: Element = self.core().element().clone().into();
        self.mount_child_into(child, &element);
    }

    /// Mount `child` into `parent` and make its destruction part of this
    /// view's teardown.
    fn mount_child_into<C: View>(&self, child: Rc<C>, parent: &Element) {
        child.mount(parent);
        self.core().cleanup().add(move || Mountable::destroy(&child));
    }
}

impl<V: View> ViewExt for V {}

/// Capability for units that can be embedded mid-template: render to a live
/// node now, release resources later. Implemented for any [`View`] behind an
/// [`Rc`], which is how one view's template interpolates another view.
pub trait Embeddable {
    fn to_node(&self) -> Node;
    fn dispose(&self);
}

impl<V: View> Embeddable for Rc<V> {
    fn to_node(&self) -> Node {
        self.render_into_root();
        self.core().element().clone().into()
    }

    fn dispose(&self) {
        Mountable::destroy(self);
    }
}

/// The contract the router consumes: anything that can be mounted into an
/// outlet element and destroyed later.
pub trait Mountable {
    fn mount(&self, parent: &Element);
    fn destroy(&self);
}

impl<V: View> Mountable for Rc<V> {
    /// Render into the root element, append it to `parent`, then run the
    /// [`View::on_mount`] hook. Views are expected to be mounted exactly
    /// once; mounting a destroyed view is a logged no-op, since destruction
    /// is terminal.
    fn mount(&self, parent: &Element) {
        let core = self.core();

        if !core.is_alive() {
            console::warn_1(&"mount() called on a destroyed view".into());
            return;
        }

        self.render_into_root();

        parent
            .append_child(core.element())
            .expect("view root to attach");

        Rc::clone(self).on_mount();
    }

    /// Run every cleanup task (destroying registered children, detaching
    /// listeners), then detach the root element. Terminal: further `destroy`
    /// calls are no-ops and the view must not be mounted again.
    fn destroy(&self) {
        let core = self.core();

        if !core.is_alive() {
            return;
        }

        core.alive.set(false);
        core.cleanup().run();
        core.element().remove();
    }
}
