use web_sys::{Document, Node, Window};

/// Grab the global [`Window`]. The crate only ever runs inside a browser, so
/// a missing window is unrecoverable.
pub fn window() -> Window {
    web_sys::window().expect("no global `window` exists")
}

/// Grab the [`Document`] for the current page.
pub fn document() -> Document {
    window().document().expect("should have a document on window")
}

/// Drop every child of `parent`, then append `node` if one was provided.
pub fn replace_children(parent: &Node, node: Option<&Node>) {
    parent.set_text_content(None);

    if let Some(node) = node {
        parent.append_child(node).expect("child to append");
    }
}
