mod value;

pub use value::Value;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Comment, Document, DocumentFragment, HtmlTemplateElement, Node};

use crate::cleanup::CleanupRegistry;
use crate::view::Embeddable;

/// Prefix carried by the sentinel comments that mark where a live node must
/// be substituted after parsing.
const SLOT_PREFIX: &str = "slot:";

/// `whatToShow` mask selecting only comment nodes during the slot walk.
const SHOW_COMMENT: u32 = 0x80;

enum Part {
    Markup(String),
    Value(Value),
}

/// An ordered sequence of literal markup chunks and interpolated values,
/// compiled into a live [`DocumentFragment`].
///
/// Text values are escaped and spliced into the markup string. Node-bearing
/// values are emitted as `<!--slot:N-->` sentinels, the whole markup is
/// parsed once through an inert `<template>` element, and each sentinel is
/// then swapped for its real node, preserving structural position. The
/// output is a pure function of the parts.
#[derive(Default)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    /// Create an empty template.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append a literal markup chunk, inserted verbatim.
    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.parts.push(Part::Markup(markup.into()));
        self
    }

    /// Append an interpolated value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.parts.push(Part::Value(value.into()));
        self
    }

    /// Append escaped text.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.value(Value::Text(text.into()))
    }

    /// Append a live node, substituted without escaping.
    pub fn node(self, node: impl Into<Node>) -> Self {
        self.value(Value::Node(node.into()))
    }

    /// Embed a child unit mid-template. It is rendered when the template is
    /// compiled, and its disposal is registered with the compiling view's
    /// cleanup registry.
    pub fn child(mut self, child: impl Embeddable + 'static) -> Self {
        self.parts.push(Part::Value(Value::Embed(Box::new(child))));
        self
    }

    /// Compile the template into a fragment. Disposal of embedded children
    /// is handed to `cleanup`, tying their lifetime to the compiling view.
    pub fn compile(
        self,
        document: &Document,
        cleanup: &CleanupRegistry,
    ) -> Result<DocumentFragment, JsValue> {
        let mut markup = String::new();
        let mut slots: Vec<Option<Node>> = Vec::new();

        for part in self.parts {
            match part {
                Part::Markup(chunk) => markup.push_str(&chunk),
                Part::Value(value) => {
                    if value.contains_node() {
                        let index = slots.len();
                        slots.push(realize_node(value, document, cleanup));
                        markup.push_str(&format!("<!--{SLOT_PREFIX}{index}-->"));
                    } else {
                        markup.push_str(&value::escape_html(&value.to_text()));
                    }
                }
            }
        }

        let template: HtmlTemplateElement = document
            .create_element("template")
            .expect("to create a template element")
            .dyn_into()
            .expect("a <template> to be an HtmlTemplateElement");
        template.set_inner_html(&markup);

        let fragment = template.content();
        if !slots.is_empty() {
            replace_slots(document, &fragment, slots)?;
        }

        Ok(fragment)
    }
}

/// Produce the live node for a node-bearing value. Embeds are rendered and
/// their disposal handed to `cleanup`; lists become a wrapper fragment
/// concatenating per-element nodes and text runs.
fn realize_node(value: Value, document: &Document, cleanup: &CleanupRegistry) -> Option<Node> {
    match value {
        Value::Node(node) => Some(node),
        Value::Embed(child) => {
            let node = child.to_node();
            cleanup.add(move || child.dispose());
            Some(node)
        }
        Value::List(values) => {
            let wrapper = document.create_document_fragment();

            for entry in values {
                let node = if entry.contains_node() {
                    realize_node(entry, document, cleanup)
                } else {
                    Some(document.create_text_node(&entry.to_text()).into())
                };

                if let Some(node) = node {
                    wrapper.append_child(&node).expect("list entry to append");
                }
            }

            Some(wrapper.into())
        }
        Value::Text(_) | Value::Empty => None,
    }
}

/// Swap every sentinel comment for its slot node.
fn replace_slots(
    document: &Document,
    fragment: &DocumentFragment,
    mut slots: Vec<Option<Node>>,
) -> Result<(), JsValue> {
    let walker = document.create_tree_walker_with_what_to_show(fragment, SHOW_COMMENT)?;

    // Collect every sentinel before touching the tree; replacing nodes while
    // the walker is mid-traversal can skip later comments.
    let mut sentinels: Vec<(Comment, usize)> = Vec::new();
    while let Some(node) = walker.next_node()? {
        let Some(comment) = node.dyn_ref::<Comment>() else {
            continue;
        };

        let data = comment.data();
        let Some(index) = data.strip_prefix(SLOT_PREFIX) else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };

        sentinels.push((comment.clone(), index));
    }

    for (comment, index) in sentinels {
        let parent = comment.parent_node().expect("sentinel to have a parent");

        match slots.get_mut(index).and_then(Option::take) {
            Some(node) => {
                parent.replace_child(&node, &comment)?;
            }
            None => {
                parent.remove_child(&comment)?;
            }
        }
    }

    Ok(())
}
