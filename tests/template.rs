#![cfg(target_arch = "wasm32")]

use nocturne::cleanup::CleanupRegistry;
use nocturne::dom;
use nocturne::template::{Template, Value};
use wasm_bindgen_test::*;
use web_sys::{DocumentFragment, Element, Node};

wasm_bindgen_test_configure!(run_in_browser);

fn compile(template: Template) -> DocumentFragment {
    template
        .compile(&dom::document(), &CleanupRegistry::new())
        .unwrap()
}

/// Serialize a fragment by hosting it in a detached element.
fn host(fragment: DocumentFragment) -> Element {
    let host = dom::document().create_element("div").unwrap();
    host.append_child(&fragment).unwrap();
    host
}

fn tagged(tag: &str, text: &str) -> Element {
    let element = dom::document().create_element(tag).unwrap();
    element.set_text_content(Some(text));
    element
}

#[wasm_bindgen_test]
fn text_interpolations_are_escaped() {
    let host = host(compile(
        Template::new()
            .markup("<p>")
            .text("<script>alert('x')</script>")
            .markup("</p>"),
    ));

    assert!(host.query_selector("script").unwrap().is_none());
    assert_eq!(
        host.query_selector("p").unwrap().unwrap().text_content(),
        Some("<script>alert('x')</script>".to_string())
    );
}

#[wasm_bindgen_test]
fn empty_like_values_contribute_nothing() {
    let host = host(compile(
        Template::new()
            .markup("<p>")
            .value(false)
            .value(None::<&str>)
            .value(Value::Empty)
            .markup("</p>"),
    ));

    assert_eq!(host.inner_html(), "<p></p>");
}

#[wasm_bindgen_test]
fn nodes_land_at_their_literal_positions() {
    let first = tagged("em", "first");
    let second = tagged("strong", "second");

    let host = host(compile(
        Template::new()
            .markup("<p>")
            .node(first)
            .text(" mid ")
            .node(second)
            .markup("</p>"),
    ));

    let paragraph = host.query_selector("p").unwrap().unwrap();
    let children = paragraph.child_nodes();
    assert_eq!(children.length(), 3);
    assert_eq!(
        children.item(0).unwrap().node_name().to_lowercase(),
        "em"
    );
    assert_eq!(
        children.item(1).unwrap().text_content(),
        Some(" mid ".to_string())
    );
    assert_eq!(
        children.item(2).unwrap().node_name().to_lowercase(),
        "strong"
    );
}

#[wasm_bindgen_test]
fn no_marker_artifacts_survive_compilation() {
    let host = host(compile(
        Template::new()
            .markup("<div>")
            .node(tagged("span", "a"))
            .node(tagged("span", "b"))
            .markup("</div>"),
    ));

    // Neither sentinel comments nor their text remain.
    assert!(!host.inner_html().contains("slot:"));

    let children = host.query_selector("div").unwrap().unwrap().child_nodes();
    for index in 0..children.length() {
        assert_ne!(
            children.item(index).unwrap().node_type(),
            Node::COMMENT_NODE
        );
    }
}

#[wasm_bindgen_test]
fn node_bearing_lists_concatenate_in_order() {
    let host = host(compile(
        Template::new()
            .markup("<div>")
            .value(vec![
                Value::from(tagged("span", "a")),
                Value::from("tail"),
                Value::from(tagged("span", "b")),
            ])
            .markup("</div>"),
    ));

    let container = host.query_selector("div").unwrap().unwrap();
    assert_eq!(container.query_selector_all("span").unwrap().length(), 2);
    assert_eq!(container.text_content(), Some("atailb".to_string()));
}

#[wasm_bindgen_test]
fn node_free_lists_render_as_concatenated_text() {
    let host = host(compile(
        Template::new()
            .markup("<p>")
            .value(vec![Value::from("a"), Value::from(1u32), Value::from(false)])
            .markup("</p>"),
    ));

    assert_eq!(host.inner_html(), "<p>a1</p>");
}
