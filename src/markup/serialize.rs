//! Deterministic markup serializer.
//!
//! Output is compact (no whitespace between elements). Attributes are written
//! as `id`, `class`, then the rest in insertion order; empty values are
//! written as bare boolean attributes.

use std::fmt::Write;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether `tag` is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Serialize the whole document.
pub fn to_markup(dom: &Dom) -> String {
    let mut out = String::new();
    if let Some(root) = dom.root() {
        write_node(dom, root, &mut out);
    }
    out
}

/// Serialize `node` and its subtree. Empty if `node` does not exist.
pub fn element_to_markup(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, node, &mut out);
    out
}

/// The start tag of `data`, e.g. `<nav class="menu">`.
pub fn start_tag(data: &NodeData) -> String {
    let mut out = format!("<{}", data.tag);
    if let Some(id) = &data.id {
        write_attribute(&mut out, "id", id);
    }
    if !data.classes.is_empty() {
        write_attribute(&mut out, "class", &data.class_attribute());
    }
    for (name, value) in &data.attributes {
        write_attribute(&mut out, name, value);
    }
    out.push('>');
    out
}

fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    let Some(data) = dom.get(node) else {
        return;
    };
    if data.is_document() {
        for &child in dom.children(node) {
            write_node(dom, child, out);
        }
        return;
    }

    out.push_str(&start_tag(data));
    if is_void(&data.tag) {
        return;
    }
    for &child in dom.children(node) {
        write_node(dom, child, out);
    }
    let _ = write!(out, "</{}>", data.tag);
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        let _ = write!(out, "=\"{}\"", escape(value));
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
