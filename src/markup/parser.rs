//! Markup loader: HTML5 parsing with html5ever, converted into a [`Dom`].
//!
//! Tree construction follows the HTML5 rules, so every input yields a
//! document: `html`, `head` and `body` are implied when missing, stray end
//! tags are ignored and unclosed elements are closed. Text, comments,
//! doctypes and template contents carry no toggle semantics and are dropped.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use thiserror::Error;
use tracing::debug;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Errors produced while loading markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The input could not be read by the parser.
    #[error("failed to read markup: {0}")]
    Read(#[from] std::io::Error),
}

/// Parse an HTML document into a `Dom` rooted at a `#document` node.
pub fn parse_markup(input: &str) -> Result<Dom, MarkupError> {
    let parsed = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut input.as_bytes())?;

    let mut dom = Dom::with_document();
    if let Some(root) = dom.root() {
        convert_node(&parsed.document, &mut dom, root);
    }
    debug!(nodes = dom.len(), "markup parsed");
    Ok(dom)
}

/// Copy `handle`'s element subtree under `parent`.
fn convert_node(handle: &Handle, dom: &mut Dom, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => convert_children(handle, dom, parent),
        RcNodeData::Element { name, attrs, .. } => {
            let mut data = NodeData::new(&*name.local);
            for attr in attrs.borrow().iter() {
                data.set_attribute(&*attr.name.local, &*attr.value);
            }
            let id = dom.insert_child(parent, data);
            convert_children(handle, dom, id);
        }
        // Not part of the element tree.
        RcNodeData::Doctype { .. }
        | RcNodeData::Text { .. }
        | RcNodeData::Comment { .. }
        | RcNodeData::ProcessingInstruction { .. } => {}
    }
}

fn convert_children(handle: &Handle, dom: &mut Dom, parent: NodeId) {
    for child in handle.children.borrow().iter() {
        convert_node(child, dom, parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(dom: &Dom) -> Vec<String> {
        dom.query_all(|_| true)
            .into_iter()
            .map(|id| dom.get(id).unwrap().tag.clone())
            .collect()
    }

    fn count(dom: &Dom, selector: &str) -> usize {
        dom.query_selector_all(selector).unwrap().len()
    }

    #[test]
    fn implied_document_structure() {
        let dom = parse_markup("<nav class='menu'><button id=b>Menu</button></nav>").unwrap();
        assert_eq!(tags(&dom), vec!["html", "head", "body", "nav", "button"]);

        let button = dom.query_by_id("b").unwrap();
        let nav = dom.parent(button).unwrap();
        assert!(dom.get(nav).unwrap().has_class("menu"));
        let body = dom.query_selector("body").unwrap().unwrap();
        assert_eq!(dom.parent(nav), Some(body));
    }

    #[test]
    fn attributes() {
        let dom = parse_markup(
            r#"<button data-toggle-class="is-open" data-toggle-outside aria-expanded=false DATA-X='y'></button>"#,
        )
        .unwrap();
        let id = dom.query_selector("button").unwrap().unwrap();
        let data = dom.get(id).unwrap();
        assert_eq!(data.attribute("data-toggle-class"), Some("is-open"));
        assert_eq!(data.attribute("data-toggle-outside"), Some(""));
        assert_eq!(data.attribute("aria-expanded"), Some("false"));
        assert_eq!(data.attribute("data-x"), Some("y"));
    }

    #[test]
    fn selector_values_survive() {
        let dom = parse_markup(
            r##"<a data-toggle-target-all="#menu > li[data-x=&quot;1&quot;]" href=/docs/index.html></a>"##,
        )
        .unwrap();
        let id = dom.query_selector("a").unwrap().unwrap();
        let data = dom.get(id).unwrap();
        assert_eq!(
            data.attribute("data-toggle-target-all"),
            Some(r#"#menu > li[data-x="1"]"#)
        );
        assert_eq!(data.attribute("href"), Some("/docs/index.html"));
    }

    #[test]
    fn apostrophes_in_text_do_not_hide_elements() {
        let dom = parse_markup(
            r##"<div><p>Don't panic</p><button data-toggle-class="open" data-toggle-target-all="#panel">Open</button><p>It's "fine"</p><div id="panel"></div></div>"##,
        )
        .unwrap();
        assert_eq!(count(&dom, "button[data-toggle-class]"), 1);
        assert_eq!(count(&dom, "#panel"), 1);
        assert_eq!(count(&dom, "p"), 2);
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let dom = parse_markup(r#"<div><button data-toggle-class="open">x</button></span></div></em>"#)
            .unwrap();
        let button = dom.query_selector("button").unwrap().unwrap();
        let div = dom.query_selector("div").unwrap().unwrap();
        assert_eq!(dom.parent(button), Some(div));
    }

    #[test]
    fn void_elements_and_slash() {
        // `/>` does not close a non-void element.
        let dom = parse_markup("<div><br><img src=x.png><span/><p></p></div>").unwrap();
        let div = dom.query_selector("div").unwrap().unwrap();
        let children: Vec<&str> = dom
            .children(div)
            .iter()
            .map(|&id| dom.get(id).unwrap().tag.as_str())
            .collect();
        assert_eq!(children, vec!["br", "img", "span"]);
        let p = dom.query_selector("p").unwrap().unwrap();
        assert_eq!(dom.parent(p), dom.query_selector("span").unwrap());
    }

    #[test]
    fn unclosed_elements_are_closed() {
        let dom = parse_markup("<ul><li>one<li>two").unwrap();
        let ul = dom.query_selector("ul").unwrap().unwrap();
        assert_eq!(dom.children(ul).len(), 2);
    }

    #[test]
    fn end_tag_closes_inner_elements() {
        let dom = parse_markup("<div><span></div><p></p>").unwrap();
        let p = dom.query_selector("p").unwrap().unwrap();
        let body = dom.query_selector("body").unwrap().unwrap();
        assert_eq!(dom.parent(p), Some(body));
    }

    #[test]
    fn first_duplicate_attribute_wins() {
        let dom = parse_markup("<a x=1 x=2></a>").unwrap();
        let a = dom.query_selector("a").unwrap().unwrap();
        assert_eq!(dom.get(a).unwrap().attribute("x"), Some("1"));
    }

    #[test]
    fn non_element_content_is_dropped() {
        let dom = parse_markup(
            r#"<!DOCTYPE html>
               <!-- <button data-toggle-class="x"> -->
               <script>let s = '<button data-toggle-class="y">';</script>
               <p>5 &lt; 6 &amp; "quotes"</p>
               <button data-toggle-class="z"></button>"#,
        )
        .unwrap();
        let buttons = dom.query_selector_all("button").unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(
            dom.get(buttons[0]).unwrap().attribute("data-toggle-class"),
            Some("z")
        );
    }

    #[test]
    fn explicit_body_attributes_kept() {
        let dom = parse_markup(r#"<html lang="en"><body class="page"><main></main></body></html>"#)
            .unwrap();
        assert_eq!(count(&dom, "html[lang=en] > body.page > main"), 1);
        assert_eq!(count(&dom, "body"), 1);
    }
}
