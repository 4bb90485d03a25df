//! Snapshot helpers.
//!
//! Functions for converting a document (and engine state) into indented
//! plain-text outlines suitable for snapshot testing and assertions.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::engine::ToggleEngine;
use crate::markup::serialize::start_tag;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Outline of the document: one start tag per line, indented two spaces per
/// level. The `#document` node is not printed. Lines are joined with `'\n'`
/// and the output has no trailing newline.
///
/// # Examples
///
/// ```
/// use toggle_state::markup::parse_markup;
/// use toggle_state::testing::outline;
///
/// let dom = parse_markup("<nav><button></button></nav>").unwrap();
/// assert_eq!(
///     outline(&dom),
///     "<html>\n  <head>\n  <body>\n    <nav>\n      <button>"
/// );
/// ```
pub fn outline(dom: &Dom) -> String {
    render_lines(dom, |_| "")
}

/// Like [`outline`], with ` *` appended to every active trigger.
pub fn engine_outline(engine: &ToggleEngine) -> String {
    render_lines(engine.document(), |id| {
        if engine.is_active(id) {
            " *"
        } else {
            ""
        }
    })
}

fn render_lines(dom: &Dom, marker: impl Fn(NodeId) -> &'static str) -> String {
    let Some(root) = dom.root() else {
        return String::new();
    };
    let mut lines = Vec::new();
    for id in dom.walk_depth_first(root) {
        let Some(data) = dom.get(id) else {
            continue;
        };
        if data.is_document() {
            continue;
        }
        let depth = dom
            .ancestors(id)
            .into_iter()
            .filter(|&a| dom.get(a).is_some_and(|n| !n.is_document()))
            .count();
        lines.push(format!(
            "{}{}{}",
            "  ".repeat(depth),
            start_tag(data),
            marker(id)
        ));
    }
    lines.join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;

    #[test]
    fn outline_empty_document() {
        assert_eq!(outline(&Dom::with_document()), "");
        assert_eq!(outline(&Dom::new()), "");
    }

    #[test]
    fn outline_indents_by_depth() {
        let dom = parse_markup("<ul id=l><li></li><li><a></a></li></ul><p></p>").unwrap();
        insta::assert_snapshot!(outline(&dom), @r#"
        <html>
          <head>
          <body>
            <ul id="l">
              <li>
              <li>
                <a>
            <p>
        "#);
    }

    #[test]
    fn engine_outline_marks_active_triggers() {
        let mut engine = ToggleEngine::from_markup(
            r#"<button data-toggle-class="on" data-toggle-is-active></button><button data-toggle-class="on"></button>"#,
        )
        .unwrap();
        let buttons = |engine: &ToggleEngine| -> Vec<String> {
            engine_outline(engine)
                .lines()
                .filter(|l| l.contains("<button"))
                .map(String::from)
                .collect()
        };
        let lines = buttons(&engine);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" *"));
        assert!(!lines[1].ends_with(" *"));
        assert!(engine_outline(&engine).starts_with("<html>\n"));

        let second = engine.document().query_selector_all("button").unwrap()[1];
        engine.toggle(second);
        assert!(buttons(&engine).iter().all(|l| l.ends_with(" *")));
    }
}
