//! Snapshot rendering helpers.
//!
//! Serialize a document subtree to compact HTML for snapshot tests and
//! assertions. Attributes print sorted by name, with `class` first.

use std::fmt::Write;

use crate::dom::{Document, NodeId, NodeKind};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The inner HTML of `node`. Marker comments are left out.
///
/// # Examples
///
/// ```
/// use weft::dom::Document;
/// use weft::testing::render_to_string;
///
/// let mut doc = Document::new();
/// let body = doc.create_element("body");
/// let p = doc.create_element("p");
/// doc.set_attribute(p, "class", "lead");
/// doc.append_child(body, p);
/// let text = doc.create_text("hi");
/// doc.append_child(p, text);
/// assert_eq!(render_to_string(&doc, body), r#"<p class="lead">hi</p>"#);
/// ```
pub fn render_to_string(doc: &Document, node: NodeId) -> String {
    inner(doc, node, false)
}

/// Like [`render_to_string`], but fragment markers and other comments are
/// printed as `<!--text-->`.
pub fn render_with_markers(doc: &Document, node: NodeId) -> String {
    inner(doc, node, true)
}

/// The outer HTML of `node`, the node itself included.
pub fn render_node(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, false, &mut out);
    out
}

fn inner(doc: &Document, node: NodeId, markers: bool) -> String {
    let mut out = String::new();
    for &child in doc.children(node) {
        write_node(doc, child, markers, &mut out);
    }
    out
}

fn write_node(doc: &Document, node: NodeId, markers: bool, out: &mut String) {
    let Some(data) = doc.get(node) else {
        return;
    };
    match &data.kind {
        NodeKind::Text(text) => out.push_str(&escape(text, false)),
        NodeKind::Comment(text) => {
            if markers {
                let _ = write!(out, "<!--{text}-->");
            }
        }
        NodeKind::Fragment => {
            for &child in doc.children(node) {
                write_node(doc, child, markers, out);
            }
        }
        NodeKind::Element(tag) => {
            out.push('<');
            out.push_str(tag);
            if !data.classes.is_empty() {
                let _ = write!(out, " class=\"{}\"", escape(&data.classes.join(" "), true));
            }
            for (name, value) in &data.attributes {
                if value.is_empty() {
                    let _ = write!(out, " {name}");
                } else {
                    let _ = write!(out, " {name}=\"{}\"", escape(value, true));
                }
            }
            out.push('>');
            for &child in doc.children(node) {
                write_node(doc, child, markers, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
