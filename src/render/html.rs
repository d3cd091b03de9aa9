use crate::render::node::{Element, Node};
use crate::render::Renderer;

/// Serializes a node tree into HTML. Text and attribute values are
/// escaped here, so views never need to care about markup injection.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        write_node(node, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(content) => out.push_str(&escape_text(content)),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);

    if !element.classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_attr(&element.classes.join(" ")));
        out.push('"');
    }

    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
