use crate::render::node::{Element, Node};
use crate::render::Renderer;

/// Serializes a node tree into plain text for the terminal. Block
/// elements end their own line; inline elements flow into the current
/// one. Nothing is escaped.
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        write_node(node, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(content) => out.push_str(content),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    for child in &element.children {
        write_node(child, out);
    }

    if is_block(&element.tag) && !out.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "div" | "p" | "h1" | "h2" | "h3" | "h4" | "table" | "thead" | "tbody" | "tr" | "td" | "th"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::node::text;

    #[test]
    fn inline_elements_share_a_line() {
        let tree: Node = Element::new("div")
            .child(Element::new("small").text("09:00 "))
            .child(Element::new("a").text("Standup"))
            .into();

        assert_eq!(TextRenderer.render(&tree), "09:00 Standup\n");
    }

    #[test]
    fn block_elements_each_end_a_line() {
        let tree: Node = Element::new("div")
            .child(Element::new("p").text("first"))
            .child(Element::new("p").text("second"))
            .into();

        assert_eq!(TextRenderer.render(&tree), "first\nsecond\n");
    }

    #[test]
    fn empty_tree_renders_to_nothing() {
        let tree: Node = Element::new("div").into();
        assert_eq!(TextRenderer.render(&tree), "");
    }

    #[test]
    fn bare_text_is_passed_through() {
        assert_eq!(TextRenderer.render(&text("Весь день")), "Весь день");
    }
}
