pub mod html;
pub mod node;
pub mod text;
pub mod views;

pub use html::HtmlRenderer;
pub use node::{Element, Node};
pub use text::TextRenderer;

/// Turns a node tree into a final string. Keeping this behind a trait is
/// what lets the grid logic stay ignorant of the output format.
pub trait Renderer {
    fn render(&self, node: &Node) -> String;
}
