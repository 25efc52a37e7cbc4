//! SVG document model
//!
//! A small owned tree, a best-effort parser that never rejects markup it can
//! recover from, and a serializer producing compact markup.

mod parser;
pub mod style;
mod tree;
mod writer;

pub use parser::{parse, Parsed};
pub use tree::{Attribute, Element, Node};
pub use writer::to_markup;

/// A parsed SVG document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub root: Element,
}

impl SvgDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// All path elements in document order
    pub fn paths(&self) -> Vec<&Element> {
        self.root.paths()
    }

    pub fn path_count(&self) -> usize {
        self.root.paths().len()
    }

    /// Serialize the root element
    pub fn to_markup(&self) -> String {
        to_markup(&self.root)
    }
}
