//! In-memory SVG tree

use super::style;

/// A single `name="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written in the source, e.g. `path` or `svg:path`
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: vec![],
            children: vec![],
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn is_path(&self) -> bool {
        self.local_name() == "path"
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attribute value, treating an empty value as absent
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Add a class to the `class` attribute unless it is already present
    pub fn add_class(&mut self, class: &str) {
        let updated = match self.attr("class") {
            Some(existing) if existing.split_whitespace().any(|c| c == class) => return,
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim_end(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", updated);
    }

    /// Value of a property in the inline `style` attribute
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.attr("style")
            .and_then(|s| style::property(s, property))
            .filter(|v| !v.is_empty())
    }

    /// Set a property in the inline `style` attribute
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let updated = style::set_property(self.attr("style").unwrap_or(""), property, value);
        self.set_attr("style", updated);
    }

    /// Direct element children
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// All path elements in document order, including this element if it is one
    pub fn paths(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_paths(self, &mut found);
        found
    }

    /// Visit every path element mutably, in document order
    pub fn for_each_path_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        if self.is_path() {
            f(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.for_each_path_mut(f);
            }
        }
    }

    /// Remove every descendant path element, returning how many were removed
    pub fn remove_paths(&mut self) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(el) if el.is_path()));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            if let Node::Element(el) = child {
                removed += el.remove_paths();
            }
        }
        removed
    }
}

fn collect_paths<'a>(element: &'a Element, found: &mut Vec<&'a Element>) {
    if element.is_path() {
        found.push(element);
    }
    for child in element.child_elements() {
        collect_paths(child, found);
    }
}
