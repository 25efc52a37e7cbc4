//! Markup serialization
//!
//! Produces the compact form an XML serializer gives for an element: attributes in
//! stored order, childless elements self-closed, no added whitespace.

use quick_xml::escape::{escape, partial_escape};

use super::tree::{Element, Node};

/// Serialize an element and its subtree
pub fn to_markup(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape(attr.value.as_str()));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(el, out),
            Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Node::CData(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}
