//! Best-effort markup parser
//!
//! Tokenizes with quick-xml and builds the tree itself so that mismatched or
//! missing end tags are repaired instead of aborting the parse. Every repair is
//! reported as a [`Diagnostic`].

use std::borrow::Cow;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::{Diagnostic, ParseError, Span};

use super::tree::{Attribute, Element, Node};
use super::SvgDocument;

/// A parsed document together with everything the parser had to repair
#[derive(Debug, Clone)]
pub struct Parsed {
    pub document: SvgDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse markup into a tree.
///
/// Only a source without any element fails; every other problem is recovered
/// from and listed in [`Parsed::diagnostics`].
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let decoder = reader.decoder();
    let mut builder = TreeBuilder::default();

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event();
        let span = start..reader.buffer_position() as usize;

        match event {
            Ok(Event::Start(e)) => {
                let element = element_from(&e, &span, decoder, &mut builder.diagnostics);
                builder.open(element, span);
            }
            Ok(Event::Empty(e)) => {
                let element = element_from(&e, &span, decoder, &mut builder.diagnostics);
                builder.append(Node::Element(element), &span);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                builder.close(&name, span);
            }
            Ok(Event::Text(t)) => match t.decode() {
                Ok(text) => builder.text(&text),
                Err(err) => builder.diagnose(span, format!("undecodable text: {}", err)),
            },
            Ok(Event::GeneralRef(r)) => {
                let text = resolve_reference(&r, &span, &mut builder.diagnostics);
                builder.text(&text);
            }
            Ok(Event::CData(c)) => match c.decode() {
                Ok(text) => builder.append(Node::CData(text.into_owned()), &span),
                Err(err) => builder.diagnose(span, format!("undecodable CDATA: {}", err)),
            },
            Ok(Event::Comment(c)) => match c.decode() {
                Ok(text) => builder.append(Node::Comment(text.into_owned()), &span),
                Err(err) => builder.diagnose(span, format!("undecodable comment: {}", err)),
            },
            Ok(Event::Eof) => break,
            // Declarations, processing instructions and doctypes are not kept
            Ok(_) => {}
            Err(err) => {
                let at = reader.error_position() as usize;
                builder.diagnose(at..at, format!("markup error, rest of input ignored: {}", err));
                break;
            }
        }
    }

    builder.finish(source.len())
}

/// Build an element from a start tag, skipping malformed attributes
fn element_from(
    start: &BytesStart<'_>,
    span: &Span,
    decoder: quick_xml::encoding::Decoder,
    diagnostics: &mut Vec<Diagnostic>,
) -> Element {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attr in start.attributes().with_checks(false) {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    span.clone(),
                    format!("malformed attribute on <{}>: {}", element.name, err),
                ));
                continue;
            }
        };

        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.decode_and_unescape_value(decoder) {
            Ok(value) => value.into_owned(),
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    span.clone(),
                    format!("attribute '{}' kept unescaped: {}", name, err),
                ));
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };

        // First occurrence wins
        if element.has_attr(&name) {
            diagnostics.push(Diagnostic::new(
                span.clone(),
                format!("duplicate attribute '{}' on <{}>", name, element.name),
            ));
        } else {
            element.attributes.push(Attribute::new(name, value));
        }
    }

    element
}

/// Resolve `&name;` and `&#...;` references in text
fn resolve_reference(
    reference: &BytesRef<'_>,
    span: &Span,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let name: Cow<'_, str> = match reference.decode() {
        Ok(name) => name,
        Err(err) => {
            diagnostics.push(Diagnostic::new(span.clone(), err.to_string()));
            return String::new();
        }
    };

    if let Ok(Some(ch)) = reference.resolve_char_ref() {
        return ch.to_string();
    }
    if let Some(resolved) = resolve_predefined_entity(&name) {
        return resolved.to_string();
    }

    diagnostics.push(Diagnostic::new(
        span.clone(),
        format!("unknown entity '&{};' kept as text", name),
    ));
    format!("&{};", name)
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<(Element, Span)>,
    root: Option<Element>,
    diagnostics: Vec<Diagnostic>,
}

impl TreeBuilder {
    fn diagnose(&mut self, span: Span, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(span, message);
        warn!(span = ?diagnostic.span, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    fn open(&mut self, element: Element, span: Span) {
        self.stack.push((element, span));
    }

    fn append(&mut self, node: Node, span: &Span) {
        if let Some((parent, _)) = self.stack.last_mut() {
            parent.children.push(node);
            return;
        }

        match node {
            Node::Element(element) if self.root.is_none() => self.root = Some(element),
            Node::Element(element) => self.diagnose(
                span.clone(),
                format!("<{}> after the root element ignored", element.name),
            ),
            // Whitespace and comments around the root are not part of the tree
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let Some((parent, _)) = self.stack.last_mut() else {
            return;
        };
        // References arrive as separate events; join them with the adjacent text
        if let Some(Node::Text(existing)) = parent.children.last_mut() {
            existing.push_str(text);
        } else {
            parent.children.push(Node::Text(text.to_string()));
        }
    }

    fn close(&mut self, name: &str, span: Span) {
        let Some(position) = self.stack.iter().rposition(|(el, _)| el.name == name) else {
            self.diagnose(span, format!("unmatched closing tag </{}> ignored", name));
            return;
        };

        while self.stack.len() > position + 1 {
            if let Some((unclosed, open_span)) = self.stack.pop() {
                self.diagnose(
                    open_span.clone(),
                    format!("<{}> closed implicitly by </{}>", unclosed.name, name),
                );
                self.append(Node::Element(unclosed), &open_span);
            }
        }
        if let Some((element, open_span)) = self.stack.pop() {
            self.append(Node::Element(element), &open_span);
        }
    }

    fn finish(mut self, len: usize) -> Result<Parsed, ParseError> {
        while let Some((unclosed, open_span)) = self.stack.pop() {
            self.diagnose(
                open_span.clone(),
                format!("<{}> not closed before end of input", unclosed.name),
            );
            self.append(Node::Element(unclosed), &open_span);
        }

        match self.root {
            Some(root) => {
                debug!(
                    diagnostics = self.diagnostics.len(),
                    bytes = len,
                    "parsed <{}> document",
                    root.name
                );
                Ok(Parsed {
                    document: SvgDocument { root },
                    diagnostics: self.diagnostics,
                })
            }
            None => Err(ParseError::NoRootElement {
                diagnostics: self.diagnostics,
            }),
        }
    }
}
