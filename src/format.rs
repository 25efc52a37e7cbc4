//! Code view formatting and highlight overlay
//!
//! The formatted code text is built once per loaded document and never changes.
//! Highlighting is an overlay: the view records where each `<path ...>` tag sits
//! in the text and which identifier it belongs to, and rendering wraps the
//! highlighted ranges for the target surface.

use std::ops::Range;
use std::sync::LazyLock;

use quick_xml::escape::escape;
use regex::Regex;
use tracing::warn;

use crate::document::SvgDocument;
use crate::identify::{strip_markers, PathIdentifier};

/// Class given to highlighted paths and code fragments
pub const HIGHLIGHT_CLASS: &str = "highlighted";

/// Markers wrapped around highlighted code on a plain text surface
pub const PLAIN_OPEN: &str = "[HIGHLIGHT]";
pub const PLAIN_CLOSE: &str = "[/HIGHLIGHT]";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static TAG_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"> ?<").expect("valid regex"));

// Path start tags, optionally namespace prefixed. Serialized attribute values
// never contain a raw `<` or `>`, text is escaped, and comments and CDATA are
// matched whole so tags written inside them are skipped.
static CODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|(?P<path><(?:[A-Za-z_][\w.\-]*:)?path(?:\s[^>]*)?/?>)",
    )
    .expect("valid regex")
});

/// Where code is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeSurface {
    /// Text-only display: no escaping, highlights as bracket markers
    #[default]
    PlainText,
    /// Markup-capable display: text escaped, highlights as `<mark>` wrappers
    Html,
}

/// Cosmetic formatting: collapse whitespace runs, one tag per line, trim
pub fn format_markup(markup: &str) -> String {
    let collapsed = WHITESPACE.replace_all(markup, " ");
    let broken = TAG_GAP.replace_all(&collapsed, ">\n<");
    broken.trim().to_string()
}

/// A path tag located in the code text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePath {
    pub id: PathIdentifier,
    pub range: Range<usize>,
}

/// Formatted code of one pane with its path index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeView {
    text: String,
    paths: Vec<CodePath>,
}

impl CodeView {
    /// Build the code view of a tagged document.
    ///
    /// `identifiers` must list the document's path identifiers in document order,
    /// as returned by [`crate::identify::tag_paths`]. Synthesized markers are left
    /// out of the text.
    pub fn build(doc: &SvgDocument, identifiers: &[PathIdentifier]) -> Self {
        let mut clean = doc.root.clone();
        strip_markers(&mut clean);
        let text = format_markup(&crate::document::to_markup(&clean));

        let ranges: Vec<Range<usize>> = CODE_TOKEN
            .captures_iter(&text)
            .filter_map(|caps| caps.name("path"))
            .map(|m| m.range())
            .collect();
        if ranges.len() != identifiers.len() {
            warn!(
                tags = ranges.len(),
                identifiers = identifiers.len(),
                "path tags in code do not line up with document paths"
            );
        }

        let paths = identifiers
            .iter()
            .cloned()
            .zip(ranges)
            .map(|(id, range)| CodePath { id, range })
            .collect();

        Self { text, paths }
    }

    /// The formatted code, without any highlight markers
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn paths(&self) -> &[CodePath] {
        &self.paths
    }

    /// Text ranges of every tag belonging to `id`
    pub fn ranges_of<'a>(
        &'a self,
        id: &'a PathIdentifier,
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        self.paths
            .iter()
            .filter(move |p| &p.id == id)
            .map(|p| p.range.clone())
    }

    /// Render the code for `surface`, wrapping tags whose identifier is highlighted
    pub fn render<F>(&self, surface: CodeSurface, is_highlighted: F) -> String
    where
        F: Fn(&PathIdentifier) -> bool,
    {
        let (open, close) = match surface {
            CodeSurface::PlainText => (PLAIN_OPEN.to_string(), PLAIN_CLOSE.to_string()),
            CodeSurface::Html => (format!(r#"<mark class="{}">"#, HIGHLIGHT_CLASS), "</mark>".to_string()),
        };
        let emit = |out: &mut String, fragment: &str| match surface {
            CodeSurface::PlainText => out.push_str(fragment),
            CodeSurface::Html => out.push_str(&escape(fragment)),
        };

        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for path in self.paths.iter().filter(|p| is_highlighted(&p.id)) {
            emit(&mut out, &self.text[cursor..path.range.start]);
            out.push_str(&open);
            emit(&mut out, &self.text[path.range.clone()]);
            out.push_str(&close);
            cursor = path.range.end;
        }
        emit(&mut out, &self.text[cursor..]);
        out
    }
}
