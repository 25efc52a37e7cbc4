//! Display panes
//!
//! A pane owns everything one side of the tool shows: the preview tree (tagged,
//! possibly recolored), the code view, the zoom scale and the color snapshots.
//! Rendering turns that state into markup for an adapter to display.

use tracing::debug;

use crate::colorize::ColorRecords;
use crate::document::{to_markup, Element, Node, SvgDocument};
use crate::format::{CodeSurface, CodeView, HIGHLIGHT_CLASS};
use crate::highlight::HighlightState;
use crate::identify::{tag_paths, PathIdentifier};
use crate::palette::ColorGenerator;

/// Multiplier applied per zoom step
pub const ZOOM_FACTOR: f64 = 1.2;

/// Which side of the tool a pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneKind {
    /// The uploaded markup as is
    Original,
    /// The markup after path merging
    Processed,
}

impl PaneKind {
    /// Text shown while the pane is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            PaneKind::Original => "Upload an SVG file to see preview",
            PaneKind::Processed => "Processed SVG will appear here",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaneKind::Original => "original",
            PaneKind::Processed => "processed",
        }
    }
}

/// A loaded document as displayed in a pane
#[derive(Debug, Clone)]
struct PaneContent {
    source: String,
    preview: SvgDocument,
    identifiers: Vec<PathIdentifier>,
    code: CodeView,
}

/// State of one display pane
#[derive(Debug, Clone)]
pub struct Pane {
    kind: PaneKind,
    content: Option<PaneContent>,
    scale: f64,
    colorized: bool,
    colors: ColorRecords,
}

impl Pane {
    pub fn new(kind: PaneKind) -> Self {
        Self {
            kind,
            content: None,
            scale: 1.0,
            colorized: false,
            colors: ColorRecords::new(),
        }
    }

    pub fn kind(&self) -> PaneKind {
        self.kind
    }

    /// Show a document; `source` is the markup the document was made from
    pub fn display(&mut self, source: String, mut document: SvgDocument) {
        let identifiers = tag_paths(&mut document);
        let code = CodeView::build(&document, &identifiers);
        debug!(
            pane = self.kind.label(),
            paths = identifiers.len(),
            "displaying document"
        );

        self.content = Some(PaneContent {
            source,
            preview: document,
            identifiers,
            code,
        });
        self.reset_zoom();
        self.colorized = false;
        self.colors.clear();
    }

    /// Back to the placeholder with default zoom and no color state
    pub fn clear(&mut self) {
        self.content = None;
        self.scale = 1.0;
        self.colorized = false;
        self.colors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Markup this pane was loaded from
    pub fn source(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.source.as_str())
    }

    /// The tagged preview tree
    pub fn preview(&self) -> Option<&SvgDocument> {
        self.content.as_ref().map(|c| &c.preview)
    }

    pub fn code(&self) -> Option<&CodeView> {
        self.content.as_ref().map(|c| &c.code)
    }

    /// Identifiers of this pane's paths in document order
    pub fn identifiers(&self) -> &[PathIdentifier] {
        self.content
            .as_ref()
            .map(|c| c.identifiers.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: &PathIdentifier) -> bool {
        self.identifiers().contains(id)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Zoom in one step; no effect on an empty pane
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(ZOOM_FACTOR)
    }

    /// Zoom out one step; no effect on an empty pane
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / ZOOM_FACTOR)
    }

    fn zoom_by(&mut self, factor: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        self.scale *= factor;
        true
    }

    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
    }

    /// CSS transform for the current scale
    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn is_colorized(&self) -> bool {
        self.colorized
    }

    pub fn colors(&self) -> &ColorRecords {
        &self.colors
    }

    /// Switch colorization on or off for every path in the preview
    pub fn set_colorized(&mut self, on: bool, colors: &mut ColorGenerator) {
        self.colorized = on;
        let Some(content) = self.content.as_mut() else {
            return;
        };
        if on {
            self.colors.colorize(&mut content.preview.root, colors);
        } else {
            self.colors.restore(&mut content.preview.root);
        }
    }

    /// Identifiers of this pane's paths that are highlighted
    pub fn highlighted<'a>(&'a self, highlight: &HighlightState) -> Vec<&'a PathIdentifier> {
        self.identifiers()
            .iter()
            .filter(|id| highlight.is_highlighted(id))
            .collect()
    }

    /// Render the preview: placeholder when empty, otherwise the preview tree
    /// with highlight classes and the zoom transform applied
    pub fn render_preview(&self, highlight: &HighlightState) -> String {
        let Some(content) = &self.content else {
            return placeholder_markup(self.kind);
        };

        let mut root = content.preview.root.clone();
        mark_highlighted(&mut root, highlight);
        if self.scale != 1.0 {
            root.set_style_property("transform", &self.transform());
        }
        to_markup(&root)
    }

    /// Render the code view for `surface`; empty when nothing is loaded
    pub fn render_code(&self, surface: CodeSurface, highlight: &HighlightState) -> String {
        self.code()
            .map(|code| code.render(surface, |id| highlight.is_highlighted(id)))
            .unwrap_or_default()
    }
}

fn mark_highlighted(root: &mut Element, highlight: &HighlightState) {
    let highlighted = highlight.highlighted();
    if highlighted.is_empty() {
        return;
    }
    root.for_each_path_mut(&mut |path| {
        if highlighted.iter().any(|id| id.matches(path)) {
            path.add_class(HIGHLIGHT_CLASS);
        }
    });
}

fn placeholder_markup(kind: PaneKind) -> String {
    let paragraph = Element::new("p")
        .with_attr("class", "preview-placeholder")
        .with_child(Node::Text(kind.placeholder().to_string()));
    to_markup(&paragraph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    fn loaded(source: &str) -> Pane {
        let mut pane = Pane::new(PaneKind::Original);
        let doc = parse(source).expect("Should parse").document;
        pane.display(source.to_string(), doc);
        pane
    }

    #[test]
    fn test_empty_pane_renders_placeholder() {
        let pane = Pane::new(PaneKind::Processed);
        assert_eq!(
            pane.render_preview(&HighlightState::Idle),
            r#"<p class="preview-placeholder">Processed SVG will appear here</p>"#
        );
        assert_eq!(pane.render_code(CodeSurface::PlainText, &HighlightState::Idle), "");
    }

    #[test]
    fn test_zoom_ignored_when_empty() {
        let mut pane = Pane::new(PaneKind::Original);
        assert!(!pane.zoom_in());
        assert_eq!(pane.scale(), 1.0);
    }

    #[test]
    fn test_zoom_steps() {
        let mut pane = loaded(r#"<svg><path d="M0 0"/></svg>"#);
        assert!(pane.zoom_in());
        assert!((pane.scale() - 1.2).abs() < 1e-9);
        pane.zoom_out();
        assert!((pane.scale() - 1.0).abs() < 1e-9);
        pane.zoom_in();
        pane.reset_zoom();
        assert_eq!(pane.transform(), "scale(1)");
    }

    #[test]
    fn test_preview_carries_transform_when_zoomed() {
        let mut pane = loaded(r#"<svg><path d="M0 0"/></svg>"#);
        pane.zoom_in();
        let preview = pane.render_preview(&HighlightState::Idle);
        assert!(preview.starts_with(r#"<svg style="transform: scale(1.2);">"#));
    }

    #[test]
    fn test_preview_highlights_matching_paths_only() {
        let pane = loaded(r#"<svg><path d="M0 0"/><path id="b" d="M1 1"/></svg>"#);
        let state = HighlightState::Hovering(PathIdentifier::from("b"));
        assert_eq!(
            pane.render_preview(&state),
            r#"<svg><path d="M0 0" data-path-id="path-0"/><path id="b" d="M1 1" class="highlighted"/></svg>"#
        );
        assert_eq!(pane.highlighted(&state), vec![&PathIdentifier::from("b")]);
    }

    #[test]
    fn test_display_resets_pane_state() {
        let mut pane = loaded(r#"<svg><path d="M0 0"/></svg>"#);
        let mut gen = Palette::default().with_seed(5).generator();
        pane.zoom_in();
        pane.set_colorized(true, &mut gen);
        assert_eq!(pane.colors().len(), 1);

        let doc = parse(r#"<svg><path d="M2 2"/></svg>"#).expect("Should parse").document;
        pane.display(String::new(), doc);
        assert_eq!(pane.scale(), 1.0);
        assert!(!pane.is_colorized());
        assert!(pane.colors().is_empty());
    }

    #[test]
    fn test_clear_restores_placeholder() {
        let mut pane = loaded(r#"<svg><path d="M0 0"/></svg>"#);
        pane.zoom_in();
        pane.clear();
        assert!(pane.is_empty());
        assert_eq!(pane.scale(), 1.0);
        assert!(pane.identifiers().is_empty());
        assert!(pane.render_preview(&HighlightState::Idle).contains("preview-placeholder"));
    }

    #[test]
    fn test_code_view_is_independent_of_colors() {
        let mut pane = loaded(r#"<svg><path d="M0 0"/></svg>"#);
        let before = pane.code().map(|c| c.text().to_string());
        let mut gen = Palette::default().with_seed(5).generator();
        pane.set_colorized(true, &mut gen);
        assert_eq!(pane.code().map(|c| c.text().to_string()), before);
    }
}
