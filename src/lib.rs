//! svgmerge - merge SVG paths and keep preview and code highlighting in sync
//!
//! The crate is split into a pure transformation layer ([`document`], [`merge`],
//! [`identify`], [`format`]) and a session layer ([`highlight`], [`colorize`],
//! [`pane`], [`workspace`]) that a front end drives with user gestures.
//!
//! # Example
//!
//! ```rust
//! use svgmerge::merge_paths;
//!
//! let outcome = merge_paths(r#"<svg><path d="M0 0 L1 1"/><path d="M2 2 L3 3"/></svg>"#);
//! assert_eq!(outcome.markup, r#"<svg><path d="M0 0 L1 1 M2 2 L3 3"/></svg>"#);
//! ```

pub mod colorize;
pub mod document;
pub mod error;
pub mod format;
pub mod highlight;
pub mod identify;
pub mod merge;
pub mod palette;
pub mod pane;
pub mod workspace;

pub use document::{parse, SvgDocument};
pub use error::{ClipboardError, Diagnostic, LoadError, ParseError};
pub use format::{CodeSurface, CodeView};
pub use highlight::{HighlightChange, HighlightState, PointerEvent};
pub use identify::PathIdentifier;
pub use merge::{merge_document, merge_paths, MergeOutcome};
pub use palette::Palette;
pub use pane::{Pane, PaneKind};
pub use workspace::{Clipboard, LoadOutcome, SelectedFile, Workspace};

use thiserror::Error;

/// Errors that can occur in the one-shot processing pipeline
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A requested identifier is not a path of the selected pane
    #[error("no path with identifier '{id}' in the {pane} pane (known: {known})")]
    UnknownPath {
        id: String,
        pane: &'static str,
        known: String,
    },
}

/// Largest number of zoom steps applied in either direction
pub const MAX_ZOOM_STEPS: i32 = 50;

/// What the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// The pane's markup, as loaded or merged
    #[default]
    Markup,
    /// The rendered preview: identifiers, highlight classes, colors, zoom
    Preview,
    /// The formatted code view with highlight overlay
    Code,
    /// Path identifiers, one per line
    Identifiers,
}

/// Configuration for the one-shot processing pipeline
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Which pane to output
    pub pane: PaneKind,
    /// What to output
    pub output: Output,
    /// Surface used for code output
    pub surface: CodeSurface,
    /// Palette for colorization
    pub palette: Palette,
    /// Colorize paths before output
    pub colorize: bool,
    /// Zoom steps applied to the pane; negative zooms out. Clamped to
    /// [`MAX_ZOOM_STEPS`] in either direction.
    pub zoom_steps: i32,
    /// Identifiers to pin, in order; only the last stays pinned
    pub pins: Vec<PathIdentifier>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            pane: PaneKind::Processed,
            output: Output::Markup,
            surface: CodeSurface::PlainText,
            palette: Palette::default(),
            colorize: false,
            zoom_steps: 0,
            pins: vec![],
        }
    }
}

impl ProcessConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pane(mut self, pane: PaneKind) -> Self {
        self.pane = pane;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_surface(mut self, surface: CodeSurface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn with_zoom_steps(mut self, steps: i32) -> Self {
        self.zoom_steps = steps;
        self
    }

    /// Pin a path by identifier
    pub fn with_pin(mut self, id: impl Into<PathIdentifier>) -> Self {
        self.pins.push(id.into());
        self
    }
}

/// Result of the one-shot pipeline
#[derive(Debug, Clone)]
pub struct Processed {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run a workspace over `source` as a front end would and render one pane.
///
/// # Example
///
/// ```rust
/// use svgmerge::{process_with_config, Output, ProcessConfig};
///
/// let config = ProcessConfig::new().with_output(Output::Code).with_pin("path-0");
/// let processed = process_with_config(
///     "drawing.svg",
///     r#"<svg><path d="M0 0"/><path d="M1 1"/></svg>"#,
///     config,
/// )
/// .unwrap();
/// assert!(processed.output.contains("[HIGHLIGHT]"));
/// ```
pub fn process_with_config(
    name: &str,
    source: &str,
    config: ProcessConfig,
) -> Result<Processed, ProcessError> {
    let mut workspace = Workspace::with_palette(&config.palette);
    let diagnostics = match workspace.load_markup(name, source)? {
        LoadOutcome::Loaded { diagnostics, .. } => diagnostics,
        LoadOutcome::NoFile => vec![],
    };

    let zoom_steps = config.zoom_steps.clamp(-MAX_ZOOM_STEPS, MAX_ZOOM_STEPS);
    for _ in 0..zoom_steps.unsigned_abs() {
        if zoom_steps > 0 {
            workspace.zoom_in(config.pane);
        } else {
            workspace.zoom_out(config.pane);
        }
    }

    if config.colorize {
        workspace.toggle_colorize();
    }

    let pane = workspace.pane(config.pane);
    for id in &config.pins {
        if !pane.contains(id) {
            return Err(ProcessError::UnknownPath {
                id: id.to_string(),
                pane: config.pane.label(),
                known: pane
                    .identifiers()
                    .iter()
                    .map(PathIdentifier::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }
    for id in config.pins {
        if workspace.highlight().pinned() != Some(&id) {
            workspace.pointer_click(id);
        }
    }

    let pane = workspace.pane(config.pane);
    let output = match config.output {
        Output::Markup => pane.source().unwrap_or_default().to_string(),
        Output::Preview => pane.render_preview(workspace.highlight()),
        Output::Code => pane.render_code(config.surface, workspace.highlight()),
        Output::Identifiers => pane
            .identifiers()
            .iter()
            .map(PathIdentifier::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
    };

    Ok(Processed {
        output,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"<svg><path d="M0 0"/><path id="b" d="L1 1"/></svg>"#;

    #[test]
    fn test_default_outputs_merged_markup() {
        let processed = process_with_config("a.svg", SOURCE, ProcessConfig::default()).unwrap();
        assert_eq!(
            processed.output,
            r#"<svg><path d="M0 0 M L1 1"/></svg>"#
        );
    }

    #[test]
    fn test_identifiers_output() {
        let config = ProcessConfig::new()
            .with_pane(PaneKind::Original)
            .with_output(Output::Identifiers);
        let processed = process_with_config("a.svg", SOURCE, config).unwrap();
        assert_eq!(processed.output, "path-0\nb");
    }

    #[test]
    fn test_unknown_pin_is_an_error() {
        let config = ProcessConfig::new().with_pin("nope");
        let err = process_with_config("a.svg", SOURCE, config).unwrap_err();
        assert!(matches!(err, ProcessError::UnknownPath { .. }));
        assert!(err.to_string().contains("path-0"));
    }

    #[test]
    fn test_preview_output_with_zoom() {
        let config = ProcessConfig::new()
            .with_output(Output::Preview)
            .with_zoom_steps(1);
        let processed = process_with_config("a.svg", SOURCE, config).unwrap();
        assert!(processed.output.contains("transform: scale(1.2);"));
        assert!(processed.output.contains(r#"data-path-id="path-0""#));
    }

    #[test]
    fn test_zoom_steps_are_clamped() {
        let config = ProcessConfig::new()
            .with_output(Output::Preview)
            .with_zoom_steps(i32::MIN);
        let processed = process_with_config("a.svg", SOURCE, config).unwrap();
        let scale: f64 = processed
            .output
            .split("scale(")
            .nth(1)
            .and_then(|rest| rest.split(')').next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        let expected = pane::ZOOM_FACTOR.powi(-MAX_ZOOM_STEPS);
        assert!(scale > 0.0);
        assert!((scale / expected - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_html_code_output() {
        let config = ProcessConfig::new()
            .with_output(Output::Code)
            .with_surface(CodeSurface::Html)
            .with_pin("path-0");
        let processed = process_with_config("a.svg", SOURCE, config).unwrap();
        assert!(processed.output.starts_with("&lt;svg&gt;"));
        assert!(processed.output.contains(r#"<mark class="highlighted">"#));
    }

    #[test]
    fn test_non_svg_name_still_loads() {
        // Markup handed in directly skips the extension check
        let processed = process_with_config("stdin", SOURCE, ProcessConfig::default());
        assert!(processed.is_ok());
    }
}
