//! Error types for markup parsing and user actions

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A recoverable problem found while parsing markup.
///
/// The parser never rejects a document because of these; they describe what it
/// had to repair or skip to produce a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Format the diagnostic with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        // Clamp so a span reported at end of input still points into the source
        let start = self.span.start.min(source.len());
        let end = self.span.end.clamp(start, source.len());

        let written = Report::build(ReportKind::Warning, filename, start)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {} at {:?}", filename, self.message, self.span),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

/// Unrecoverable markup problems
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no root element found")]
    NoRootElement { diagnostics: Vec<Diagnostic> },
}

impl ParseError {
    /// Diagnostics collected before parsing gave up
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ParseError::NoRootElement { diagnostics } => diagnostics,
        }
    }
}

/// Reasons a selected file could not be displayed
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file is not SVG by media type or extension
    #[error("'{name}' is not an SVG file ({found})")]
    NotSvg { name: String, found: String },

    /// The file contents could not be read as text
    #[error("failed to read '{name}': {reason}")]
    Read { name: String, reason: String },

    /// The file contained no usable markup
    #[error("could not parse '{name}': {source}")]
    Markup {
        name: String,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    pub fn not_svg(name: impl Into<String>, found: impl Into<String>) -> Self {
        Self::NotSvg {
            name: name.into(),
            found: found.into(),
        }
    }

    pub fn read(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Read {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// A clipboard write that did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_svg_display() {
        let err = LoadError::not_svg("photo.png", "image/png");
        assert!(err.to_string().contains("photo.png"));
        assert!(err.to_string().contains("image/png"));
    }

    #[test]
    fn test_markup_error_keeps_source() {
        let err = LoadError::Markup {
            name: "empty.svg".to_string(),
            source: ParseError::NoRootElement {
                diagnostics: vec![],
            },
        };
        assert!(err.to_string().contains("no root element"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_diagnostic_format_includes_message() {
        let source = "<svg><g></svg>";
        let diag = Diagnostic::new(5..8, "element <g> was not closed");
        let formatted = diag.format(source, "broken.svg");
        assert!(formatted.contains("element <g> was not closed"));
    }

    #[test]
    fn test_diagnostic_format_clamps_span() {
        let diag = Diagnostic::new(40..50, "unexpected end of input");
        let formatted = diag.format("<svg>", "short.svg");
        assert!(formatted.contains("unexpected end of input"));
    }
}
