//! Interactive session
//!
//! A [`Workspace`] is the whole tool as a value: the original and processed panes,
//! the highlight shared between them, colorization and the transient status
//! line. Front ends translate user gestures into calls on it and render the panes
//! afterwards.

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::document;
use crate::error::{ClipboardError, Diagnostic, LoadError};
use crate::highlight::{HighlightChange, HighlightState, PointerEvent};
use crate::identify::PathIdentifier;
use crate::merge::merge_document;
use crate::pane::{Pane, PaneKind};
use crate::palette::{ColorGenerator, Palette};

/// Media type accepted for uploads
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// How long a status message stays visible
pub const STATUS_TTL: Duration = Duration::from_secs(2);

/// A file picked by the user
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Media type reported by the picker, if any
    pub media_type: Option<String>,
    pub contents: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            contents: contents.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Coarse type check: media type when reported, file extension otherwise
    pub fn is_svg(&self) -> bool {
        match &self.media_type {
            Some(media_type) => media_type.eq_ignore_ascii_case(SVG_MEDIA_TYPE),
            None => self.name.to_ascii_lowercase().ends_with(".svg"),
        }
    }
}

/// Result of a load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was selected; state is unchanged
    NoFile,
    Loaded {
        /// Paths in the original document
        paths: usize,
        /// Whether the processed pane differs from the original
        merged: bool,
        /// Problems the parser recovered from
        diagnostics: Vec<Diagnostic>,
    },
}

/// Destination of the copy action
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A message that dismisses itself after its time to live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
            ttl: STATUS_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

/// Both panes plus the state shared between them
#[derive(Debug, Clone)]
pub struct Workspace {
    original: Pane,
    processed: Pane,
    highlight: HighlightState,
    colorized: bool,
    colors: ColorGenerator,
    status: Option<StatusMessage>,
    file_name: Option<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Empty workspace using the default palette
    pub fn new() -> Self {
        Self::with_palette(&Palette::default())
    }

    pub fn with_palette(palette: &Palette) -> Self {
        Self {
            original: Pane::new(PaneKind::Original),
            processed: Pane::new(PaneKind::Processed),
            highlight: HighlightState::Idle,
            colorized: false,
            colors: palette.generator(),
            status: None,
            file_name: None,
        }
    }

    pub fn pane(&self, kind: PaneKind) -> &Pane {
        match kind {
            PaneKind::Original => &self.original,
            PaneKind::Processed => &self.processed,
        }
    }

    fn pane_mut(&mut self, kind: PaneKind) -> &mut Pane {
        match kind {
            PaneKind::Original => &mut self.original,
            PaneKind::Processed => &mut self.processed,
        }
    }

    pub fn original(&self) -> &Pane {
        &self.original
    }

    pub fn processed(&self) -> &Pane {
        &self.processed
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn is_colorized(&self) -> bool {
        self.colorized
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Load a selected file into both panes.
    ///
    /// `None` is a silent no-op. A rejected file leaves the displayed state as it
    /// was and shows an error status.
    pub fn load(&mut self, file: Option<SelectedFile>) -> Result<LoadOutcome, LoadError> {
        let Some(file) = file else {
            return Ok(LoadOutcome::NoFile);
        };

        match self.try_load(file) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!("{}", err);
                self.status = Some(StatusMessage::new(StatusKind::Error, err.to_string()));
                Err(err)
            }
        }
    }

    fn try_load(&mut self, file: SelectedFile) -> Result<LoadOutcome, LoadError> {
        if !file.is_svg() {
            let found = file
                .media_type
                .clone()
                .unwrap_or_else(|| "unknown type".to_string());
            return Err(LoadError::not_svg(file.name, found));
        }

        let SelectedFile { name, contents, .. } = file;
        let source = String::from_utf8(contents).map_err(|e| LoadError::read(&name, e))?;
        let parsed = document::parse(&source).map_err(|source| LoadError::Markup {
            name: name.clone(),
            source,
        })?;
        for diagnostic in &parsed.diagnostics {
            warn!(file = %name, "{}", diagnostic);
        }

        let paths = parsed.document.path_count();
        let processed = merge_document(&parsed.document);
        let merged = processed.is_some();

        self.clear_session();
        self.original.display(source.clone(), parsed.document.clone());
        match processed {
            Some(doc) => self.processed.display(doc.to_markup(), doc),
            None => self.processed.display(source, parsed.document),
        }
        info!(file = %name, paths, merged, "loaded file");
        self.file_name = Some(name);

        Ok(LoadOutcome::Loaded {
            paths,
            merged,
            diagnostics: parsed.diagnostics,
        })
    }

    /// Load markup directly, skipping the file type check
    pub fn load_markup(
        &mut self,
        name: impl Into<String>,
        markup: &str,
    ) -> Result<LoadOutcome, LoadError> {
        let file = SelectedFile::new(name, markup.as_bytes()).with_media_type(SVG_MEDIA_TYPE);
        self.load(Some(file))
    }

    /// Return to the initial state: placeholders, zoom 1, no highlight, no colors
    pub fn reset(&mut self) {
        self.clear_session();
        self.file_name = None;
        debug!("workspace reset");
    }

    fn clear_session(&mut self) {
        self.highlight.reset();
        self.colorized = false;
        self.original.clear();
        self.processed.clear();
    }

    pub fn zoom_in(&mut self, kind: PaneKind) -> bool {
        self.pane_mut(kind).zoom_in()
    }

    pub fn zoom_out(&mut self, kind: PaneKind) -> bool {
        self.pane_mut(kind).zoom_out()
    }

    pub fn reset_zoom(&mut self, kind: PaneKind) {
        self.pane_mut(kind).reset_zoom();
    }

    /// Feed a pointer event on a rendered path into the shared highlight
    pub fn pointer(&mut self, event: PointerEvent) -> HighlightChange {
        let change = self.highlight.apply(event);
        if !change.is_empty() {
            debug!(added = ?change.added, removed = ?change.removed, "highlight changed");
        }
        change
    }

    pub fn pointer_enter(&mut self, id: PathIdentifier) -> HighlightChange {
        self.pointer(PointerEvent::Enter(id))
    }

    pub fn pointer_leave(&mut self, id: PathIdentifier) -> HighlightChange {
        self.pointer(PointerEvent::Leave(id))
    }

    pub fn pointer_click(&mut self, id: PathIdentifier) -> HighlightChange {
        self.pointer(PointerEvent::Click(id))
    }

    /// Every highlighted path element across both panes
    pub fn highlighted_elements(&self) -> Vec<(PaneKind, &PathIdentifier)> {
        [&self.original, &self.processed]
            .into_iter()
            .flat_map(|pane| {
                pane.highlighted(&self.highlight)
                    .into_iter()
                    .map(move |id| (pane.kind(), id))
            })
            .collect()
    }

    /// Toggle colorization of both panes, returning the new state
    pub fn toggle_colorize(&mut self) -> bool {
        self.colorized = !self.colorized;
        self.original.set_colorized(self.colorized, &mut self.colors);
        self.processed.set_colorized(self.colorized, &mut self.colors);
        debug!(on = self.colorized, "colorize toggled");
        self.colorized
    }

    /// Copy the processed pane's formatted code to `clipboard`
    pub fn copy_processed(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        let text = self.processed.code().map(|c| c.text()).unwrap_or_default();
        match clipboard.write_text(text) {
            Ok(()) => {
                self.status = Some(StatusMessage::new(StatusKind::Info, "Copied!"));
                Ok(())
            }
            Err(err) => {
                error!("failed to copy processed code: {}", err);
                Err(err)
            }
        }
    }

    /// Drop the status message once its time is up
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }
}
