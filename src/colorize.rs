//! Path colorization with undo
//!
//! Switching colorization on snapshots each path's fill and stroke the first time
//! the path is seen, then paints it with a fresh color. Switching off writes the
//! snapshots back. A snapshot is never replaced while it exists.

use std::collections::HashMap;

use tracing::debug;

use crate::document::Element;
use crate::identify::PathIdentifier;
use crate::palette::ColorGenerator;

/// Value recorded when a path has neither a style property nor an attribute
pub const NO_COLOR: &str = "none";

/// Original fill and stroke of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRecord {
    pub fill: String,
    pub stroke: String,
}

impl ColorRecord {
    /// Capture the effective fill and stroke of `path`
    pub fn capture(path: &Element) -> Self {
        Self {
            fill: effective_color(path, "fill"),
            stroke: effective_color(path, "stroke"),
        }
    }
}

/// Inline style first, then the presentation attribute, then `none`
pub fn effective_color(path: &Element, property: &str) -> String {
    path.style_property(property)
        .or_else(|| path.non_empty_attr(property))
        .unwrap_or(NO_COLOR)
        .to_string()
}

/// Snapshots of one pane, keyed by path identifier
#[derive(Debug, Clone, Default)]
pub struct ColorRecords {
    records: HashMap<PathIdentifier, ColorRecord>,
}

impl ColorRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PathIdentifier) -> Option<&ColorRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Snapshot unrecorded paths under `root` and paint every path.
    ///
    /// Returns the number of paths painted. Paths without an identifier are
    /// skipped since their snapshot could not be found again.
    pub fn colorize(&mut self, root: &mut Element, colors: &mut ColorGenerator) -> usize {
        let mut painted = 0;
        root.for_each_path_mut(&mut |path| {
            let Some(id) = PathIdentifier::resolve(path) else {
                return;
            };
            self.records
                .entry(id)
                .or_insert_with(|| ColorRecord::capture(path));

            let color = colors.next_color();
            path.set_style_property("fill", &color);
            path.set_style_property("stroke", &color);
            painted += 1;
        });
        debug!(painted, recorded = self.records.len(), "colorized paths");
        painted
    }

    /// Write recorded fill and stroke back to every path that has a snapshot
    pub fn restore(&self, root: &mut Element) -> usize {
        let mut restored = 0;
        root.for_each_path_mut(&mut |path| {
            let Some(record) = PathIdentifier::resolve(path).and_then(|id| self.records.get(&id))
            else {
                return;
            };
            path.set_style_property("fill", &record.fill);
            path.set_style_property("stroke", &record.stroke);
            restored += 1;
        });
        debug!(restored, "restored path colors");
        restored
    }
}
