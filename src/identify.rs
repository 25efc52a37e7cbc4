//! Path identifiers
//!
//! Every path shown in a pane needs an identifier so that the preview and the code
//! view can be highlighted together. A real `id` attribute is used when present.
//! Otherwise `path-<index>` is synthesized, where index counts the paths lacking an
//! `id` in document order, and stored in [`MARKER_ATTR`]. The `id` attribute is
//! never written.

use std::collections::HashSet;
use std::fmt;

use crate::document::{Element, SvgDocument};

/// Attribute carrying a real identifier
pub const ID_ATTR: &str = "id";

/// Attribute carrying a synthesized identifier
pub const MARKER_ATTR: &str = "data-path-id";

/// Prefix of synthesized identifiers
pub const SYNTHETIC_PREFIX: &str = "path-";

/// Identifier of one path element within one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathIdentifier(String);

impl PathIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the identifier of a path element: `id` first, then the marker
    pub fn resolve(element: &Element) -> Option<Self> {
        element
            .non_empty_attr(ID_ATTR)
            .or_else(|| element.non_empty_attr(MARKER_ATTR))
            .map(Self::new)
    }

    /// Whether `element` carries this identifier as `id` or marker
    pub fn matches(&self, element: &Element) -> bool {
        element.attr(ID_ATTR) == Some(self.as_str())
            || element.attr(MARKER_ATTR) == Some(self.as_str())
    }
}

impl fmt::Display for PathIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathIdentifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PathIdentifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Give every path of `doc` a resolvable identifier.
///
/// Returns the identifiers of all paths in document order. Tagging an already
/// tagged document changes nothing. A synthesized name that collides with a real
/// `id` or with a marker already in the document gets a `-<n>` suffix, and a
/// marker repeated on a later path is replaced by a fresh name.
pub fn tag_paths(doc: &mut SvgDocument) -> Vec<PathIdentifier> {
    let paths = doc.paths();
    let taken: HashSet<String> = paths
        .iter()
        .filter_map(|p| p.non_empty_attr(ID_ATTR))
        .map(str::to_string)
        .collect();
    let reserved: HashSet<String> = paths
        .iter()
        .filter(|p| p.non_empty_attr(ID_ATTR).is_none())
        .filter_map(|p| p.non_empty_attr(MARKER_ATTR))
        .map(str::to_string)
        .collect();

    let mut identifiers = Vec::new();
    let mut index = 0usize;
    let mut synthesized: HashSet<String> = HashSet::new();

    doc.root.for_each_path_mut(&mut |path| {
        if let Some(id) = path.non_empty_attr(ID_ATTR) {
            identifiers.push(PathIdentifier::new(id));
            return;
        }

        let existing = path
            .non_empty_attr(MARKER_ATTR)
            .filter(|m| !taken.contains(*m) && !synthesized.contains(*m))
            .map(str::to_string);
        let id = match existing {
            Some(existing) => existing,
            None => {
                let id = unique_name(index, |name| {
                    !taken.contains(name)
                        && !synthesized.contains(name)
                        && !reserved.contains(name)
                });
                path.set_attr(MARKER_ATTR, id.clone());
                id
            }
        };
        index += 1;
        synthesized.insert(id.clone());
        identifiers.push(PathIdentifier::new(id));
    });

    identifiers
}

fn unique_name(index: usize, is_free: impl Fn(&str) -> bool) -> String {
    let base = format!("{}{}", SYNTHETIC_PREFIX, index);
    if is_free(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if is_free(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Remove synthesized markers, e.g. before showing markup to the user
pub fn strip_markers(element: &mut Element) {
    element.for_each_path_mut(&mut |path| {
        path.remove_attr(MARKER_ATTR);
    });
}
