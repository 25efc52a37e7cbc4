//! Path merging
//!
//! Combines every `<path>` of a document into a single path whose `d` holds all
//! subpaths. Each appended subpath is forced to start with an absolute moveto so
//! it does not connect to the end of the previous one.

use tracing::debug;

use crate::document::{self, Element, Node, SvgDocument};
use crate::error::Diagnostic;

/// Result of merging the paths of a markup string
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Merged markup, or the input unchanged when nothing was merged
    pub markup: String,
    /// Number of path elements found in the input
    pub path_count: usize,
    /// Whether the output differs from the input
    pub merged: bool,
    /// Problems the parser recovered from
    pub diagnostics: Vec<Diagnostic>,
}

/// Merge all paths in `source` into one.
///
/// Documents with zero or one path, and sources without any element, come back
/// unchanged.
pub fn merge_paths(source: &str) -> MergeOutcome {
    let parsed = match document::parse(source) {
        Ok(parsed) => parsed,
        Err(err) => {
            return MergeOutcome {
                markup: source.to_string(),
                path_count: 0,
                merged: false,
                diagnostics: err.diagnostics().to_vec(),
            }
        }
    };

    let path_count = parsed.document.path_count();
    let (markup, merged) = match merge_document(&parsed.document) {
        Some(merged) => (merged.to_markup(), true),
        None => (source.to_string(), false),
    };

    MergeOutcome {
        markup,
        path_count,
        merged,
        diagnostics: parsed.diagnostics,
    }
}

/// Merge the paths of a parsed document.
///
/// Returns `None` when the document has at most one path. Otherwise the result is
/// a copy of the document with every path removed and one merged path appended as
/// the last child of the root. The merged path keeps every attribute of the
/// first path except `d`.
pub fn merge_document(doc: &SvgDocument) -> Option<SvgDocument> {
    let paths = doc.paths();
    if paths.len() <= 1 {
        return None;
    }

    let first = paths[0];
    let merged_path = merged_element(first, merged_path_data(&paths));

    let mut root = doc.root.clone();
    let removed = root.remove_paths();
    root.children.push(Node::Element(merged_path));

    debug!(paths = paths.len(), removed, "merged paths");
    Some(SvgDocument::new(root))
}

/// Concatenate the `d` attributes of `paths`.
///
/// The first path's data is taken as is. Every later non-empty `d` is appended
/// after a space, preceded by ` M` when it does not already start with `M`.
pub fn merged_path_data(paths: &[&Element]) -> String {
    let Some((first, rest)) = paths.split_first() else {
        return String::new();
    };

    let mut data = first.attr("d").unwrap_or_default().to_string();
    for path in rest {
        let Some(d) = path.non_empty_attr("d") else {
            continue;
        };
        if !d.trim_start().starts_with('M') {
            data.push_str(" M");
        }
        data.push(' ');
        data.push_str(d);
    }
    data
}

fn merged_element(first: &Element, data: String) -> Element {
    let mut merged = Element::new(first.name.clone()).with_attr("d", data);
    for attr in first.attributes.iter().filter(|a| a.name != "d") {
        merged.set_attr(attr.name.clone(), attr.value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merged_d(source: &str) -> String {
        let doc = document::parse(source).expect("Should parse").document;
        let merged = merge_document(&doc).expect("Should merge");
        let paths = merged.paths();
        assert_eq!(paths.len(), 1);
        paths[0].attr("d").unwrap_or_default().to_string()
    }

    #[test]
    fn test_two_paths_join_with_space() {
        assert_eq!(
            merged_d(r#"<svg><path d="M0 0 L1 1"/><path d="M2 2 L3 3"/></svg>"#),
            "M0 0 L1 1 M2 2 L3 3"
        );
    }

    #[test]
    fn test_missing_moveto_is_inserted() {
        assert_eq!(
            merged_d(r#"<svg><path d="M0 0 L1 1"/><path d="L5 5"/></svg>"#),
            "M0 0 L1 1 M L5 5"
        );
    }

    #[test]
    fn test_lowercase_moveto_still_gets_absolute_moveto() {
        assert_eq!(
            merged_d(r#"<svg><path d="M0 0"/><path d="m2 2 l1 1"/></svg>"#),
            "M0 0 M m2 2 l1 1"
        );
    }

    #[test]
    fn test_leading_whitespace_before_moveto() {
        assert_eq!(
            merged_d(r#"<svg><path d="M0 0"/><path d="  M2 2"/></svg>"#),
            "M0 0   M2 2"
        );
    }

    #[test]
    fn test_empty_and_missing_d_contribute_nothing() {
        assert_eq!(
            merged_d(r#"<svg><path d="M0 0"/><path d=""/><path/><path d="M1 1"/></svg>"#),
            "M0 0 M1 1"
        );
    }

    #[test]
    fn test_first_path_without_d() {
        assert_eq!(
            merged_d(r#"<svg><path fill="red"/><path d="M1 1"/></svg>"#),
            " M1 1"
        );
    }

    #[test]
    fn test_first_path_attributes_win() {
        let doc = document::parse(
            r#"<svg><path id="a" d="M0 0" fill="red" stroke="blue"/><path id="b" d="M1 1" fill="green" opacity="0.5"/></svg>"#,
        )
        .expect("Should parse")
        .document;
        let merged = merge_document(&doc).expect("Should merge");
        let path = merged.paths()[0];
        let attrs: Vec<_> = path
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                ("d", "M0 0 M1 1"),
                ("id", "a"),
                ("fill", "red"),
                ("stroke", "blue"),
            ]
        );
    }

    #[test]
    fn test_nested_paths_removed_and_merged_appended_last() {
        let doc = document::parse(
            r#"<svg><g><path d="M0 0"/></g><path d="M1 1"/><circle r="1"/></svg>"#,
        )
        .expect("Should parse")
        .document;
        let merged = merge_document(&doc).expect("Should merge");
        assert_eq!(
            merged.to_markup(),
            r#"<svg><g/><circle r="1"/><path d="M0 0 M1 1"/></svg>"#
        );
    }

    #[test]
    fn test_single_path_is_identity() {
        let source = "<svg>\n  <path d=\"M0 0 L1 1\"/>\n</svg>\n";
        let outcome = merge_paths(source);
        assert_eq!(outcome.markup, source);
        assert_eq!(outcome.path_count, 1);
        assert!(!outcome.merged);
    }

    #[test]
    fn test_no_paths_is_identity() {
        let source = r#"<svg><rect width="1" height="1"/></svg>"#;
        assert_eq!(merge_paths(source).markup, source);
    }

    #[test]
    fn test_unparseable_source_is_identity() {
        let outcome = merge_paths("not markup");
        assert_eq!(outcome.markup, "not markup");
        assert!(!outcome.merged);
    }

    #[test]
    fn test_prefixed_paths_keep_prefix() {
        let outcome = merge_paths(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:path d="M0 0"/><svg:path d="M1 1"/></svg:svg>"#,
        );
        assert!(outcome.merged);
        assert!(outcome.markup.contains(r#"<svg:path d="M0 0 M1 1"/>"#));
    }

    #[test]
    fn test_example_from_two_paths() {
        let outcome = merge_paths(r#"<svg><path d="M0 0 L1 1"/><path d="M2 2 L3 3"/></svg>"#);
        assert_eq!(outcome.markup, r#"<svg><path d="M0 0 L1 1 M2 2 L3 3"/></svg>"#);
        assert_eq!(outcome.path_count, 2);
        assert!(outcome.merged);
    }
}
