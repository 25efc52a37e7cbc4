//! Integration tests for path merging and identifier assignment

use pretty_assertions::assert_eq;
use svgmerge::identify::{tag_paths, MARKER_ATTR};
use svgmerge::{merge_document, merge_paths, parse};

fn merged_path_attrs(source: &str) -> Vec<(String, String)> {
    let doc = parse(source).expect("Should parse").document;
    let merged = merge_document(&doc).expect("Should merge");
    let paths = merged.paths();
    assert_eq!(paths.len(), 1, "merged document must have a single path");
    paths[0]
        .attributes
        .iter()
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect()
}

#[test]
fn test_single_path_document_is_unchanged() {
    let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <path fill="currentColor" d="M12 2L2 7l10 5 10-5-10-5z"/>
</svg>
"#;
    let outcome = merge_paths(source);
    assert_eq!(outcome.markup, source);
    assert!(!outcome.merged);
}

#[test]
fn test_moveto_segments_join_with_single_spaces() {
    let segments = ["M0 0 L1 1", "M2 2 L3 3", "M4 4 Z", "M5 5 h1 v1"];
    let source = format!(
        "<svg>{}</svg>",
        segments
            .iter()
            .map(|d| format!(r#"<path d="{}"/>"#, d))
            .collect::<String>()
    );
    let attrs = merged_path_attrs(&source);
    assert_eq!(attrs[0], ("d".to_string(), segments.join(" ")));
}

#[test]
fn test_segment_without_moveto_gets_one() {
    let attrs = merged_path_attrs(
        r#"<svg><path d="M0 0 L1 1"/><path d="L2 2"/><path d="M3 3"/></svg>"#,
    );
    assert_eq!(attrs[0].1, "M0 0 L1 1 M L2 2 M3 3");
}

#[test]
fn test_merged_attributes_come_from_first_path_only() {
    let attrs = merged_path_attrs(
        r##"<svg>
            <path class="a" d="M0 0" fill="#111" transform="translate(1 1)"/>
            <path class="b" d="M1 1" stroke="#222" opacity=".4"/>
        </svg>"##,
    );
    assert_eq!(
        attrs,
        vec![
            ("d".to_string(), "M0 0 M1 1".to_string()),
            ("class".to_string(), "a".to_string()),
            ("fill".to_string(), "#111".to_string()),
            ("transform".to_string(), "translate(1 1)".to_string()),
        ]
    );
}

#[test]
fn test_merged_path_is_last_child_of_root() {
    let outcome = merge_paths(
        r#"<svg><defs><linearGradient id="g"/></defs><path d="M0 0"/><g><path d="M1 1"/><rect/></g></svg>"#,
    );
    assert_eq!(
        outcome.markup,
        r#"<svg><defs><linearGradient id="g"/></defs><g><rect/></g><path d="M0 0 M1 1"/></svg>"#
    );
}

#[test]
fn test_malformed_markup_is_merged_best_effort() {
    let outcome = merge_paths(r#"<svg><g><path d="M0 0"/><path d="M1 1"/>"#);
    assert!(outcome.merged);
    assert_eq!(outcome.path_count, 2);
    assert!(!outcome.diagnostics.is_empty());
    assert!(outcome.markup.contains(r#"<path d="M0 0 M1 1"/>"#));
}

#[test]
fn test_example_document() {
    let outcome = merge_paths(r#"<svg><path d="M0 0 L1 1"/><path d="M2 2 L3 3"/></svg>"#);
    let doc = parse(&outcome.markup).expect("Should parse").document;
    let paths = doc.paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].attr("d"), Some("M0 0 L1 1 M2 2 L3 3"));
    assert_eq!(paths[0].attributes.len(), 1);
}

#[test]
fn test_synthesized_identifiers_follow_document_order() {
    let mut doc = parse(
        r#"<svg><path d="M0 0"/><g><path id="wing" d="M1 1"/><path d="M2 2"/></g><path d="M3 3"/></svg>"#,
    )
    .expect("Should parse")
    .document;
    let ids: Vec<String> = tag_paths(&mut doc).iter().map(|i| i.to_string()).collect();
    assert_eq!(ids, vec!["path-0", "wing", "path-1", "path-2"]);

    let markers: Vec<Option<&str>> = doc.paths().iter().map(|p| p.attr(MARKER_ATTR)).collect();
    assert_eq!(markers, vec![Some("path-0"), None, Some("path-1"), Some("path-2")]);
}
