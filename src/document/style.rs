//! Inline `style` attribute handling
//!
//! Only the flat `property: value; ...` form found in SVG `style` attributes is
//! supported. Later declarations of the same property win when reading.

/// Look up a property in a style declaration list
pub fn property<'a>(style: &'a str, name: &str) -> Option<&'a str> {
    declarations(style)
        .filter(|(prop, _)| prop.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .last()
}

/// Return a new declaration list with `name` set to `value`.
///
/// The first existing declaration is replaced in place and any duplicates are
/// dropped; otherwise the declaration is appended.
pub fn set_property(style: &str, name: &str, value: &str) -> String {
    let mut replaced = false;
    let mut out: Vec<String> = Vec::new();

    for (prop, existing) in declarations(style) {
        if prop.eq_ignore_ascii_case(name) {
            if !replaced {
                out.push(format!("{}: {};", name, value));
                replaced = true;
            }
        } else {
            out.push(format!("{}: {};", prop, existing));
        }
    }
    if !replaced {
        out.push(format!("{}: {};", name, value));
    }

    out.join(" ")
}

fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim();
        if prop.is_empty() {
            return None;
        }
        Some((prop, value.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_lookup() {
        assert_eq!(property("fill: red; stroke:blue", "stroke"), Some("blue"));
        assert_eq!(property("fill: red", "stroke"), None);
        assert_eq!(property("", "fill"), None);
    }

    #[test]
    fn test_later_declaration_wins() {
        assert_eq!(property("fill: red; fill: green", "fill"), Some("green"));
    }

    #[test]
    fn test_set_property_replaces_in_place() {
        assert_eq!(
            set_property("fill: red; opacity: 0.5", "fill", "#fff"),
            "fill: #fff; opacity: 0.5;"
        );
    }

    #[test]
    fn test_set_property_appends() {
        assert_eq!(set_property("", "fill", "red"), "fill: red;");
        assert_eq!(
            set_property("fill: red;", "stroke", "red"),
            "fill: red; stroke: red;"
        );
    }

    #[test]
    fn test_set_property_drops_duplicates() {
        assert_eq!(set_property("fill: a; fill: b", "fill", "c"), "fill: c;");
    }
}
