/// Whether a column name can be written as a bare `datum.name` member access
/// in a generated expression.
pub fn is_bare_field(col: &str) -> bool {
    let mut chars = col.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a column name for use inside a single-quoted expression string
pub fn escape_field(col: &str) -> String {
    col.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Build a `datum` accessor for a column, falling back to bracket syntax when
/// the name is not a valid bare identifier. `depth` is the number of `datum`
/// hops (2 for marks whose data source is another mark, e.g. voronoi paths).
pub fn datum_accessor_depth(col: &str, depth: usize) -> String {
    let datum = vec!["datum"; depth.max(1)].join(".");
    if is_bare_field(col) {
        format!("{datum}.{col}")
    } else {
        format!("{datum}['{}']", escape_field(col))
    }
}

pub fn datum_accessor(col: &str) -> String {
    datum_accessor_depth(col, 1)
}

#[cfg(test)]
mod tests {
    use crate::escape::{datum_accessor, datum_accessor_depth, escape_field, is_bare_field};

    #[test]
    fn test_bare_field() {
        assert!(is_bare_field("value"));
        assert!(is_bare_field("_hidden$0"));
        assert!(!is_bare_field("0value"));
        assert!(!is_bare_field("unit price"));
        assert!(!is_bare_field(""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_field("it's"), "it\\'s");
        assert_eq!(escape_field("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_datum_accessor() {
        assert_eq!(datum_accessor("value"), "datum.value");
        assert_eq!(datum_accessor("unit price"), "datum['unit price']");
        assert_eq!(datum_accessor_depth("value", 2), "datum.datum.value");
    }
}
