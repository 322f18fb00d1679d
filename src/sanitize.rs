//! Node name sanitization
//!
//! Output filenames are derived from node display names, which are free-form
//! UI strings. [`sanitize_name`] maps any of them onto a non-empty identifier
//! safe to use as a single filesystem path component.

/// Fallback returned when the input is absent or nothing survives cleaning.
const FALLBACK: &str = "unknown";

/// Characters reserved in filesystem paths on at least one supported platform.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Sanitize a display name into a filesystem-safe identifier.
///
/// Cleanup runs in a fixed order: reserved and control characters are
/// stripped, whitespace runs become a single `_`, repeated `_` collapse, and
/// leading/trailing `_` are trimmed. Absent input and inputs that clean down
/// to nothing both yield `"unknown"`, so the result is always a usable file
/// stem. Applying the function to its own output returns it unchanged.
pub fn sanitize_name(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) => s,
        None => return FALLBACK.to_string(),
    };

    let mut result = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for c in raw.chars() {
        if c.is_control() || RESERVED.contains(&c) {
            continue;
        }
        if c.is_whitespace() || c == '_' {
            pending_sep = true;
            continue;
        }
        // Dropping the separator while `result` is empty trims leading runs.
        if pending_sep && !result.is_empty() {
            result.push('_');
        }
        pending_sep = false;
        result.push(c);
    }

    if result.is_empty() {
        FALLBACK.to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input_falls_back() {
        assert_eq!(sanitize_name(None), "unknown");
        assert_eq!(sanitize_name(Some("")), "unknown");
    }

    #[test]
    fn test_reserved_characters_stripped() {
        assert_eq!(sanitize_name(Some("HTTP Request")), "HTTP_Request");
        assert_eq!(sanitize_name(Some("Read/Write Binary")), "ReadWrite_Binary");
        assert_eq!(sanitize_name(Some("What? A: \"Node\"")), "What_A_Node");
    }

    #[test]
    fn test_whitespace_and_separator_collapse() {
        assert_eq!(sanitize_name(Some("My   Node")), "My_Node");
        assert_eq!(sanitize_name(Some("a _ b___c")), "a_b_c");
        assert_eq!(sanitize_name(Some("  padded  ")), "padded");
    }

    #[test]
    fn test_nothing_survives_cleaning() {
        assert_eq!(sanitize_name(Some("///")), "unknown");
        assert_eq!(sanitize_name(Some("   ")), "unknown");
        assert_eq!(sanitize_name(Some("\u{0}\u{1f}")), "unknown");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["HTTP Request", "a _ b", "Émile's Node", "v2.1 beta"] {
            let once = sanitize_name(Some(raw));
            let twice = sanitize_name(Some(&once));
            assert_eq!(once, twice, "sanitizing {raw:?} twice changed the result");
        }
    }
}
