//! YAML frontmatter splitting, parsing and serialization.
//!
//! A frontmatter block is a leading `---` line, YAML text, and a closing `---`
//! line. Everything after the closing line is the document body.

use serde_yaml::{Mapping, Value};

/// Frontmatter data in source key order.
pub type Frontmatter = Mapping;

/// Frontmatter block delimiter line.
pub(crate) const DELIMITER: &str = "---";

/// Errors from frontmatter parsing and serialization.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// Block is not valid YAML (or could not be encoded as YAML).
    #[error("Invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Block is valid YAML but not a key/value mapping.
    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Split text into its frontmatter block and body.
///
/// Returns `(None, content)` unless the first line is `---` and a later line
/// closes the block. The newline ending the closing delimiter is consumed, so
/// the body starts on the line after it.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = strip_opening_delimiter(content) else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let line_end = content.find('\n')?;
    (content[..line_end].trim_end() == DELIMITER).then(|| &content[line_end + 1..])
}

/// Decode a frontmatter block.
///
/// Empty blocks and blocks holding only comments decode to an empty mapping.
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Frontmatter::new()),
        Value::Sequence(_) => Err(FrontmatterError::NotAMapping("a sequence")),
        Value::Tagged(_) => Err(FrontmatterError::NotAMapping("a tagged value")),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(FrontmatterError::NotAMapping("a scalar"))
        }
    }
}

/// Encode frontmatter as YAML, trimmed of trailing whitespace.
pub fn serialize_frontmatter(frontmatter: &Frontmatter) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(yaml.trim_end().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_basic() {
        let (yaml, body) = split_frontmatter("---\npath: /\n---\n# Hello");
        assert_eq!(yaml, Some("path: /\n"));
        assert_eq!(body, "# Hello");
    }

    #[test]
    fn test_split_consumes_only_one_newline() {
        let (_, body) = split_frontmatter("---\ntitle: A\n---\n\n\nBody\n");
        assert_eq!(body, "\n\nBody\n");
    }

    #[test]
    fn test_split_crlf() {
        let (yaml, body) = split_frontmatter("---\r\ntitle: A\r\n---\r\nBody");
        assert_eq!(yaml, Some("title: A\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_without_frontmatter() {
        let (yaml, body) = split_frontmatter("# Just markdown\n");
        assert!(yaml.is_none());
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn test_split_unclosed_block_is_body() {
        let content = "---\ntitle: A\nno closing line\n";
        let (yaml, body) = split_frontmatter(content);
        assert!(yaml.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_thematic_break_later_in_body() {
        let content = "Intro\n\n---\n\nMore";
        let (yaml, body) = split_frontmatter(content);
        assert!(yaml.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nBody");
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_closing_delimiter_at_eof() {
        let (yaml, body) = split_frontmatter("---\npath: /a\n---");
        assert_eq!(yaml, Some("path: /a\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let fm = parse_frontmatter("title: Intro\npath: /intro/\nsidebar_position: 2\n").unwrap();
        let keys: Vec<_> = fm.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["title", "path", "sidebar_position"]);
    }

    #[test]
    fn test_parse_empty_and_comment_only() {
        assert!(parse_frontmatter("").unwrap().is_empty());
        assert!(parse_frontmatter("  \n").unwrap().is_empty());
        assert!(parse_frontmatter("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        let err = parse_frontmatter("- a\n- b\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping("a sequence")));

        let err = parse_frontmatter("just text").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping("a scalar")));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_frontmatter("title: [unclosed").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_serialize_root_slug() {
        let fm = parse_frontmatter("path: \"/\"").unwrap();
        assert_eq!(serialize_frontmatter(&fm).unwrap(), "path: /");
    }

    #[test]
    fn test_serialize_has_no_trailing_whitespace() {
        let fm = parse_frontmatter("title: Guide\ntags:\n  - a\n  - b\n").unwrap();
        let yaml = serialize_frontmatter(&fm).unwrap();
        assert_eq!(yaml, yaml.trim_end());
        assert!(yaml.starts_with("title: Guide\n"));
    }

    #[test]
    fn test_round_trip_scalars() {
        let mut fm = Frontmatter::new();
        fm.insert("path".into(), "/guide/intro/".into());
        fm.insert("title".into(), "Getting started: part 1".into());
        fm.insert("sidebar_position".into(), 3.into());
        fm.insert("draft".into(), false.into());
        fm.insert("ratio".into(), 0.5.into());
        fm.insert("looks_boolean".into(), "yes".into());
        fm.insert("looks_numeric".into(), "1.10".into());
        fm.insert("empty".into(), Value::Null);

        let yaml = serialize_frontmatter(&fm).unwrap();
        assert_eq!(parse_frontmatter(&yaml).unwrap(), fm);
    }

    #[test]
    fn test_round_trip_nested_values() {
        let source = "title: API\nauthors:\n  - name: Ana\n    team: docs\nlinks:\n  repo: https://example.com\n";
        let fm = parse_frontmatter(source).unwrap();
        let yaml = serialize_frontmatter(&fm).unwrap();
        assert_eq!(parse_frontmatter(&yaml).unwrap(), fm);
    }
}
