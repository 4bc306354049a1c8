//! Source documents and their generator-ready output form.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::format::format_markdown;
use crate::frontmatter::{
    DELIMITER, Frontmatter, FrontmatterError, parse_frontmatter, serialize_frontmatter,
    split_frontmatter,
};
use crate::slug::slug_to_filename;

/// Frontmatter key holding the routing slug.
pub const SLUG_KEY: &str = "path";

/// Document error, always tagged with the source file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid frontmatter in {}: {source}", .path.display())]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },

    #[error("Missing `path` in frontmatter of {}", .path.display())]
    MissingSlug { path: PathBuf },

    #[error("`path` in {} must be a string", .path.display())]
    NonStringSlug { path: PathBuf },

    #[error("Invalid `path` {slug:?} in {}: {reason}", .path.display())]
    InvalidSlug {
        path: PathBuf,
        slug: String,
        reason: &'static str,
    },
}

/// A Markdown source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File the document was read from.
    pub source: PathBuf,
    /// Decoded frontmatter.
    pub frontmatter: Frontmatter,
    /// Markdown body following the frontmatter block.
    pub body: String,
}

impl Document {
    /// Parse document text.
    pub fn parse(source: impl Into<PathBuf>, content: &str) -> Result<Self, DocumentError> {
        let source = source.into();
        let (yaml, body) = split_frontmatter(content);
        let frontmatter = match yaml {
            Some(yaml) => parse_frontmatter(yaml).map_err(|source_err| {
                DocumentError::Frontmatter {
                    path: source.clone(),
                    source: source_err,
                }
            })?,
            None => Frontmatter::new(),
        };
        Ok(Self {
            source,
            frontmatter,
            body: body.to_owned(),
        })
    }

    /// Read and parse a document from disk.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// The routing slug from the `path` frontmatter key.
    pub fn slug(&self) -> Result<&str, DocumentError> {
        match self.frontmatter.get(SLUG_KEY) {
            None | Some(Value::Null) => Err(DocumentError::MissingSlug {
                path: self.source.clone(),
            }),
            Some(Value::String(slug)) => Ok(slug.as_str()),
            Some(_) => Err(DocumentError::NonStringSlug {
                path: self.source.clone(),
            }),
        }
    }

    /// Output path relative to the generator's docs directory.
    ///
    /// `/` maps to `overview.md`; `/guide/intro/` maps to `guide/intro.md`.
    /// Slugs with empty, `.` or `..` segments are rejected so the result always
    /// stays inside the docs directory.
    pub fn relative_output_path(&self) -> Result<PathBuf, DocumentError> {
        let slug = self.slug()?;
        let invalid = |reason| DocumentError::InvalidSlug {
            path: self.source.clone(),
            slug: slug.to_owned(),
            reason,
        };

        if slug.is_empty() {
            return Err(invalid("slug is empty"));
        }
        if slug != "/" {
            let stem = slug.strip_suffix('/').unwrap_or(slug);
            let stem = stem.trim_start_matches('/');
            if stem.is_empty() || stem.split('/').any(str::is_empty) {
                return Err(invalid("slug has an empty segment"));
            }
            if stem.split('/').any(|seg| seg == "." || seg == "..") {
                return Err(invalid("slug must not contain `.` or `..` segments"));
            }
        }

        let filename = slug_to_filename(slug);
        Ok(PathBuf::from(filename.trim_start_matches('/')))
    }

    /// Output path under the given docs directory.
    pub fn output_path(&self, docs_dir: &Path) -> Result<PathBuf, DocumentError> {
        Ok(docs_dir.join(self.relative_output_path()?))
    }

    /// Render the generator-ready document text.
    ///
    /// The frontmatter is re-serialized as YAML, joined with the body as
    /// `---\n<yaml>\n---\n\n<body>`, and formatted.
    pub fn render(&self) -> Result<String, DocumentError> {
        let yaml =
            serialize_frontmatter(&self.frontmatter).map_err(|e| DocumentError::Frontmatter {
                path: self.source.clone(),
                source: e,
            })?;
        let assembled = [DELIMITER, yaml.as_str(), DELIMITER, "", self.body.as_str()].join("\n");
        Ok(format_markdown(&assembled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(content: &str) -> Document {
        Document::parse("v1/topic.md", content).unwrap()
    }

    #[test]
    fn test_parse_splits_frontmatter_and_body() {
        let d = doc("---\npath: /\ntitle: Home\n---\n# Hello\n");
        assert_eq!(d.slug().unwrap(), "/");
        assert_eq!(d.frontmatter.len(), 2);
        assert_eq!(d.body, "# Hello\n");
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let d = doc("# Untitled\n");
        assert!(d.frontmatter.is_empty());
        assert_eq!(d.body, "# Untitled\n");
    }

    #[test]
    fn test_parse_invalid_frontmatter_names_file() {
        let err = Document::parse("v1/bad.md", "---\npath: [\n---\nBody").unwrap_err();
        assert!(matches!(err, DocumentError::Frontmatter { .. }));
        assert!(err.to_string().contains("v1/bad.md"));
    }

    #[test]
    fn test_root_slug_output_path() {
        let d = doc("---\npath: /\n---\n# Hello");
        assert_eq!(d.relative_output_path().unwrap(), PathBuf::from("overview.md"));
    }

    #[test]
    fn test_nested_slug_output_path() {
        let d = doc("---\npath: /guide/intro/\n---\nBody");
        assert_eq!(
            d.output_path(Path::new("website/docs")).unwrap(),
            PathBuf::from("website/docs/guide/intro.md")
        );
    }

    #[test]
    fn test_relative_slug_output_path() {
        let d = doc("---\npath: reference/cli\n---\nBody");
        assert_eq!(
            d.relative_output_path().unwrap(),
            PathBuf::from("reference/cli.md")
        );
    }

    #[test]
    fn test_missing_slug_is_error() {
        let err = doc("---\ntitle: No path\n---\nBody").slug().unwrap_err();
        assert!(matches!(err, DocumentError::MissingSlug { .. }));

        let err = doc("Body only").relative_output_path().unwrap_err();
        assert!(matches!(err, DocumentError::MissingSlug { .. }));
    }

    #[test]
    fn test_non_string_slug_is_error() {
        let err = doc("---\npath: 42\n---\nBody").slug().unwrap_err();
        assert!(matches!(err, DocumentError::NonStringSlug { .. }));
    }

    #[test]
    fn test_invalid_slugs_rejected() {
        for slug in ["\"\"", "//", "/guide//", "/a//b", "/../escape", "/guide/./x"] {
            let d = doc(&format!("---\npath: {slug}\n---\nBody"));
            let err = d.relative_output_path().unwrap_err();
            assert!(
                matches!(err, DocumentError::InvalidSlug { .. }),
                "expected InvalidSlug for {slug}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_render_root_document() {
        let d = doc("---\npath: \"/\"\n---\n# Hello");
        assert_eq!(d.render().unwrap(), "---\npath: /\n---\n\n# Hello\n");
    }

    #[test]
    fn test_render_keeps_frontmatter_order() {
        let d = doc("---\ntitle: Intro\npath: /guide/intro/\nsidebar_position: 2\n---\n\nText\n");
        assert_eq!(
            d.render().unwrap(),
            "---\ntitle: Intro\npath: /guide/intro/\nsidebar_position: 2\n---\n\nText\n"
        );
    }

    #[test]
    fn test_render_is_stable_across_runs() {
        let d = doc("---\npath: /a/\ntags: [x, y]\n---\n# A\nSome   \ntext\n\n\n\n- item\n");
        let first = d.render().unwrap();
        let reparsed = Document::parse("v1/topic.md", &first).unwrap();
        assert_eq!(reparsed.frontmatter, d.frontmatter);
        assert_eq!(reparsed.render().unwrap(), first);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::read(&dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.md");
        std::fs::write(&path, "---\npath: /\n---\n# Hello\n").unwrap();

        let d = Document::read(&path).unwrap();
        assert_eq!(d.source, path);
        assert_eq!(d.slug().unwrap(), "/");
    }
}
