//! Markdown documents, frontmatter and formatting for verdoc.
//!
//! This crate holds the pure parts of the transform:
//!
//! - [`frontmatter`]: split a `---` block from the body, decode and re-encode it as YAML
//! - [`slug_to_filename`]: map a routing slug to the generator's filename
//! - [`format_markdown`]: normalize whitespace the same way on every run
//! - [`Document`]: a parsed source file and its rendered output form
//!
//! # Example
//!
//! ```
//! use verdoc_content::Document;
//!
//! let doc = Document::parse("v1/index.md", "---\npath: /\n---\n# Hello").unwrap();
//! assert_eq!(doc.relative_output_path().unwrap().to_str(), Some("overview.md"));
//! assert_eq!(doc.render().unwrap(), "---\npath: /\n---\n\n# Hello\n");
//! ```

mod document;
mod format;
pub mod frontmatter;
mod slug;

pub use document::{Document, DocumentError, SLUG_KEY};
pub use format::format_markdown;
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use slug::{ROOT_FILENAME, slug_to_filename};
