//! Routing slug to generator filename mapping.

/// Filename used for the root slug `/`.
pub const ROOT_FILENAME: &str = "overview.md";

/// Map a routing slug to the Markdown filename the generator expects.
///
/// - `/` -> `overview.md`
/// - `/guide/intro/` -> `/guide/intro.md`
/// - `/guide/intro` -> `/guide/intro.md`
///
/// Only one trailing slash is stripped. The result keeps any leading slash;
/// callers joining it under a directory strip that themselves.
pub fn slug_to_filename(slug: &str) -> String {
    if slug == "/" {
        return ROOT_FILENAME.to_owned();
    }
    let stem = slug.strip_suffix('/').unwrap_or(slug);
    format!("{stem}.md")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_slug() {
        assert_eq!(slug_to_filename("/"), "overview.md");
    }

    #[test]
    fn test_slug_without_trailing_slash() {
        for slug in ["/guide", "/guide/intro", "guide", "a/b/c", "/v1.2/notes"] {
            assert_eq!(slug_to_filename(slug), format!("{slug}.md"));
        }
    }

    #[test]
    fn test_slug_with_trailing_slash() {
        for slug in ["/guide/", "/guide/intro/", "guide/", "a/b/c/"] {
            let stem = &slug[..slug.len() - 1];
            assert_eq!(slug_to_filename(slug), format!("{stem}.md"));
        }
    }

    #[test]
    fn test_only_one_trailing_slash_stripped() {
        assert_eq!(slug_to_filename("/guide//"), "/guide/.md");
        assert_eq!(slug_to_filename("//"), "/.md");
    }

    #[test]
    fn test_trailing_slash_variants_agree() {
        assert_eq!(
            slug_to_filename("/guide/intro/"),
            slug_to_filename("/guide/intro")
        );
    }
}
