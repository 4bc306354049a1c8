//! Markdown whitespace normalization.
//!
//! Block boundaries come from `pulldown-cmark` source offsets, so the
//! formatter never re-renders Markdown: it only rearranges the whitespace
//! around and inside blocks. Code and HTML blocks are copied verbatim.

use std::borrow::Cow;
use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::frontmatter::{DELIMITER, split_frontmatter};

/// Normalize a Markdown document.
///
/// - CRLF line endings become LF.
/// - A leading frontmatter block is kept and followed by one blank line.
/// - Top-level blocks are separated by exactly one blank line.
/// - Trailing whitespace is removed outside code and HTML blocks; hard
///   breaks are normalized to two trailing spaces.
/// - The result ends with a single newline (or is empty).
///
/// Formatting is idempotent.
pub fn format_markdown(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n");
    let (frontmatter, body) = split_frontmatter(&normalized);
    let body = format_body(body);

    let Some(yaml) = frontmatter else {
        return body;
    };

    let yaml = yaml.trim_end();
    let mut out = String::with_capacity(yaml.len() + body.len() + 10);
    out.push_str(DELIMITER);
    out.push('\n');
    if !yaml.is_empty() {
        out.push_str(yaml);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

fn format_body(body: &str) -> String {
    let layout = BlockLayout::scan(body);
    let chunks: Vec<String> = layout
        .blocks
        .iter()
        .map(|range| tidy_block(body, range.clone(), &layout.verbatim))
        .filter(|chunk| !chunk.is_empty())
        .collect();

    if chunks.is_empty() {
        return String::new();
    }
    let mut out = chunks.join("\n\n");
    out.push('\n');
    out
}

/// Whole-line byte ranges of top-level blocks and of verbatim regions.
struct BlockLayout {
    blocks: Vec<Range<usize>>,
    verbatim: Vec<Range<usize>>,
}

impl BlockLayout {
    fn scan(text: &str) -> Self {
        let mut raw_blocks = Vec::new();
        let mut verbatim = Vec::new();
        let mut depth = 0usize;

        for (event, range) in Parser::new_ext(text, parser_options()).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    if depth == 0 {
                        raw_blocks.push(range.clone());
                    }
                    if matches!(tag, Tag::CodeBlock(_) | Tag::HtmlBlock) {
                        verbatim.push(range);
                    }
                    depth += 1;
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                _ if depth == 0 => raw_blocks.push(range),
                _ => {}
            }
        }

        // Widen to whole lines and keep any text between blocks (link
        // reference definitions produce no events).
        let mut blocks = Vec::with_capacity(raw_blocks.len());
        let mut prev_end = 0;
        for range in raw_blocks {
            if range.is_empty() {
                continue;
            }
            let start = line_start(text, range.start).max(prev_end);
            let end = line_end(text, range.end).max(start);
            if start > prev_end && !text[prev_end..start].trim().is_empty() {
                blocks.push(prev_end..start);
            }
            if end > start {
                blocks.push(start..end);
                prev_end = end;
            }
        }
        if !text[prev_end..].trim().is_empty() {
            blocks.push(prev_end..text.len());
        }

        Self { blocks, verbatim }
    }
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, pos: usize) -> usize {
    if pos == 0 || text.as_bytes()[pos - 1] == b'\n' {
        return pos;
    }
    text[pos..].find('\n').map_or(text.len(), |i| pos + i + 1)
}

fn tidy_block(text: &str, range: Range<usize>, verbatim: &[Range<usize>]) -> String {
    let mut offset = range.start;
    let lines: Vec<(Range<usize>, &str)> = text[range]
        .split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start..offset, line.strip_suffix('\n').unwrap_or(line))
        })
        .collect();

    let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());
    for (i, (span, line)) in lines.iter().enumerate() {
        let line = *line;
        // Indented code ranges begin after the indentation.
        if verbatim.iter().any(|r| r.start < span.end && span.start < r.end) {
            out.push(Cow::Borrowed(line));
            continue;
        }

        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            if out.last().is_some_and(|last| !last.is_empty()) {
                out.push(Cow::Borrowed(""));
            }
            continue;
        }

        let padding = &line[trimmed.len()..];
        let continues = lines
            .get(i + 1)
            .is_some_and(|(_, next)| !next.trim().is_empty());
        if continues && padding.len() >= 2 && padding.bytes().all(|b| b == b' ') {
            out.push(Cow::Owned(format!("{trimmed}  ")));
        } else {
            out.push(Cow::Borrowed(trimmed));
        }
    }

    while out.last().is_some_and(|last| last.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}
