//! Line scanning for section headers and key lines.

/// A `Section:` header and the key looked up beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionKey<'a> {
    pub section: &'a str,
    pub key: &'a str,
}

impl<'a> SectionKey<'a> {
    pub const fn new(section: &'a str, key: &'a str) -> Self {
        Self { section, key }
    }
}

/// Where clangd looks for the directory holding `compile_commands.json`.
pub const COMPILATION_DATABASE: SectionKey<'static> =
    SectionKey::new("CompileFlags", "CompilationDatabase");

/// Indentation for a key inserted into a section with no other children.
pub const DEFAULT_INDENT: &str = "    ";

/// One line of the document, split from its terminator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'t> {
    /// Byte offset of the first character.
    pub start: usize,
    pub text: &'t str,
    /// `"\n"`, `"\r\n"` or `""` for a final unterminated line.
    pub terminator: &'t str,
}

impl Line<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn next_start(&self) -> usize {
        self.end() + self.terminator.len()
    }
}

pub(crate) fn lines(text: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let (body, terminator) = if let Some(body) = raw.strip_suffix("\r\n") {
            (body, "\r\n")
        } else if let Some(body) = raw.strip_suffix('\n') {
            (body, "\n")
        } else {
            (raw, "")
        };
        out.push(Line {
            start: offset,
            text: body,
            terminator,
        });
        offset += raw.len();
    }
    out
}

/// The key line found under a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyMatch {
    /// Offset just past the `:` following the key name.
    pub after_colon: usize,
    /// Value span, excluding surrounding whitespace and any trailing comment.
    pub value_start: usize,
    pub value_end: usize,
    /// End of the line's text (before its terminator).
    pub line_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SectionMatch {
    pub header_index: usize,
    /// Leading whitespace of the section's first child line.
    pub child_indent: Option<String>,
    pub key: Option<KeyMatch>,
}

/// Find the section to edit.
///
/// The first section that already holds the key wins; otherwise the first
/// section with the right header.
pub(crate) fn find_section(lines: &[Line<'_>], target: SectionKey<'_>) -> Option<SectionMatch> {
    let mut first = None;
    for (index, line) in lines.iter().enumerate() {
        if !is_header(line.text, target.section) {
            continue;
        }
        let section = scan_section(lines, index, target.key);
        if section.key.is_some() {
            return Some(section);
        }
        first.get_or_insert(section);
    }
    first
}

fn scan_section(lines: &[Line<'_>], header_index: usize, key: &str) -> SectionMatch {
    let mut section = SectionMatch {
        header_index,
        child_indent: None,
        key: None,
    };

    for line in &lines[header_index + 1..] {
        if ends_section(line.text) {
            break;
        }
        let content = line.text.trim_start_matches([' ', '\t']);
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let indent = &line.text[..line.text.len() - content.len()];
        section.child_indent.get_or_insert_with(|| indent.to_string());

        if section.key.is_none() && content.strip_prefix(key).is_some_and(|r| r.starts_with(':')) {
            let after_colon = indent.len() + key.len() + 1;
            let (value_start, value_end) = value_span(line.text, after_colon);
            section.key = Some(KeyMatch {
                after_colon: line.start + after_colon,
                value_start: line.start + value_start,
                value_end: line.start + value_end,
                line_end: line.end(),
            });
        }
    }
    section
}

/// `Section:` at column zero, optionally followed by a comment.
fn is_header(text: &str, section: &str) -> bool {
    text.strip_prefix(section)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| {
            let rest = rest.trim_start();
            rest.is_empty() || rest.starts_with('#')
        })
}

/// Any unindented, non-comment line closes the current section.
fn ends_section(text: &str) -> bool {
    !text.is_empty() && !text.starts_with([' ', '\t']) && !text.starts_with('#')
}

/// Span of the value on `line` starting the search at byte `from`.
///
/// Leading whitespace is skipped. A quoted value ends at its closing quote;
/// an unquoted one ends before a ` #` comment. Trailing whitespace is
/// excluded either way.
fn value_span(line: &str, from: usize) -> (usize, usize) {
    let rest = &line[from..];
    let start = from + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
    let body = &line[start..];

    let len = match body.chars().next() {
        Some(quote @ ('"' | '\'')) => body[1..]
            .find(quote)
            .map_or(body.len(), |close| close + 2),
        _ => comment_start(body).unwrap_or(body.len()),
    };
    (start, start + body[..len].trim_end().len())
}

fn comment_start(body: &str) -> Option<usize> {
    if body.starts_with('#') {
        return Some(0);
    }
    [" #", "\t#"].iter().filter_map(|pat| body.find(pat)).min()
}
