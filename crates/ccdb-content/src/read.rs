//! Reading a single key back out of a section.

use crate::document::{self, SectionKey};

/// The value stored at `target.key` under `target.section`.
///
/// Uses the same lookup as [`set_value`](crate::set_value). One pair of
/// matching surrounding quotes is removed. An empty value is `None`.
pub fn get_value(text: &str, target: SectionKey<'_>) -> Option<String> {
    let lines = document::lines(text);
    let found = document::find_section(&lines, target)?.key?;
    let raw = &text[found.value_start..found.value_end];
    let value = unquote(raw);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::COMPILATION_DATABASE;

    fn get(text: &str) -> Option<String> {
        get_value(text, COMPILATION_DATABASE)
    }

    #[test]
    fn test_reads_plain_value() {
        assert_eq!(
            get("CompileFlags:\n    CompilationDatabase: /proj/out/dev/\n").as_deref(),
            Some("/proj/out/dev/")
        );
    }

    #[test]
    fn test_strips_quotes_and_comments() {
        assert_eq!(
            get("CompileFlags:\n  CompilationDatabase: \"build dir\"  # generated\n").as_deref(),
            Some("build dir")
        );
        assert_eq!(
            get("CompileFlags:\n  CompilationDatabase: 'x'\r\n").as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_missing_key_or_section() {
        assert_eq!(get(""), None);
        assert_eq!(get("CompileFlags:\n  Add: [-Wall]\n"), None);
        assert_eq!(get("Index:\n  CompilationDatabase: /x\n"), None);
        assert_eq!(get("CompileFlags:\n  CompilationDatabase:\n"), None);
    }

    #[test]
    fn test_lone_quote_is_kept() {
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("'a\""), "'a\"");
    }
}
