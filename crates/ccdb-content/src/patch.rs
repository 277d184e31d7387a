//! Setting a single key in a section.
//!
//! | existing text | key | section | result |
//! |---|---|---|---|
//! | absent | | | new document with the header and the key |
//! | present | yes | yes | only the value span is replaced |
//! | present | no | yes | key line inserted right after the header |
//! | present | no | no | header and key line appended at the end |

use crate::document::{self, DEFAULT_INDENT, SectionKey};
use crate::{Error, Result};

/// Which branch of the edit was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    /// There was no document; a new one was produced.
    Created,
    /// The key already held exactly this value.
    Unchanged,
    /// The key's value span was replaced.
    Replaced,
    /// A key line was inserted under the existing header.
    InsertedKey,
    /// The header was the last line of the document, so the key line was
    /// appended at the end.
    AppendedKey,
    /// Neither header nor key existed; both were appended.
    AppendedSection,
}

/// The result of [`set_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    pub action: PatchAction,
}

impl Patched {
    pub fn is_changed(&self) -> bool {
        self.action != PatchAction::Unchanged
    }
}

/// Set `target.key` under `target.section` to `value`.
///
/// `existing` is `None` when the file does not exist. Nothing outside the
/// edited span changes, and applying the same edit twice gives the same text
/// as applying it once.
///
/// # Errors
///
/// [`Error::InvalidValue`] if `value` is empty, spans lines, or has
/// surrounding whitespace, since it could not be read back unchanged.
pub fn set_value(existing: Option<&str>, target: SectionKey<'_>, value: &str) -> Result<Patched> {
    validate(target, value)?;
    let rendered = render(target, value)?;
    let value = rendered.as_str();

    let Some(text) = existing else {
        tracing::debug!(section = target.section, key = target.key, "Creating new document");
        return Ok(Patched {
            text: format!("{}:\n{}{}: {}", target.section, DEFAULT_INDENT, target.key, value),
            action: PatchAction::Created,
        });
    };

    let lines = document::lines(text);
    let Some(section) = document::find_section(&lines, target) else {
        tracing::debug!(section = target.section, "Section absent, appending");
        return Ok(append_section(text, target, value));
    };

    if let Some(found) = section.key {
        if &text[found.value_start..found.value_end] == value {
            return Ok(Patched {
                text: text.to_string(),
                action: PatchAction::Unchanged,
            });
        }
        let mut replacement = String::new();
        if found.value_start == found.after_colon {
            replacement.push(' ');
        }
        replacement.push_str(value);
        if found.value_start == found.value_end && found.value_end < found.line_end {
            // An empty value followed by a comment.
            replacement.push(' ');
        }
        tracing::debug!(key = target.key, "Replacing existing value");
        return Ok(Patched {
            text: splice(text, found.value_start, found.value_end, &replacement),
            action: PatchAction::Replaced,
        });
    }

    let header = lines[section.header_index];
    let indent = section.child_indent.as_deref().unwrap_or(DEFAULT_INDENT);
    let key_line = format!("{}{}: {}", indent, target.key, value);

    if section.header_index + 1 == lines.len() {
        tracing::warn!(
            section = target.section,
            "Section header has no following content, appending key at end"
        );
        let newline = if header.terminator.is_empty() {
            newline_style(text)
        } else {
            header.terminator
        };
        let mut patched = text.to_string();
        if header.terminator.is_empty() {
            patched.push_str(newline);
            patched.push_str(&key_line);
        } else {
            patched.push_str(&key_line);
            patched.push_str(newline);
        }
        return Ok(Patched {
            text: patched,
            action: PatchAction::AppendedKey,
        });
    }

    tracing::debug!(key = target.key, "Inserting key under existing header");
    let inserted = format!("{}{}", key_line, header.terminator);
    Ok(Patched {
        text: splice(text, header.next_start(), header.next_start(), &inserted),
        action: PatchAction::InsertedKey,
    })
}

fn append_section(text: &str, target: SectionKey<'_>, value: &str) -> Patched {
    let newline = newline_style(text);
    let mut patched = text.to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        patched.push_str(newline);
    }
    patched.push_str(target.section);
    patched.push(':');
    patched.push_str(newline);
    patched.push_str(DEFAULT_INDENT);
    patched.push_str(target.key);
    patched.push_str(": ");
    patched.push_str(value);
    if text.ends_with('\n') {
        patched.push_str(newline);
    }
    Patched {
        text: patched,
        action: PatchAction::AppendedSection,
    }
}

fn validate(target: SectionKey<'_>, value: &str) -> Result<()> {
    let single_line = !value.contains(['\n', '\r']);
    if value.is_empty() || !single_line || value.trim() != value {
        return Err(Error::InvalidValue {
            key: target.key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Quote `value` when it would otherwise read back differently.
///
/// Single quotes are preferred since they have no escapes in YAML.
fn render(target: SectionKey<'_>, value: &str) -> Result<String> {
    let needs_quotes = value.starts_with(['"', '\'', '#'])
        || value.contains(" #")
        || value.contains("\t#");
    if !needs_quotes {
        return Ok(value.to_string());
    }
    if !value.contains('\'') {
        Ok(format!("'{value}'"))
    } else if !value.contains(['"', '\\']) {
        Ok(format!("\"{value}\""))
    } else {
        Err(Error::InvalidValue {
            key: target.key.to_string(),
            value: value.to_string(),
        })
    }
}

fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}

fn newline_style(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}
