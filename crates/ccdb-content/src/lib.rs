//! Line-oriented editing of language-server configuration files.
//!
//! `.clangd` is YAML, but only one scalar key needs to change, so the
//! document is never parsed into a tree. Lines are scanned for a top-level
//! `Section:` header and an indented `Key: value` line beneath it; every
//! other byte of the file passes through untouched.
//!
//! # Limitations
//!
//! - Flow-style sections (`CompileFlags: {CompilationDatabase: x}`) are not
//!   recognized; a block-style section is appended instead.
//! - A key is matched by its literal name followed by `:` at the start of an
//!   indented line, not by YAML structure.

pub mod document;
pub mod error;
pub mod file;
pub mod patch;
pub mod read;

pub use document::{COMPILATION_DATABASE, DEFAULT_INDENT, SectionKey};
pub use error::{Error, Result};
pub use file::ClangdFile;
pub use patch::{PatchAction, Patched, set_value};
pub use read::get_value;
