//! Filesystem helpers for ccdb
//!
//! Provides upward marker search, normalized path handling, atomic
//! locked writes and format-aware config loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod locate;
pub mod path;

pub use constants::Marker;
pub use error::{Error, Result};
pub use io::{FileLock, RobustnessConfig};
pub use locate::{locate, locate_optional};
pub use path::{NormalizedPath, with_trailing_separator};
