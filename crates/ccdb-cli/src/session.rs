//! Per-process configure state
//!
//! The extra flags used by the last successful configure are offered as the
//! default for the next one. The state starts empty when the process starts
//! and is dropped when it exits.

/// State carried between configure runs in one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureSession {
    last_extra_flags: Option<Vec<String>>,
}

impl ConfigureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags of the last successful configure, if there was one.
    pub fn last_extra_flags(&self) -> Option<&[String]> {
        self.last_extra_flags.as_deref()
    }

    /// Record the flags of a configure that succeeded.
    pub fn remember(&mut self, flags: &[String]) {
        self.last_extra_flags = Some(flags.to_vec());
    }
}
