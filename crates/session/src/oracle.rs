//! Read-only file access seam for `display_file`.
//!
//! The engine names files it wants shown (license text, help topics); where
//! their contents live is the embedder's concern, so the session only holds
//! this capability.

use std::collections::HashMap;

/// Resolves engine file names to their text contents.
pub trait FileOracle: Send + Sync {
    fn read_text(&self, name: &str) -> Option<String>;
}

/// Oracle with no files; every lookup misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFiles;

impl FileOracle for NullFiles {
    fn read_text(&self, _name: &str) -> Option<String> {
        None
    }
}

/// In-memory name → contents table, for embedders and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticFiles {
    files: HashMap<String, String>,
}

impl StaticFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(name.into(), contents.into());
        self
    }
}

impl FileOracle for StaticFiles {
    fn read_text(&self, name: &str) -> Option<String> {
        self.files.get(name).cloned()
    }
}
