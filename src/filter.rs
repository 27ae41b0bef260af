//! Problem directory filtering.
//!
//! Lets a run skip problem directories by glob pattern (drafts, templates,
//! work in progress) without touching the write-ups themselves.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Glob-based filter over problem directory names.
#[derive(Debug, Clone)]
pub(crate) struct DirFilter {
    exclude: GlobSet,
}

impl DirFilter {
    /// Creates a new filter from exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a pattern is not a valid glob.
    pub(crate) fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            exclude: build_globset(patterns)?,
        })
    }

    /// Returns true if the directory with this name should be indexed.
    pub(crate) fn should_index(&self, name: &str) -> bool {
        !self.exclude.is_match(name)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::config(format!("Invalid glob pattern '{}': {}", pattern, e)))?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| Error::config(format!("Failed to build glob set: {}", e)))
}
