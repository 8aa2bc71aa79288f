// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which paths get uploaded

use lull_adapters::ARCHIVE_SUFFIX;
use regex::Regex;
use std::path::Path;

/// Outcome of [`FileFilter::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// One of our own archives
    ArchiveArtifact,
    NoMatch,
}

/// Matches full paths against a regular expression
#[derive(Debug, Clone)]
pub struct FileFilter {
    pattern: Regex,
}

impl FileFilter {
    /// Compile `pattern`; an empty pattern matches every path
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = if pattern.is_empty() { ".*" } else { pattern };
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn classify(&self, path: &Path) -> Verdict {
        let path = path.to_string_lossy();
        if path.ends_with(ARCHIVE_SUFFIX) {
            Verdict::ArchiveArtifact
        } else if self.pattern.is_match(&path) {
            Verdict::Accept
        } else {
            Verdict::NoMatch
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
