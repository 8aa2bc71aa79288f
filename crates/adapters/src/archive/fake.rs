// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake archive adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{archive_path_for, ArchiveAdapter, ArchiveError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded archive request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCall {
    pub path: PathBuf,
}

#[derive(Default)]
struct FakeArchiveState {
    calls: Vec<ArchiveCall>,
    fail: bool,
}

/// Fake archive adapter for testing.
///
/// Copies the file to where the real archive would go so callers see a file
/// of a realistic size.
#[derive(Clone, Default)]
pub struct FakeArchiveAdapter {
    inner: Arc<Mutex<FakeArchiveState>>,
}

impl FakeArchiveAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail
    pub fn fail(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ArchiveCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl ArchiveAdapter for FakeArchiveAdapter {
    async fn archive(&self, path: &Path) -> Result<PathBuf, ArchiveError> {
        let fail = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.calls.push(ArchiveCall {
                path: path.to_path_buf(),
            });
            inner.fail
        };
        let target = archive_path_for(path);
        if fail {
            return Err(ArchiveError::Write {
                path: target,
                source: std::io::Error::other("fake archive failure"),
            });
        }

        std::fs::copy(path, &target).map_err(|source| ArchiveError::Inaccessible {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(target)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
