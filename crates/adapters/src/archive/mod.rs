// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive adapters

mod tar_gz;

pub use tar_gz::TarGzArchiver;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ArchiveCall, FakeArchiveAdapter};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to a file's path to name its archive
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Where the archive for `path` is written
pub fn archive_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ARCHIVE_SUFFIX);
    PathBuf::from(name)
}

/// Errors from archive operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot access {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("archive task failed: {0}")]
    Join(String),
}

/// Adapter that packs a single file into an archive next to it
#[async_trait]
pub trait ArchiveAdapter: Clone + Send + Sync + 'static {
    /// Archive `path` and return the archive's location
    async fn archive(&self, path: &Path) -> Result<PathBuf, ArchiveError>;
}
