// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip-compressed tar archives

use super::{archive_path_for, ArchiveAdapter, ArchiveError};
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes `<path>.tar.gz` holding the file under its own name
#[derive(Clone, Debug, Default)]
pub struct TarGzArchiver;

impl TarGzArchiver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveAdapter for TarGzArchiver {
    async fn archive(&self, path: &Path) -> Result<PathBuf, ArchiveError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_archive(&path))
            .await
            .map_err(|e| ArchiveError::Join(e.to_string()))?
    }
}

fn write_archive(path: &Path) -> Result<PathBuf, ArchiveError> {
    let metadata = std::fs::symlink_metadata(path).map_err(|source| ArchiveError::Inaccessible {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.file_type().is_file() {
        return Err(ArchiveError::NotRegularFile(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .ok_or_else(|| ArchiveError::NotRegularFile(path.to_path_buf()))?;

    let target = archive_path_for(path);
    match pack(path, name, &target) {
        Ok(()) => Ok(target),
        Err(e) => {
            // Never leave a truncated archive behind
            let _ = std::fs::remove_file(&target);
            Err(e)
        }
    }
}

fn pack(source: &Path, name: &OsStr, target: &Path) -> Result<(), ArchiveError> {
    let write_err = |source| ArchiveError::Write {
        path: target.to_path_buf(),
        source,
    };

    let file = File::create(target).map_err(write_err)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::best()));
    builder
        .append_path_with_name(source, name)
        .map_err(write_err)?;
    let file = builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .map_err(write_err)?;
    file.sync_all().map_err(write_err)
}

#[cfg(test)]
#[path = "tar_gz_tests.rs"]
mod tests;
