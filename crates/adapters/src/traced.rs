// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::archive::{ArchiveAdapter, ArchiveError};
use crate::upload::{UploadAdapter, UploadError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// Wrapper that adds tracing to any ArchiveAdapter
#[derive(Clone)]
pub struct TracedArchiveAdapter<A> {
    inner: A,
}

impl<A> TracedArchiveAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: ArchiveAdapter> ArchiveAdapter for TracedArchiveAdapter<A> {
    async fn archive(&self, path: &Path) -> Result<PathBuf, ArchiveError> {
        let span = tracing::info_span!("archive", path = %path.display());

        async {
            tracing::debug!("compressing");

            let start = std::time::Instant::now();
            let result = self.inner.archive(path).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(archive) => tracing::info!(
                    archive = %archive.display(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "archive written"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "archive failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any UploadAdapter
#[derive(Clone)]
pub struct TracedUploadAdapter<U> {
    inner: U,
}

impl<U> TracedUploadAdapter<U> {
    pub fn new(inner: U) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<U: UploadAdapter> UploadAdapter for TracedUploadAdapter<U> {
    async fn upload(&self, url: &str, path: &Path) -> Result<(), UploadError> {
        let span = tracing::info_span!("upload", url, path = %path.display());

        async {
            tracing::info!("uploading");

            let start = std::time::Instant::now();
            let result = self.inner.upload(url, path).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "uploaded"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "upload failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
