// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake upload adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{UploadAdapter, UploadError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub url: String,
    pub path: PathBuf,
    /// Size of the file when it was uploaded
    pub size: u64,
}

#[derive(Default)]
struct FakeUploadState {
    calls: Vec<UploadCall>,
    fail_status: Option<u16>,
}

/// Fake upload adapter for testing
#[derive(Clone, Default)]
pub struct FakeUploadAdapter {
    inner: Arc<Mutex<FakeUploadState>>,
}

impl FakeUploadAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every following upload with `status`
    pub fn fail_with(&self, status: u16) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_status = Some(status);
    }

    /// Get all recorded uploads
    pub fn calls(&self) -> Vec<UploadCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl UploadAdapter for FakeUploadAdapter {
    async fn upload(&self, url: &str, path: &Path) -> Result<(), UploadError> {
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(UploadCall {
            url: url.to_string(),
            path: path.to_path_buf(),
            size,
        });
        match inner.fail_status {
            Some(status) => Err(UploadError::Status {
                status,
                body: "fake upload failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
