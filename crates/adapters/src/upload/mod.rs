// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload adapters

mod webhook;

pub use webhook::WebhookUploader;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeUploadAdapter, UploadCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from upload operations
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Adapter that delivers a file to a remote endpoint
#[async_trait]
pub trait UploadAdapter: Clone + Send + Sync + 'static {
    /// Send the file at `path` to `url`
    async fn upload(&self, url: &str, path: &Path) -> Result<(), UploadError>;
}
