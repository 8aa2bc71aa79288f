// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multipart webhook uploader

use super::{UploadAdapter, UploadError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

/// Longest response body kept in a status error
const MAX_ERROR_BODY: usize = 512;

/// Posts files as `multipart/form-data`, one part per request
#[derive(Clone)]
pub struct WebhookUploader {
    client: reqwest::Client,
}

impl WebhookUploader {
    /// Build an uploader whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UploadAdapter for WebhookUploader {
    async fn upload(&self, url: &str, path: &Path) -> Result<(), UploadError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // The field is named after the file, like the filename itself
        let part = Part::bytes(data).file_name(name.clone());
        let form = Form::new().part(name, part);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(UploadError::Status {
            status: status.as_u16(),
            body: truncate(body, MAX_ERROR_BODY),
        })
    }
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
