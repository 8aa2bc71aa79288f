// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive and upload a file once it has gone quiet

use crate::error::DeliveryError;
use async_trait::async_trait;
use lull_adapters::{ArchiveAdapter, UploadAdapter};
use lull_core::{Clock, DebounceHandle, ExpireHandler};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

/// What the job does with a file
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub webhook_url: String,
    /// How long a file must go unmodified before it is uploaded
    pub quiescence: Duration,
    /// Largest archive that will be uploaded, `None` for no limit
    pub size_limit: Option<u64>,
}

/// Expiry handler that delivers each quiet file to the webhook.
///
/// A file modified more recently than the quiescence window is put back on
/// the scheduler for the remaining time instead of being uploaded.
pub struct UploadJob<A, U, C> {
    archiver: A,
    uploader: U,
    handle: DebounceHandle<C>,
    policy: UploadPolicy,
}

impl<A, U, C> UploadJob<A, U, C>
where
    A: ArchiveAdapter,
    U: UploadAdapter,
    C: Clock,
{
    pub fn new(archiver: A, uploader: U, handle: DebounceHandle<C>, policy: UploadPolicy) -> Self {
        Self {
            archiver,
            uploader,
            handle,
            policy,
        }
    }

    async fn deliver(&self, key: &str) -> Result<(), DeliveryError> {
        let path = Path::new(key);
        let inaccessible = |source| DeliveryError::Inaccessible {
            path: path.to_path_buf(),
            source,
        };

        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .map_err(inaccessible)?;
        if !metadata.file_type().is_file() {
            return Err(DeliveryError::NotRegularFile(path.to_path_buf()));
        }

        let age = file_age(metadata.modified().map_err(inaccessible)?, SystemTime::now());
        if age < self.policy.quiescence {
            let wait = self.policy.quiescence - age;
            let deadline = self.handle.clock().now().checked_add(wait).ok_or_else(|| {
                DeliveryError::OutOfRange {
                    path: path.to_path_buf(),
                    wait,
                }
            })?;
            self.handle.set(key, deadline);
            tracing::debug!(
                path = key,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "modified recently, rescheduled"
            );
            return Ok(());
        }

        let archive = self.archiver.archive(path).await?;
        let result = self.upload_archive(&archive).await;

        if let Err(e) = tokio::fs::remove_file(&archive).await {
            tracing::warn!(archive = %archive.display(), error = %e, "failed to remove archive");
        }
        result?;

        tracing::info!(path = key, "delivered");
        Ok(())
    }

    async fn upload_archive(&self, archive: &Path) -> Result<(), DeliveryError> {
        if let Some(limit) = self.policy.size_limit {
            let size = tokio::fs::metadata(archive)
                .await
                .map_err(|source| DeliveryError::Inaccessible {
                    path: archive.to_path_buf(),
                    source,
                })?
                .len();
            if size > limit {
                return Err(DeliveryError::TooLarge {
                    path: archive.to_path_buf(),
                    size,
                    limit,
                });
            }
        }

        self.uploader
            .upload(&self.policy.webhook_url, archive)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<A, U, C> ExpireHandler for UploadJob<A, U, C>
where
    A: ArchiveAdapter,
    U: UploadAdapter,
    C: Clock,
{
    type Error = DeliveryError;

    async fn on_expire(&self, key: String, _deadline: Instant) -> Result<(), DeliveryError> {
        self.deliver(&key).await
    }
}

/// Time since `modified`; a modification time in the future counts as now
fn file_age(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[path = "upload_job_tests.rs"]
mod tests;
