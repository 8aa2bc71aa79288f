// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use lull_adapters::{ArchiveError, UploadError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("filesystem event stream closed")]
    WatchStreamClosed,
}

/// Errors from delivering a single file. Logged by the scheduler, never fatal.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("cannot access {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),
    #[error("cannot reschedule {} {wait:?} ahead", path.display())]
    OutOfRange { path: PathBuf, wait: std::time::Duration },
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error("archive {} is {size} bytes, over the {limit} byte limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}
