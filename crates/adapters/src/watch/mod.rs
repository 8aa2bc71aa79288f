// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem change notifications

mod notify_watcher;

pub use notify_watcher::NotifyWatcher;

use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

/// What happened to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    /// File contents changed or a writer closed the file
    Write,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub path: PathBuf,
    pub kind: FsEventKind,
}

/// Errors from the filesystem watcher
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("cannot watch {}: {source}", path.display())]
    Start {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    #[error("watch backend error: {0}")]
    Backend(#[from] notify::Error),
}

/// Events in arrival order; ends when the watcher is dropped
pub type WatchStream = mpsc::UnboundedReceiver<Result<FsEvent, WatchError>>;
