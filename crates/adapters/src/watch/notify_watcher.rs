// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watcher backed by the platform's native notification API

use super::{FsEvent, FsEventKind, WatchError, WatchStream};
use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;

/// Keeps the native watch alive; dropping it ends the [`WatchStream`]
pub struct NotifyWatcher {
    _watcher: RecommendedWatcher,
}

impl NotifyWatcher {
    /// Watch `dir` (not its subdirectories) for changes
    pub fn start(dir: &Path) -> Result<(Self, WatchStream), WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let events: Vec<Result<FsEvent, WatchError>> = match res {
                Ok(event) => {
                    let kind = classify(&event.kind);
                    event
                        .paths
                        .into_iter()
                        .map(|path| Ok(FsEvent { path, kind }))
                        .collect()
                }
                Err(e) => vec![Err(WatchError::Backend(e))],
            };
            for event in events {
                if tx.send(event).is_err() {
                    tracing::trace!("watch stream closed, dropping event");
                    return;
                }
            }
        })
        .map_err(|source| WatchError::Start {
            path: dir.to_path_buf(),
            source,
        })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Start {
                path: dir.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %dir.display(), "watching");

        Ok((Self { _watcher: watcher }, rx))
    }
}

fn classify(kind: &EventKind) -> FsEventKind {
    match kind {
        EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Any)
        | EventKind::Access(AccessKind::Close(AccessMode::Write)) => FsEventKind::Write,
        _ => FsEventKind::Other,
    }
}

#[cfg(test)]
#[path = "notify_watcher_tests.rs"]
mod tests;
