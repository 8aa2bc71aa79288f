// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feed filesystem writes into the debouncer

use crate::error::EngineError;
use crate::filter::{FileFilter, Verdict};
use lull_adapters::{FsEventKind, WatchStream};
use lull_core::{Clock, DebounceHandle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Push back the deadline of every accepted file that is written to.
///
/// Runs until `cancel` fires. The stream ending first is an error: nothing
/// would be uploaded any more.
pub async fn watch_loop<C: Clock>(
    mut stream: WatchStream,
    filter: &FileFilter,
    debouncer: &DebounceHandle<C>,
    quiescence: Duration,
    cancel: &CancellationToken,
) -> Result<(), EngineError> {
    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            event = stream.recv() => event,
        };

        let event = match event {
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "watcher error");
                continue;
            }
            None => return Err(EngineError::WatchStreamClosed),
        };

        if event.kind != FsEventKind::Write {
            continue;
        }
        match filter.classify(&event.path) {
            Verdict::Accept => {
                let Some(key) = event.path.to_str() else {
                    tracing::debug!(path = %event.path.display(), "ignored, path is not UTF-8");
                    continue;
                };
                let Some(deadline) = debouncer.clock().now().checked_add(quiescence) else {
                    tracing::warn!(path = key, "ignored, quiescence window out of range");
                    continue;
                };
                tracing::debug!(path = key, "modified");
                debouncer.set(key, deadline);
            }
            Verdict::ArchiveArtifact => {}
            Verdict::NoMatch => {
                tracing::debug!(path = %event.path.display(), "ignored, no match");
            }
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
