// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the lull daemon

use crate::error::EngineError;
use crate::filter::FileFilter;
use crate::upload_job::{UploadJob, UploadPolicy};
use crate::watch::watch_loop;
use lull_adapters::{ArchiveAdapter, UploadAdapter, WatchStream};
use lull_core::{Clock, Debouncer};
use tokio_util::sync::CancellationToken;

/// Runtime configuration, already validated
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub filter: FileFilter,
    pub policy: UploadPolicy,
}

/// Runtime adapter dependencies
pub struct RuntimeDeps<A, U> {
    pub archiver: A,
    pub uploader: U,
}

/// Wires the watch loop to a debouncer whose expiries upload files
pub struct Runtime<A, U, C> {
    config: RuntimeConfig,
    deps: RuntimeDeps<A, U>,
    clock: C,
}

impl<A, U, C> Runtime<A, U, C>
where
    A: ArchiveAdapter,
    U: UploadAdapter,
    C: Clock,
{
    pub fn new(config: RuntimeConfig, deps: RuntimeDeps<A, U>, clock: C) -> Self {
        Self {
            config,
            deps,
            clock,
        }
    }

    /// Watch until `cancel` fires or the stream ends.
    ///
    /// The debouncer is closed before returning either way; files still
    /// inside their quiescence window are not uploaded.
    pub async fn run(self, stream: WatchStream, cancel: CancellationToken) -> Result<(), EngineError> {
        let Self {
            config,
            deps,
            clock,
        } = self;
        let quiescence = config.policy.quiescence;

        let debouncer = Debouncer::start(clock, |handle| {
            UploadJob::new(deps.archiver, deps.uploader, handle, config.policy)
        });
        tracing::info!(
            pattern = config.filter.as_str(),
            quiescence_ms = u64::try_from(quiescence.as_millis()).unwrap_or(u64::MAX),
            "runtime started"
        );

        let result = watch_loop(stream, &config.filter, &debouncer.handle(), quiescence, &cancel).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "watch loop failed");
        }

        let pending = debouncer.pending();
        debouncer.close().await;
        tracing::info!(pending, "runtime stopped");
        result
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
