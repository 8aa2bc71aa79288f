// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch a folder and upload files once they go quiet

use crate::config::{self, ConfigArgs};
use crate::logging;
use anyhow::{Context, Result};
use lull_adapters::{
    NotifyWatcher, TarGzArchiver, TracedArchiveAdapter, TracedUploadAdapter, WebhookUploader,
};
use lull_core::TokioClock;
use lull_engine::{Runtime, RuntimeDeps};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn handle(args: ConfigArgs) -> Result<()> {
    let settings = config::load(&args)?;
    let _log_guard = logging::setup(settings.log_file.as_deref())?;

    info!(
        watch_folder = %settings.watch_folder.display(),
        file_regex = %settings.file_regex,
        webhook_url = %settings.webhook_url,
        "starting lull"
    );

    let uploader =
        WebhookUploader::new(settings.http_timeout).context("failed to build HTTP client")?;
    let (watcher, stream) = NotifyWatcher::start(&settings.watch_folder)?;

    let runtime = Runtime::new(
        settings.runtime_config(),
        RuntimeDeps {
            archiver: TracedArchiveAdapter::new(TarGzArchiver::new()),
            uploader: TracedUploadAdapter::new(uploader),
        },
        TokioClock,
    );

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let cancel = CancellationToken::new();
    let run = runtime.run(stream, cancel.clone());
    tokio::pin!(run);

    let result = tokio::select! {
        result = &mut run => result,
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            cancel.cancel();
            run.await
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
            cancel.cancel();
            run.await
        }
    };

    drop(watcher);
    result?;
    info!("lull stopped");
    Ok(())
}
