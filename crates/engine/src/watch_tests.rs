// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use lull_adapters::{FsEvent, WatchError};
use lull_core::{Debouncer, ExpireHandler, TokioClock};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

const QUIESCENCE: Duration = Duration::from_millis(100);

struct Recorder {
    tx: mpsc::UnboundedSender<(String, Instant)>,
}

#[async_trait]
impl ExpireHandler for Recorder {
    type Error = String;

    async fn on_expire(&self, key: String, _deadline: Instant) -> Result<(), String> {
        let _ = self.tx.send((key, TokioClock.now()));
        Ok(())
    }
}

fn recording() -> (
    Debouncer<TokioClock>,
    mpsc::UnboundedReceiver<(String, Instant)>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Debouncer::start(TokioClock, |_| Recorder { tx }), rx)
}

fn event(path: &str, kind: FsEventKind) -> Result<FsEvent, WatchError> {
    Ok(FsEvent {
        path: PathBuf::from(path),
        kind,
    })
}

fn filter() -> FileFilter {
    FileFilter::new(r".*\.demo$").unwrap()
}

#[tokio::test(start_paused = true)]
async fn accepted_writes_are_scheduled_after_the_quiescence_window() {
    let (debouncer, mut expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();
    let start = TokioClock.now();

    tx.send(event("/w/a.demo", FsEventKind::Write)).unwrap();
    drop(tx);

    let result = watch_loop(
        rx,
        &filter(),
        &debouncer.handle(),
        QUIESCENCE,
        &CancellationToken::new(),
    )
    .await;
    assert!(matches!(result, Err(EngineError::WatchStreamClosed)));
    assert_eq!(debouncer.next_wake(), Some(start + QUIESCENCE));

    let (key, at) = expired.recv().await.unwrap();
    assert_eq!(key, "/w/a.demo");
    assert!(at >= start + QUIESCENCE);

    debouncer.close().await;
}

#[tokio::test(start_paused = true)]
async fn unmatched_archives_and_non_writes_are_ignored() {
    let (debouncer, _expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(event("/w/notes.txt", FsEventKind::Write)).unwrap();
    tx.send(event("/w/a.demo.tar.gz", FsEventKind::Write)).unwrap();
    tx.send(event("/w/b.demo", FsEventKind::Other)).unwrap();
    drop(tx);

    let handle = debouncer.handle();
    let _ = watch_loop(rx, &filter(), &handle, QUIESCENCE, &CancellationToken::new()).await;

    assert_eq!(handle.pending(), 0);
    debouncer.close().await;
}

#[tokio::test(start_paused = true)]
async fn watcher_errors_do_not_stop_the_loop() {
    let (debouncer, _expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(Err(WatchError::Backend(notify::Error::generic("queue overflow"))))
        .unwrap();
    tx.send(event("/w/a.demo", FsEventKind::Write)).unwrap();
    drop(tx);

    let handle = debouncer.handle();
    let result = watch_loop(rx, &filter(), &handle, QUIESCENCE, &CancellationToken::new()).await;

    assert!(matches!(result, Err(EngineError::WatchStreamClosed)));
    assert_eq!(handle.pending(), 1);
    debouncer.close().await;
}

#[tokio::test(start_paused = true)]
async fn repeated_writes_push_the_deadline_back() {
    let (debouncer, mut expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let start = TokioClock.now();

    let task = tokio::spawn({
        let handle = debouncer.handle();
        let cancel = cancel.clone();
        async move { watch_loop(rx, &filter(), &handle, QUIESCENCE, &cancel).await }
    });

    tx.send(event("/w/a.demo", FsEventKind::Write)).unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    tx.send(event("/w/a.demo", FsEventKind::Write)).unwrap();

    let (key, at) = expired.recv().await.unwrap();
    assert_eq!(key, "/w/a.demo");
    let elapsed = at.duration_since(start);
    assert!(
        elapsed >= Duration::from_millis(160) && elapsed <= Duration::from_millis(165),
        "fired after {:?}",
        elapsed
    );

    cancel.cancel();
    assert!(task.await.unwrap().is_ok());
    debouncer.close().await;
}

#[tokio::test]
async fn cancellation_ends_the_loop_cleanly() {
    let (debouncer, _expired) = recording();
    let (_tx, rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = watch_loop(rx, &filter(), &debouncer.handle(), QUIESCENCE, &cancel).await;

    assert!(result.is_ok());
    debouncer.close().await;
}

#[cfg(unix)]
#[tokio::test(start_paused = true)]
async fn non_utf8_paths_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (debouncer, _expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();
    let path = PathBuf::from(OsStr::from_bytes(b"/w/\xffa.demo"));
    assert_eq!(filter().classify(&path), Verdict::Accept);

    tx.send(Ok(FsEvent {
        path,
        kind: FsEventKind::Write,
    }))
    .unwrap();
    tx.send(event("/w/b.demo", FsEventKind::Write)).unwrap();
    drop(tx);

    let handle = debouncer.handle();
    let _ = watch_loop(rx, &filter(), &handle, QUIESCENCE, &CancellationToken::new()).await;

    assert_eq!(handle.pending(), 1);
    debouncer.close().await;
}

#[tokio::test(start_paused = true)]
async fn quiescence_past_the_clock_range_is_not_scheduled() {
    let (debouncer, _expired) = recording();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(event("/w/a.demo", FsEventKind::Write)).unwrap();
    drop(tx);

    let handle = debouncer.handle();
    let result = watch_loop(rx, &filter(), &handle, Duration::MAX, &CancellationToken::new()).await;

    assert!(matches!(result, Err(EngineError::WatchStreamClosed)));
    assert_eq!(handle.pending(), 0);
    assert_eq!(handle.next_wake(), None);
    debouncer.close().await;
}
