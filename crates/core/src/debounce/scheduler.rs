// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debounce scheduler
//!
//! Turns "this key was touched" into "this key has been quiet until its
//! deadline". One background task owns the wake-ups; producers only ever call
//! [`DebounceHandle::set`], which takes a short lock and never waits on the
//! loop.

use super::store::DeadlineStore;
use super::timer::Timer;
use crate::clock::Clock;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Receives keys whose deadline has passed
#[async_trait]
pub trait ExpireHandler: Send + Sync + 'static {
    type Error: fmt::Display + Send + 'static;

    /// Called once per expired deadline, with the deadline the key was
    /// scheduled for rather than the current time.
    ///
    /// Runs on the scheduler's loop with no lock held, so it may call
    /// [`DebounceHandle::set`] for any key, including its own. Errors and
    /// panics are logged and the entry is not retried.
    async fn on_expire(&self, key: String, deadline: Instant) -> Result<(), Self::Error>;
}

struct State {
    store: DeadlineStore,
    timer: Timer,
}

impl State {
    /// Point the timer at the earliest pending deadline, if any
    fn rearm(&mut self, now: Instant) -> Option<Instant> {
        let (key, at) = self.store.peek_earliest()?;
        if let Some(stale) = self.timer.arm(at, now) {
            tracing::trace!(
                key,
                stale_ms_ago = as_millis(now.saturating_duration_since(stale)),
                "drained stale firing"
            );
        }
        Some(at)
    }
}

struct Shared<C> {
    clock: C,
    state: Mutex<State>,
    rearmed: Notify,
}

impl<C: Clock> Shared<C> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, key: String, deadline: Instant) {
        {
            let mut state = self.lock();
            state.store.set(key, deadline);
            state.rearm(self.clock.now());
        }
        // Stores a permit if the loop is not waiting yet
        self.rearmed.notify_one();
    }
}

/// Cloneable producer side of a [`Debouncer`]
pub struct DebounceHandle<C> {
    shared: Arc<Shared<C>>,
}

impl<C> Clone for DebounceHandle<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: Clock> DebounceHandle<C> {
    /// Insert or overwrite the deadline for `key`.
    ///
    /// When this returns the timer is armed for no later than the earliest
    /// pending deadline.
    pub fn set(&self, key: impl Into<String>, deadline: Instant) {
        self.shared.set(key.into(), deadline);
    }

    /// Number of keys waiting for their deadline
    pub fn pending(&self) -> usize {
        self.shared.lock().store.len()
    }

    /// Instant the loop will next wake for, `None` while idle
    pub fn next_wake(&self) -> Option<Instant> {
        self.shared.lock().timer.wake_at()
    }

    pub fn clock(&self) -> &C {
        &self.shared.clock
    }
}

/// Owns the deadline store, the timer and the background loop
pub struct Debouncer<C: Clock> {
    handle: DebounceHandle<C>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<C: Clock> Debouncer<C> {
    /// Spawn the background loop on the current tokio runtime.
    ///
    /// `make_handler` receives a handle to this scheduler so the handler can
    /// reschedule keys from inside `on_expire`.
    pub fn start<H, F>(clock: C, make_handler: F) -> Self
    where
        H: ExpireHandler,
        F: FnOnce(DebounceHandle<C>) -> H,
    {
        let handle = DebounceHandle {
            shared: Arc::new(Shared {
                clock,
                state: Mutex::new(State {
                    store: DeadlineStore::new(),
                    timer: Timer::new(),
                }),
                rearmed: Notify::new(),
            }),
        };
        let handler = Arc::new(make_handler(handle.clone()));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(
            Arc::clone(&handle.shared),
            handler,
            cancel.clone(),
        ));

        Self {
            handle,
            cancel,
            task: Some(task),
        }
    }

    pub fn handle(&self) -> DebounceHandle<C> {
        self.handle.clone()
    }

    pub fn set(&self, key: impl Into<String>, deadline: Instant) {
        self.handle.set(key, deadline);
    }

    pub fn pending(&self) -> usize {
        self.handle.pending()
    }

    pub fn next_wake(&self) -> Option<Instant> {
        self.handle.next_wake()
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// A callback that is already running is allowed to finish; pending
    /// deadlines are discarded.
    pub async fn close(mut self) {
        self.cancel.cancel();
        self.handle.shared.lock().timer.stop();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "debounce loop terminated abnormally");
            }
        }
        tracing::debug!("debouncer closed");
    }
}

impl<C: Clock> Drop for Debouncer<C> {
    fn drop(&mut self) {
        // Not closed explicitly: let the loop exit on its own
        self.cancel.cancel();
    }
}

async fn run<C, H>(shared: Arc<Shared<C>>, handler: Arc<H>, cancel: CancellationToken)
where
    C: Clock,
    H: ExpireHandler,
{
    loop {
        let wake_at = shared.lock().timer.wake_at();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                shared.lock().timer.stop();
                tracing::debug!("debounce loop cancelled");
                return;
            }
            _ = shared.rearmed.notified() => continue,
            _ = sleep_until(wake_at) => {}
        }

        let popped = {
            let mut state = shared.lock();
            if !state.timer.fire(shared.clock.now()) {
                continue;
            }
            state.timer.drain();
            state.store.pop_earliest()
        };

        // Only this loop removes entries, so an empty store after a firing
        // should not happen; the timer simply stays idle.
        let Some((key, deadline)) = popped else {
            tracing::debug!("timer fired with no deadlines, sleeping");
            continue;
        };

        tracing::debug!(key = %key, "processing");
        // A panicking handler only ends its own task
        let callback = tokio::spawn({
            let handler = Arc::clone(&handler);
            let key = key.clone();
            async move { handler.on_expire(key, deadline).await }
        });
        match callback.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(key = %key, error = %e, "error while processing"),
            Err(e) => tracing::error!(key = %key, error = %e, "expire handler did not complete"),
        }

        let next = {
            let mut state = shared.lock();
            let now = shared.clock.now();
            state.rearm(now).map(|at| at.saturating_duration_since(now))
        };
        match next {
            Some(delay) => tracing::debug!(deadline_in_ms = as_millis(delay), "next deadline"),
            None => tracing::debug!("no more deadlines left, sleeping"),
        }
    }
}

async fn sleep_until(wake_at: Option<Instant>) {
    match wake_at {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
