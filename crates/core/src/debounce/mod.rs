// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-key debouncing
//!
//! - [`DeadlineStore`]: at most one pending deadline per key
//! - [`Timer`]: a single alarm that can be rearmed without stale firings
//! - [`Debouncer`]: a background loop that calls an [`ExpireHandler`] once a
//!   key's deadline has passed

mod scheduler;
mod store;
mod timer;

pub use scheduler::{DebounceHandle, Debouncer, ExpireHandler};
pub use store::DeadlineStore;
pub use timer::{Timer, TimerState};
