// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lull-core: debounce primitives for the lull upload daemon
//!
//! This crate provides:
//! - A clock abstraction shared by the scheduler and its callers
//! - The deadline store, the reusable timer, and the debounce loop built on
//!   them

pub mod clock;
pub mod debounce;

pub use clock::{Clock, FakeClock, TokioClock};
pub use debounce::{DeadlineStore, DebounceHandle, Debouncer, ExpireHandler, Timer, TimerState};
