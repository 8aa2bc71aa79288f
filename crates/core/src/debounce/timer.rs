// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reusable single-shot timer
//!
//! The scheduler keeps one alarm for its whole lifetime and rearms it every
//! time the earliest deadline changes. Whether the last firing has been
//! consumed is tracked explicitly, so a rearm can never be satisfied by the
//! previous schedule's firing:
//!
//! ```text
//! Idle --arm--> Armed --fire(now >= at)--> Fired --drain--> Idle
//!                 \______________stop / arm_____________/
//! ```
//!
//! Every transition takes the current instant as an argument, which keeps the
//! state machine independent of any real timer.

use std::time::Instant;

/// Observable state of a [`Timer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No alarm pending and no firing left to consume
    Idle,
    /// Will fire once `now >= at`
    Armed { at: Instant },
    /// Fired, waiting for the consumer to drain it
    Fired { at: Instant },
}

#[derive(Debug)]
pub struct Timer {
    state: TimerState,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// A timer that starts out idle and already drained
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TimerState::Idle
    }

    /// Schedule a single firing at `at`.
    ///
    /// Any pending alarm is cancelled first. An alarm that already elapsed
    /// counts as delivered, and an undelivered firing is drained here; its
    /// instant is returned so callers can log the discarded wake-up. Rearming
    /// to the instant that already fired discards nothing and returns `None`.
    /// When `at` is not in the future the timer fires immediately.
    pub fn arm(&mut self, at: Instant, now: Instant) -> Option<Instant> {
        self.fire(now);
        let stale = self.stop().filter(|&fired| fired != at);
        self.state = if at <= now {
            TimerState::Fired { at }
        } else {
            TimerState::Armed { at }
        };
        stale
    }

    /// Cancel a pending alarm and drain an undelivered firing. Idempotent.
    pub fn stop(&mut self) -> Option<Instant> {
        match std::mem::replace(&mut self.state, TimerState::Idle) {
            TimerState::Fired { at } => Some(at),
            TimerState::Armed { .. } | TimerState::Idle => None,
        }
    }

    /// Consumer side: deliver the alarm if it has elapsed.
    ///
    /// Returns true while a firing is waiting to be drained.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Armed { at } if at <= now => {
                self.state = TimerState::Fired { at };
                true
            }
            TimerState::Fired { .. } => true,
            TimerState::Armed { .. } | TimerState::Idle => false,
        }
    }

    /// Consume a delivered firing, leaving the timer idle
    pub fn drain(&mut self) -> Option<Instant> {
        match self.state {
            TimerState::Fired { at } => {
                self.state = TimerState::Idle;
                Some(at)
            }
            TimerState::Armed { .. } | TimerState::Idle => None,
        }
    }

    /// When the consumer should next look at the timer
    pub fn wake_at(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed { at } | TimerState::Fired { at } => Some(at),
            TimerState::Idle => None,
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
