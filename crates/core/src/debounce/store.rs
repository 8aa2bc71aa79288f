// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending deadlines keyed by item, ordered by wake-up time

use std::collections::HashMap;
use std::time::Instant;

/// At most one deadline per key.
///
/// Lookups of the earliest entry scan every key.
#[derive(Debug, Default)]
pub struct DeadlineStore {
    entries: HashMap<String, Instant>,
}

impl DeadlineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the deadline for `key`, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, deadline: Instant) -> Option<Instant> {
        self.entries.insert(key.into(), deadline)
    }

    /// Deadline currently stored for `key`
    pub fn deadline(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).copied()
    }

    /// Entry with the smallest deadline; ties go to the smallest key
    pub fn peek_earliest(&self) -> Option<(&str, Instant)> {
        self.entries
            .iter()
            .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
            .map(|(key, deadline)| (key.as_str(), *deadline))
    }

    /// Remove and return the entry `peek_earliest` would report
    pub fn pop_earliest(&mut self) -> Option<(String, Instant)> {
        let key = self.peek_earliest()?.0.to_string();
        let deadline = self.entries.remove(&key)?;
        Some((key, deadline))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
