// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod archive;
pub mod traced;
pub mod upload;
pub mod watch;

pub use archive::{archive_path_for, ArchiveAdapter, ArchiveError, TarGzArchiver, ARCHIVE_SUFFIX};
pub use traced::{TracedArchiveAdapter, TracedUploadAdapter};
pub use upload::{UploadAdapter, UploadError, WebhookUploader};
pub use watch::{FsEvent, FsEventKind, NotifyWatcher, WatchError, WatchStream};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use archive::{ArchiveCall, FakeArchiveAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use upload::{FakeUploadAdapter, UploadCall};
