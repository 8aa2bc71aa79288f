// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lull execution engine

mod error;
mod filter;
mod runtime;
mod upload_job;
mod watch;

pub use error::{DeliveryError, EngineError};
pub use filter::{FileFilter, Verdict};
pub use runtime::{Runtime, RuntimeConfig, RuntimeDeps};
pub use upload_job::{UploadJob, UploadPolicy};
pub use watch::watch_loop;
