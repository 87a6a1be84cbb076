// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! td-core: shared types for the task-driver runtime — IDs, clock, the
//! task/fingerprint/capability data model, and the error taxonomy every
//! other crate in the workspace builds on.

pub mod macros;

pub mod capability;
pub mod clock;
pub mod error;
pub mod fingerprint;
pub mod id;
pub mod signal;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capability::{
    DriverCapabilities, FilesystemIsolationMode, MountConfigSupport, NetworkIsolationMode,
};
#[cfg(any(test, feature = "test-support"))]
pub use capability::DriverCapabilitiesBuilder;
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::DriverError;
pub use fingerprint::{AttributeValue, FingerprintRecord, Health, LastOutcome};
pub use id::{short, IdBuf};
#[cfg(any(test, feature = "test-support"))]
pub use task::TaskSpecBuilder;
pub use task::{
    Device, DnsOptions, ExitResult, IpcMode, IsolationOptions, Mount, NetworkIsolation, PidMode,
    ResourceRequest, TaskId, TaskSpec, TaskState,
};
