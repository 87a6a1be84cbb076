// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! td-driver: the driver frame (spec §4.1) that ties the task registry
//! (§4.2), launch orchestrator (§4.3), event multiplexer (§4.5) and
//! fingerprint engine (§4.6) together behind a single `ControlPlane`
//! surface. Generic over the driver variant (§4.7) and the clock; concrete
//! variants live in `td-variants`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod driver;
mod events;
mod fingerprint;
mod handle;
mod handle_store;
mod launch;
mod registry;
mod rpc;
mod variant;

pub use driver::{Driver, DriverConfig};
pub use events::{EventBus, TaskEvent, TaskEventKind, DEFAULT_SUBSCRIBER_CAPACITY};
pub use fingerprint::{FingerprintEngine, DEFAULT_FINGERPRINT_INTERVAL};
pub use handle::{HandleSnapshot, SupervisionHandle};
pub use handle_store::{FileHandleStore, HandleStore};
pub use launch::{default_state_dir, launch, supervise, LaunchConfig, LaunchOutcome};
pub use registry::TaskRegistry;
pub use rpc::{ControlPlane, DuplexStream};
pub use variant::{CommandInvocation, DriverVariant};
