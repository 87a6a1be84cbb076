// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::capability::{DriverCapabilities, FilesystemIsolationMode, NetworkIsolationMode};
use crate::fingerprint::{FingerprintRecord, Health};
use crate::task::{TaskId, TaskSpec, TaskState};

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::fingerprint::Health;
    use crate::task::TaskState;
    use proptest::prelude::*;

    pub fn arb_task_state() -> impl Strategy<Value = TaskState> {
        prop_oneof![
            Just(TaskState::Pending),
            Just(TaskState::Running),
            Just(TaskState::Exited),
            Just(TaskState::Unknown),
        ]
    }

    pub fn arb_health() -> impl Strategy<Value = Health> {
        prop_oneof![Just(Health::Healthy), Just(Health::Unhealthy), Just(Health::Undetected)]
    }
}

/// A minimal, deterministic task spec for tests that don't care about its contents.
pub fn task_spec(id: &str, name: &str) -> TaskSpec {
    TaskSpec::builder().id(TaskId::from_string(id)).name(name).build()
}

pub fn healthy_record(description: &str) -> FingerprintRecord {
    FingerprintRecord::healthy(description)
}

pub fn unhealthy_record(description: &str) -> FingerprintRecord {
    FingerprintRecord::unhealthy(description)
}

/// Capability descriptor for a driver that supports everything, used as the
/// baseline fixture for capability-rejection tests that flip one field.
pub fn permissive_capabilities() -> DriverCapabilities {
    DriverCapabilities::builder()
        .signals_supported(true)
        .exec_supported(true)
        .filesystem_isolation(FilesystemIsolationMode::Chroot)
        .network_isolation_modes(vec![NetworkIsolationMode::Host, NetworkIsolationMode::Group])
        .build()
}
