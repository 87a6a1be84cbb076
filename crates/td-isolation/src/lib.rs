// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! td-isolation: resolves a task's PID/IPC mode, Linux capability set, DNS
//! configuration, and filesystem/network isolation into a concrete plan
//! the launch orchestrator hands to the executor (spec §4.4).

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod capability;
pub mod dns;
pub mod plan;
pub mod vm;

pub use capability::{host_capability_universe, normalize, CapabilityError};
pub use plan::{plan, IsolationError, IsolationPlan, PlanInputs};
pub use vm::{
    max_socket_path_len, parse_drive_interface, validate_args, validate_image_path,
    validate_platform_feature, validate_socket_path, DriveInterface, VmValidationError,
};
