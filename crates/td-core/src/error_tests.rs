// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn kind_is_stable_and_message_independent() {
    let err = DriverError::TaskNotFound("tsk-abc".into());
    assert_eq!(err.kind(), "task_not_found");
    assert_eq!(err.to_string(), "task not found: tsk-abc");
}

#[test]
fn unit_variants_have_fixed_messages() {
    assert_eq!(DriverError::DeadlineExceeded.kind(), "deadline_exceeded");
    assert_eq!(DriverError::PluginShutdown.to_string(), "driver is shutting down");
}

#[test]
fn task_running_message_mentions_force() {
    let err = DriverError::TaskRunning("tsk-xyz".into());
    assert!(err.to_string().contains("force=true"));
}
