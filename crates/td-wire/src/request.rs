// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Control-plane RPC request DTOs (spec §4.1/§6).

use serde::{Deserialize, Serialize};
use td_core::TaskId;

use crate::handle::TaskHandleBlob;

/// One request on the driver's control-plane surface. Transport-agnostic:
/// the RPC layer decides how these cross the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    PluginInfo,
    ConfigSchema,
    TaskConfigSchema,
    SetConfig { payload: serde_json::Value },
    Capabilities,
    Fingerprint,
    StartTask { spec: td_core::TaskSpec },
    RecoverTask { handle: TaskHandleBlob },
    WaitTask { id: TaskId },
    StopTask { id: TaskId, timeout_ms: u64, signal: String },
    DestroyTask { id: TaskId, force: bool },
    InspectTask { id: TaskId },
    TaskStats { id: TaskId, interval_ms: u64 },
    SignalTask { id: TaskId, signal: String },
    ExecTask { id: TaskId, argv: Vec<String>, deadline_ms: u64 },
    ExecTaskStreamingRaw { id: TaskId, argv: Vec<String>, tty: bool },
    Shutdown,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
