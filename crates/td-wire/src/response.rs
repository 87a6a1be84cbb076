// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Control-plane RPC response DTOs (spec §4.1/§6).

use serde::{Deserialize, Serialize};
use td_core::{DriverCapabilities, ExitResult, FingerprintRecord, TaskState};

use crate::handle::TaskHandleBlob;

/// Static descriptor returned by `PluginInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,
    pub protocol_version: u32,
}

/// Point-in-time snapshot returned by `InspectTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub state: TaskState,
    pub started_at_ms: u64,
    pub completed_at_ms: Option<u64>,
    pub exit_result: Option<ExitResult>,
    pub pid: u32,
}

/// One resource-usage sample from `TaskStats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSample {
    pub sampled_at_ms: u64,
    pub cpu_percent: f64,
    pub memory_bytes: u64,
}

/// Result of a short-lived `ExecTask` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    pub stdout: Vec<u8>,
    pub exit_code: i32,
}

/// One response on the driver's control-plane surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Generic success with no payload (e.g. `SetConfig`, `Shutdown`).
    Ok,

    PluginInfo { descriptor: PluginDescriptor },
    ConfigSchema { schema: serde_json::Value },
    TaskConfigSchema { schema: serde_json::Value },
    Capabilities { descriptor: DriverCapabilities },
    Fingerprint { record: FingerprintRecord },
    TaskHandle { blob: Box<TaskHandleBlob> },
    ExitRecord { result: ExitResult },
    TaskSnapshot { snapshot: TaskSnapshot },
    StatsSample { sample: StatsSample },
    ExecResult { result: ExecResult },

    Error { kind: String, message: String },
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
