// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! `ExecCommand`: the fully-resolved launch request handed to an executor
//! (spec §4.3 step 5).

use serde::{Deserialize, Serialize};
use td_core::capability::NetworkIsolationMode;
use td_core::task::{Device, IpcMode, Mount, PidMode, ResourceRequest};

/// Binary + argv + isolation parameters for a single executor launch.
/// Driver-variant-specific command assembly (§4.7) produces this; the
/// executor client only consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecCommand {
    pub binary: String,
    pub argv: Vec<String>,
    pub env: Vec<(String, String)>,
    /// Working user inside the isolation context; `nobody` by default for
    /// chroot-isolated drivers.
    pub working_user: String,
    pub resources: ResourceRequest,
    pub stdout_path: String,
    pub stderr_path: String,
    pub mounts: Vec<Mount>,
    pub devices: Vec<Device>,
    pub network_isolation: NetworkIsolationMode,
    pub pid_mode: PidMode,
    pub ipc_mode: IpcMode,
    pub capabilities: Vec<String>,
    pub no_pivot_root: bool,
}

/// Executor-side process config derived from an [`ExecCommand`]: where it
/// logs and how verbosely, and what filesystem isolation it should set up
/// for itself before exec'ing the workload (§4.3 step 4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub log_path: String,
    pub log_level: String,
    pub filesystem_isolation_request: String,
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
