// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Pure function from (plugin config, task config, host topology) to a
//! concrete isolation plan (spec §4.4).

use thiserror::Error;

use td_core::capability::{FilesystemIsolationMode, NetworkIsolationMode};
use td_core::task::{IpcMode, Mount, PidMode, TaskSpec};

use crate::capability::{self, CapabilityError};
use crate::dns;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IsolationError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Plugin-level defaults and host facts the planner needs in addition to
/// the task spec itself.
#[derive(Debug, Clone)]
pub struct PlanInputs {
    pub default_pid_mode: PidMode,
    pub default_ipc_mode: IpcMode,
    pub capability_defaults: Vec<String>,
    pub capability_allow_list: Vec<String>,
    pub filesystem_isolation: FilesystemIsolationMode,
    pub resolv_conf_host_path: String,
}

/// Resolved isolation parameters ready to hand to the launch orchestrator's
/// `ExecCommand` construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationPlan {
    pub pid_mode: PidMode,
    pub ipc_mode: IpcMode,
    pub capabilities: Vec<String>,
    pub filesystem_isolation: FilesystemIsolationMode,
    pub network_isolation: NetworkIsolationMode,
    pub extra_mount: Option<Mount>,
    pub no_pivot_root: bool,
    /// Rendered resolv.conf text, when DNS options were set. The caller is
    /// responsible for writing this to `extra_mount`'s host path before the
    /// task starts; `plan` itself performs no I/O.
    pub resolv_conf_content: Option<String>,
}

/// Task value overrides plugin default; an absent task value inherits the default.
fn resolve_pid_mode(default: PidMode, task_value: Option<PidMode>) -> PidMode {
    task_value.unwrap_or(default)
}

fn resolve_ipc_mode(default: IpcMode, task_value: Option<IpcMode>) -> IpcMode {
    task_value.unwrap_or(default)
}

pub fn plan(task: &TaskSpec, inputs: &PlanInputs) -> Result<IsolationPlan, IsolationError> {
    let capabilities = capability::resolve(
        &inputs.capability_defaults,
        &inputs.capability_allow_list,
        &task.isolation.cap_add,
        &task.isolation.cap_drop,
    )?;

    let resolv_conf = dns::render_resolv_conf(&task.dns);
    let extra_mount = resolv_conf.is_some().then(|| dns::resolv_conf_mount(inputs.resolv_conf_host_path.clone()));

    // `no_pivot_root` only has meaning for chroot isolation; it forces the
    // mode rather than requiring the caller to have already selected it.
    let filesystem_isolation = if task.isolation.no_pivot_root {
        FilesystemIsolationMode::Chroot
    } else {
        inputs.filesystem_isolation
    };

    Ok(IsolationPlan {
        pid_mode: resolve_pid_mode(inputs.default_pid_mode, task.isolation.pid_mode),
        ipc_mode: resolve_ipc_mode(inputs.default_ipc_mode, task.isolation.ipc_mode),
        capabilities,
        filesystem_isolation,
        network_isolation: task.network_isolation.mode,
        extra_mount,
        no_pivot_root: task.isolation.no_pivot_root,
        resolv_conf_content: resolv_conf,
    })
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
