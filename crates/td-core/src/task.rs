// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Task identity and the task specification data model (spec §3).

use std::collections::BTreeMap;

use crate::capability::NetworkIsolationMode;

crate::define_id! {
    /// Unique, immutable for the lifetime of its supervision handle.
    pub struct TaskId("tsk-");
}

/// PID namespace mode requested for a task's isolation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PidMode {
    Private,
    Host,
}

crate::simple_display!(PidMode {
    Private => "private",
    Host => "host",
});

/// IPC namespace mode requested for a task's isolation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpcMode {
    Private,
    Host,
}

crate::simple_display!(IpcMode {
    Private => "private",
    Host => "host",
});

/// A single bind mount request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Mount {
    pub host_path: String,
    pub task_path: String,
    pub readonly: bool,
}

/// A single device node to expose inside the task's isolation context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    pub host_path: String,
    pub task_path: String,
    pub permissions: String,
}

/// DNS configuration to synthesize into the task's resolv.conf.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DnsOptions {
    pub servers: Vec<String>,
    pub searches: Vec<String>,
    pub options: Vec<String>,
}

/// Pass-through network isolation descriptor: which mode, and (for `Group`)
/// the shared namespace this task joins.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NetworkIsolation {
    pub mode: NetworkIsolationMode,
    pub group_namespace: Option<String>,
}

/// Driver-specific isolation options captured verbatim from the task spec;
/// resolution into a concrete isolation plan happens downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IsolationOptions {
    pub pid_mode: Option<PidMode>,
    pub ipc_mode: Option<IpcMode>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub no_pivot_root: bool,
}

/// Resource request accompanying a task spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceRequest {
    pub cpu_shares: u64,
    pub memory_bytes: u64,
    pub network_reservation_mbits: u64,
    pub cgroup_path: Option<String>,
}

/// Input to `StartTask`. Immutable once launched: environment and resources
/// are captured at launch and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaskSpec {
    pub id: TaskId,
    pub name: String,
    pub allocation_id: String,
    pub user: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub resources: ResourceRequest,
    pub stdout_path: String,
    pub stderr_path: String,
    pub mounts: Vec<Mount>,
    pub devices: Vec<Device>,
    pub dns: DnsOptions,
    pub network_isolation: NetworkIsolation,
    pub isolation: IsolationOptions,
    /// Driver-variant-specific task config (e.g. JVM jar/class selectors,
    /// VM image path), opaque to everything except the variant that decodes
    /// it in `extra_task_validation`/`build_invocation`.
    pub variant_config: serde_json::Value,
}

crate::builder! {
    pub struct TaskSpecBuilder => TaskSpec {
        into {
            name: String = "task",
            allocation_id: String = "alc-test",
            user: String = "nobody",
            command: String = "/bin/true",
            stdout_path: String = "/dev/null",
            stderr_path: String = "/dev/null",
        }
        set {
            id: TaskId = TaskId::new(),
            args: Vec<String> = Vec::new(),
            env: BTreeMap<String, String> = BTreeMap::new(),
            resources: ResourceRequest = ResourceRequest::default(),
            mounts: Vec<Mount> = Vec::new(),
            devices: Vec<Device> = Vec::new(),
            dns: DnsOptions = DnsOptions::default(),
            network_isolation: NetworkIsolation = NetworkIsolation { mode: NetworkIsolationMode::Host, group_namespace: None },
            isolation: IsolationOptions = IsolationOptions::default(),
            variant_config: serde_json::Value = serde_json::Value::Null,
        }
    }
}

/// Current lifecycle state of a supervision handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Running,
    Exited,
    Unknown,
}

crate::simple_display!(TaskState {
    Pending => "pending",
    Running => "running",
    Exited => "exited",
    Unknown => "unknown",
});

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Exited | TaskState::Unknown)
    }
}

/// Outcome recorded by the supervisor loop on completion or wait error.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExitResult {
    pub exit_code: Option<i32>,
    pub signal: Option<String>,
    pub error: Option<String>,
}

impl ExitResult {
    pub fn success(exit_code: i32) -> Self {
        Self { exit_code: Some(exit_code), signal: None, error: None }
    }

    pub fn killed_by_signal(signal: impl Into<String>) -> Self {
        Self { exit_code: None, signal: Some(signal.into()), error: None }
    }

    pub fn wait_error(error: impl Into<String>) -> Self {
        Self { exit_code: None, signal: None, error: Some(error.into()) }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
