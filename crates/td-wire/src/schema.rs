// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Declarative plugin/task configuration schemas (spec §6), one set per
//! driver variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use td_core::{IpcMode, PidMode};

/// Linux capabilities Nomad's generic exec driver allows by default. Used
/// as the built-in default set the isolation planner intersects against.
pub fn default_allow_caps() -> Vec<String> {
    [
        "audit_write",
        "chown",
        "dac_override",
        "fowner",
        "fsetid",
        "kill",
        "mknod",
        "net_bind_service",
        "setfcap",
        "setgid",
        "setpcap",
        "setuid",
        "sys_chroot",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfigExec {
    pub no_pivot_root: bool,
    pub default_pid_mode: PidMode,
    pub default_ipc_mode: IpcMode,
    pub allow_caps: Vec<String>,
}

impl Default for PluginConfigExec {
    fn default() -> Self {
        Self {
            no_pivot_root: false,
            default_pid_mode: PidMode::Private,
            default_ipc_mode: IpcMode::Private,
            allow_caps: default_allow_caps(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfigJvm {
    pub default_pid_mode: PidMode,
    pub default_ipc_mode: IpcMode,
    pub allow_caps: Vec<String>,
}

impl Default for PluginConfigJvm {
    fn default() -> Self {
        Self {
            default_pid_mode: PidMode::Private,
            default_ipc_mode: IpcMode::Private,
            allow_caps: default_allow_caps(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfigVm {
    pub image_paths: Vec<String>,
    pub args_allowlist: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfigExec {
    pub command: String,
    pub args: Vec<String>,
    pub pid_mode: Option<PidMode>,
    pub ipc_mode: Option<IpcMode>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfigJvm {
    pub class: Option<String>,
    pub class_path: Option<String>,
    pub jar_path: Option<String>,
    pub jvm_options: Vec<String>,
    pub args: Vec<String>,
    pub pid_mode: Option<PidMode>,
    pub ipc_mode: Option<IpcMode>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
}

impl TaskConfigJvm {
    /// §6: at least one of `class` or `jar_path` is required.
    pub fn has_entry_point(&self) -> bool {
        self.class.is_some() || self.jar_path.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfigVm {
    pub image_path: String,
    pub drive_interface: String,
    pub accelerator: String,
    pub graceful_shutdown: bool,
    pub guest_agent: bool,
    pub args: Vec<String>,
    pub port_map: BTreeMap<String, u16>,
}

/// Declarative `ConfigSchema` response body for the generic exec variant.
pub fn config_schema_exec() -> serde_json::Value {
    serde_json::json!({
        "no_pivot_root": { "type": "bool", "default": false },
        "default_pid_mode": { "type": "enum", "values": ["private", "host"], "default": "private" },
        "default_ipc_mode": { "type": "enum", "values": ["private", "host"], "default": "private" },
        "allow_caps": { "type": "array", "item": "string", "default": default_allow_caps() },
    })
}

/// Declarative `TaskConfigSchema` response body for the generic exec variant.
pub fn task_config_schema_exec() -> serde_json::Value {
    serde_json::json!({
        "command": { "type": "string", "required": true },
        "args": { "type": "array", "item": "string" },
        "pid_mode": { "type": "enum", "values": ["private", "host"] },
        "ipc_mode": { "type": "enum", "values": ["private", "host"] },
        "cap_add": { "type": "array", "item": "string" },
        "cap_drop": { "type": "array", "item": "string" },
    })
}

/// Declarative `ConfigSchema` response body for the JVM variant.
pub fn config_schema_jvm() -> serde_json::Value {
    serde_json::json!({
        "default_pid_mode": { "type": "enum", "values": ["private", "host"], "default": "private" },
        "default_ipc_mode": { "type": "enum", "values": ["private", "host"], "default": "private" },
        "allow_caps": { "type": "array", "item": "string", "default": default_allow_caps() },
    })
}

/// Declarative `TaskConfigSchema` response body for the JVM variant. Note
/// `class`/`jar_path` are each optional but at least one is required; that
/// cross-field rule is enforced by `TaskConfigJvm::has_entry_point`, not
/// expressible in this flat schema shape.
pub fn task_config_schema_jvm() -> serde_json::Value {
    serde_json::json!({
        "class": { "type": "string" },
        "class_path": { "type": "string" },
        "jar_path": { "type": "string" },
        "jvm_options": { "type": "array", "item": "string" },
        "args": { "type": "array", "item": "string" },
        "pid_mode": { "type": "enum", "values": ["private", "host"] },
        "ipc_mode": { "type": "enum", "values": ["private", "host"] },
        "cap_add": { "type": "array", "item": "string" },
        "cap_drop": { "type": "array", "item": "string" },
    })
}

/// Declarative `ConfigSchema` response body for the VM-image variant.
pub fn config_schema_vm() -> serde_json::Value {
    serde_json::json!({
        "image_paths": { "type": "array", "item": "string", "default": [] },
        "args_allowlist": { "type": "array", "item": "string", "default": [] },
    })
}

/// Declarative `TaskConfigSchema` response body for the VM-image variant.
pub fn task_config_schema_vm() -> serde_json::Value {
    serde_json::json!({
        "image_path": { "type": "string", "required": true },
        "drive_interface": { "type": "string", "default": "virtio" },
        "accelerator": { "type": "string" },
        "graceful_shutdown": { "type": "bool", "default": false },
        "guest_agent": { "type": "bool", "default": false },
        "args": { "type": "array", "item": "string" },
        "port_map": { "type": "map", "key": "string", "value": "uint16" },
    })
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
