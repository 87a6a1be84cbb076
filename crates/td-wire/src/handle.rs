// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Executor reattach descriptor and the versioned task-handle blob (spec §3/§6).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use td_core::capability::NetworkIsolationMode;
use td_core::task::{DnsOptions, IsolationOptions, NetworkIsolation, ResourceRequest};
use td_core::{TaskId, TaskSpec};
use thiserror::Error;

/// Opaque, serializable record sufficient to re-bind to a running executor
/// process across driver restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReattachDescriptor {
    pub network_address: String,
    pub protocol_version: u32,
    pub auth_cookie: String,
    pub pid: u32,
}

/// Current on-disk version of [`TaskHandleBlob`]. Bump this and add a
/// decode arm in [`decode_blob`] when the persisted shape changes.
pub const HANDLE_BLOB_VERSION: u32 = 1;

/// Control-plane-owned persisted record. Codec-opaque to the control plane
/// itself; only the driver decodes it, via [`decode_blob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHandleBlob {
    pub version: u32,
    pub reattach: ReattachDescriptor,
    pub task_spec: TaskSpec,
    pub pid: u32,
    pub started_at_ms: u64,
}

impl TaskHandleBlob {
    pub fn new(reattach: ReattachDescriptor, task_spec: TaskSpec, pid: u32, started_at_ms: u64) -> Self {
        Self { version: HANDLE_BLOB_VERSION, reattach, task_spec, pid, started_at_ms }
    }
}

/// Version 0's on-disk shape, kept only to support [`decode_blob`]'s legacy
/// path. It lacked a protocol version on the reattach descriptor and
/// recorded `task_id` instead of a full spec snapshot.
#[derive(Debug, Clone, Deserialize)]
struct TaskHandleBlobV0 {
    reattach_address: String,
    auth_cookie: String,
    task_id: TaskId,
    pid: u32,
    started_at_ms: u64,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown task-handle blob version: {0}")]
    UnknownVersion(u32),
}

/// Decodes a persisted task-handle blob, dispatching to the legacy v0 path
/// when the `version` field reads 0. Unknown versions are rejected rather
/// than guessed at.
pub fn decode_blob(bytes: &[u8]) -> Result<TaskHandleBlob, DecodeError> {
    let tagged: VersionTag = serde_json::from_slice(bytes)?;
    match tagged.version {
        0 => decode_v0(bytes),
        HANDLE_BLOB_VERSION => Ok(serde_json::from_slice(bytes)?),
        other => Err(DecodeError::UnknownVersion(other)),
    }
}

#[derive(Deserialize)]
struct VersionTag {
    #[serde(default)]
    version: u32,
}

fn decode_v0(bytes: &[u8]) -> Result<TaskHandleBlob, DecodeError> {
    let legacy: TaskHandleBlobV0 = serde_json::from_slice(bytes)?;
    Ok(TaskHandleBlob {
        version: HANDLE_BLOB_VERSION,
        reattach: ReattachDescriptor {
            network_address: legacy.reattach_address,
            protocol_version: 0,
            auth_cookie: legacy.auth_cookie,
            pid: legacy.pid,
        },
        // v0 blobs recorded only the task ID, not a full spec snapshot;
        // the rest is reconstructed with placeholders RecoverTask ignores.
        task_spec: placeholder_spec(legacy.task_id),
        pid: legacy.pid,
        started_at_ms: legacy.started_at_ms,
    })
}

fn placeholder_spec(id: TaskId) -> TaskSpec {
    TaskSpec {
        id,
        name: String::new(),
        allocation_id: String::new(),
        user: "nobody".to_string(),
        command: String::new(),
        args: Vec::new(),
        env: BTreeMap::new(),
        resources: ResourceRequest::default(),
        stdout_path: String::new(),
        stderr_path: String::new(),
        mounts: Vec::new(),
        devices: Vec::new(),
        dns: DnsOptions::default(),
        network_isolation: NetworkIsolation { mode: NetworkIsolationMode::Host, group_namespace: None },
        isolation: IsolationOptions::default(),
        variant_config: serde_json::Value::Null,
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
