// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! td-wire: control-plane wire types for the task-driver runtime.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod handle;
mod request;
mod response;
mod schema;

pub use codec::{decode, encode, read_json, read_message, write_json, write_message, ProtocolError, MAX_MESSAGE_LEN};
pub use handle::{decode_blob, DecodeError, ReattachDescriptor, TaskHandleBlob, HANDLE_BLOB_VERSION};
pub use request::Request;
pub use response::{ExecResult, PluginDescriptor, Response, StatsSample, TaskSnapshot};
pub use schema::{
    config_schema_exec, config_schema_jvm, config_schema_vm, default_allow_caps,
    task_config_schema_exec, task_config_schema_jvm, task_config_schema_vm, PluginConfigExec,
    PluginConfigJvm, PluginConfigVm, TaskConfigExec, TaskConfigJvm, TaskConfigVm,
};
