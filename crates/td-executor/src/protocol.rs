// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Internal request/response shapes [`crate::process::ProcessExecutor`] sends
//! over the executor's IPC socket. This is the driver's side of a protocol
//! the executor binary itself defines; kept private to this crate rather
//! than exposed as a stable wire contract.

use serde::{Deserialize, Serialize};

use td_core::ExitResult;
use td_wire::{ExecResult, ReattachDescriptor, StatsSample};

use crate::command::ExecCommand;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub(crate) enum ExecutorRequest {
    Launch { command: ExecCommand },
    Wait,
    Shutdown { signal: String, grace_ms: u64, escalate: String },
    Kill,
    Stats,
    Signal { signal: String },
    Exec { argv: Vec<String>, deadline_ms: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub(crate) enum ExecutorResponse {
    Reattach { descriptor: ReattachDescriptor },
    Exit { result: ExitResult },
    Ack,
    Stats { sample: StatsSample },
    Exec { result: ExecResult },
    Err { message: String },
}
