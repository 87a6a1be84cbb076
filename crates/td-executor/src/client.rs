// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! `ExecutorClient`: the interface the driver core consumes from an
//! out-of-process executor (spec §4.1, out-of-scope collaborator).

use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::Signal;
use thiserror::Error;

use td_core::ExitResult;
use td_wire::{ExecResult, ReattachDescriptor, StatsSample};

use crate::command::ExecCommand;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("launch failed: {0}")]
    LaunchFailed(String),

    #[error("wait failed: {0}")]
    WaitFailed(String),

    #[error("shutdown failed: {0}")]
    ShutdownFailed(String),

    #[error("signal delivery failed: {0}")]
    SignalFailed(String),

    #[error("stats unavailable: {0}")]
    StatsUnavailable(String),

    #[error("exec failed: {0}")]
    ExecFailed(String),

    #[error("exec deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// One executor instance bound to a single task. Implementations: a real
/// out-of-process executor reached over IPC ([`crate::process::ProcessExecutor`])
/// or an in-process scripted stand-in ([`crate::mock::MockExecutor`]).
#[async_trait]
pub trait ExecutorClient: Send + Sync + 'static {
    /// Spawns the executor and hands it `command`. Returns the reattach
    /// descriptor published on a successful handshake.
    async fn launch(&self, command: ExecCommand) -> Result<ReattachDescriptor, ExecutorError>;

    /// Blocks until the supervised workload exits.
    async fn wait(&self) -> Result<ExitResult, ExecutorError>;

    /// Sends `signal`, then escalates to `escalate` after `grace` if the
    /// workload has not exited.
    async fn shutdown(&self, signal: Signal, grace: Duration, escalate: Signal) -> Result<(), ExecutorError>;

    /// Unconditionally kills the executor process itself, not just the
    /// supervised workload.
    async fn kill(&self) -> Result<(), ExecutorError>;

    async fn stats(&self) -> Result<StatsSample, ExecutorError>;

    async fn signal(&self, signal: Signal) -> Result<(), ExecutorError>;

    async fn exec(&self, argv: Vec<String>, deadline: Duration) -> Result<ExecResult, ExecutorError>;
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
