// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Process-spawned executor client: manages a child executor binary over a
//! UNIX socket, reattaching to it from a persisted descriptor when needed.
//!
//! The spawn-then-poll-for-readiness shape mirrors the local agent adapter's
//! process bring-up: spawn detached, reap in the background, poll a health
//! signal rather than trust the spawn call alone.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::net::UnixStream;
use tokio::sync::Mutex as AsyncMutex;

use td_core::ExitResult;
use td_wire::{read_json, write_json, ExecResult, ReattachDescriptor, StatsSample};

use crate::client::{ExecutorClient, ExecutorError};
use crate::command::ExecCommand;
use crate::protocol::{ExecutorRequest, ExecutorResponse};

/// Configuration for spawning and reattaching to a managed executor process.
#[derive(Debug, Clone)]
pub struct ProcessExecutorConfig {
    pub executor_binary: String,
    pub socket_path: PathBuf,
    pub log_path: String,
    pub log_level: String,
    pub ready_poll_ms: u64,
    pub ready_max_attempts: usize,
}

impl ProcessExecutorConfig {
    pub fn new(executor_binary: impl Into<String>, socket_path: PathBuf) -> Self {
        let ready_poll_ms = std::env::var("TD_EXECUTOR_READY_POLL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let ready_max_attempts = std::env::var("TD_EXECUTOR_READY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200);
        Self {
            executor_binary: executor_binary.into(),
            socket_path,
            log_path: String::new(),
            log_level: "info".to_string(),
            ready_poll_ms,
            ready_max_attempts,
        }
    }
}

/// An executor client backed by a managed child process, reached over a
/// length-prefixed JSON socket.
pub struct ProcessExecutor {
    config: ProcessExecutorConfig,
    pid: parking_lot::Mutex<Option<u32>>,
    stream: AsyncMutex<Option<UnixStream>>,
}

impl ProcessExecutor {
    pub fn new(config: ProcessExecutorConfig) -> Self {
        Self { config, pid: parking_lot::Mutex::new(None), stream: AsyncMutex::new(None) }
    }

    /// Reattaches to an already-running executor using a persisted
    /// descriptor, skipping the spawn step entirely (`RecoverTask`).
    pub async fn reattach(config: ProcessExecutorConfig, descriptor: &ReattachDescriptor) -> Result<Self, ExecutorError> {
        let executor = Self::new(config);
        let stream = UnixStream::connect(&executor.config.socket_path)
            .await
            .map_err(|e| ExecutorError::LaunchFailed(format!("reattach connect failed: {e}")))?;
        *executor.pid.lock() = Some(descriptor.pid);
        *executor.stream.lock().await = Some(stream);
        Ok(executor)
    }

    async fn wait_for_socket(&self) -> Result<UnixStream, ExecutorError> {
        for attempt in 0..self.config.ready_max_attempts {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.ready_poll_ms)).await;
            }
            if let Ok(stream) = UnixStream::connect(&self.config.socket_path).await {
                return Ok(stream);
            }
        }
        Err(ExecutorError::LaunchFailed(format!(
            "executor socket not ready within {}s",
            (self.config.ready_max_attempts as u64 * self.config.ready_poll_ms) / 1000
        )))
    }

    async fn roundtrip(&self, request: ExecutorRequest) -> Result<ExecutorResponse, ExecutorError> {
        let mut guard = self.stream.lock().await;
        let stream = guard
            .as_mut()
            .ok_or_else(|| ExecutorError::WaitFailed("executor not launched".to_string()))?;
        write_json(stream, &request).await.map_err(|e| ExecutorError::WaitFailed(e.to_string()))?;
        read_json(stream).await.map_err(|e| ExecutorError::WaitFailed(e.to_string()))
    }
}

#[async_trait]
impl ExecutorClient for ProcessExecutor {
    async fn launch(&self, command: ExecCommand) -> Result<ReattachDescriptor, ExecutorError> {
        let mut cmd = tokio::process::Command::new(&self.config.executor_binary);
        cmd.arg("--socket")
            .arg(&self.config.socket_path)
            .arg("--log-path")
            .arg(&self.config.log_path)
            .arg("--log-level")
            .arg(&self.config.log_level)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        let child = cmd.spawn().map_err(|e| ExecutorError::LaunchFailed(format!("spawn failed: {e}")))?;
        let pid = child.id();
        *self.pid.lock() = pid;

        tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) => {
                    tracing::warn!(exit_status = %output.status, "executor process exited");
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to wait on executor process");
                }
            }
        });

        let stream = self.wait_for_socket().await?;
        *self.stream.lock().await = Some(stream);

        match self.roundtrip(ExecutorRequest::Launch { command }).await? {
            ExecutorResponse::Reattach { descriptor } => Ok(descriptor),
            ExecutorResponse::Err { message } => Err(ExecutorError::LaunchFailed(message)),
            _ => Err(ExecutorError::LaunchFailed("unexpected response to Launch".to_string())),
        }
    }

    async fn wait(&self) -> Result<ExitResult, ExecutorError> {
        match self.roundtrip(ExecutorRequest::Wait).await? {
            ExecutorResponse::Exit { result } => Ok(result),
            ExecutorResponse::Err { message } => Err(ExecutorError::WaitFailed(message)),
            _ => Err(ExecutorError::WaitFailed("unexpected response to Wait".to_string())),
        }
    }

    async fn shutdown(&self, signal: Signal, grace: Duration, escalate: Signal) -> Result<(), ExecutorError> {
        let request = ExecutorRequest::Shutdown {
            signal: signal.to_string(),
            grace_ms: grace.as_millis() as u64,
            escalate: escalate.to_string(),
        };
        match self.roundtrip(request).await? {
            ExecutorResponse::Ack => Ok(()),
            ExecutorResponse::Err { message } => Err(ExecutorError::ShutdownFailed(message)),
            _ => Err(ExecutorError::ShutdownFailed("unexpected response to Shutdown".to_string())),
        }
    }

    async fn kill(&self) -> Result<(), ExecutorError> {
        let Some(pid) = *self.pid.lock() else {
            return Ok(());
        };
        signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL)
            .map_err(|e| ExecutorError::ShutdownFailed(format!("kill failed: {e}")))
    }

    async fn stats(&self) -> Result<StatsSample, ExecutorError> {
        match self.roundtrip(ExecutorRequest::Stats).await? {
            ExecutorResponse::Stats { sample } => Ok(sample),
            ExecutorResponse::Err { message } => Err(ExecutorError::StatsUnavailable(message)),
            _ => Err(ExecutorError::StatsUnavailable("unexpected response to Stats".to_string())),
        }
    }

    async fn signal(&self, signal: Signal) -> Result<(), ExecutorError> {
        match self.roundtrip(ExecutorRequest::Signal { signal: signal.to_string() }).await? {
            ExecutorResponse::Ack => Ok(()),
            ExecutorResponse::Err { message } => Err(ExecutorError::SignalFailed(message)),
            _ => Err(ExecutorError::SignalFailed("unexpected response to Signal".to_string())),
        }
    }

    async fn exec(&self, argv: Vec<String>, deadline: Duration) -> Result<ExecResult, ExecutorError> {
        let request = ExecutorRequest::Exec { argv, deadline_ms: deadline.as_millis() as u64 };
        match tokio::time::timeout(deadline, self.roundtrip(request)).await {
            Ok(Ok(ExecutorResponse::Exec { result })) => Ok(result),
            Ok(Ok(ExecutorResponse::Err { message })) => Err(ExecutorError::ExecFailed(message)),
            Ok(Ok(_)) => Err(ExecutorError::ExecFailed("unexpected response to Exec".to_string())),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ExecutorError::DeadlineExceeded(deadline)),
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
