// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! In-process scripted executor backing the synthetic mock driver variant
//! (spec §4.7). Replaces the out-of-process executor entirely so the
//! driver's lifecycle and error taxonomy can be exercised deterministically.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::Signal;
use parking_lot::Mutex;
use tokio::sync::Notify;

use td_core::ExitResult;
use td_wire::{ExecResult, ReattachDescriptor, StatsSample};

use crate::client::{ExecutorClient, ExecutorError};
use crate::command::ExecCommand;

/// Scripted behavior for a [`MockExecutor`].
#[derive(Debug, Clone)]
pub struct MockScript {
    pub stdout: Vec<u8>,
    pub exit_code: i32,
    /// How long the workload "runs" before exiting on its own.
    pub run_for: Duration,
    /// If set, the executor stops responding after this delay instead of
    /// ever producing an exit result, simulating an unprompted plugin
    /// shutdown rather than a normal task exit.
    pub simulate_plugin_shutdown_after: Option<Duration>,
    /// How long a scripted `exec` call takes to answer, so tests can drive
    /// it past a caller-supplied deadline.
    pub exec_delay: Duration,
}

impl Default for MockScript {
    fn default() -> Self {
        Self {
            stdout: Vec::new(),
            exit_code: 0,
            run_for: Duration::from_millis(10),
            simulate_plugin_shutdown_after: None,
            exec_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    exit_result: Option<ExitResult>,
    plugin_shut_down: bool,
}

/// An executor client with no real child process; the "workload" is a
/// timer that produces the scripted outcome.
pub struct MockExecutor {
    script: MockScript,
    state: Arc<Mutex<MockState>>,
    notify: Arc<Notify>,
}

impl MockExecutor {
    pub fn new(script: MockScript) -> Self {
        Self { script, state: Arc::new(Mutex::new(MockState::default())), notify: Arc::new(Notify::new()) }
    }

    fn force_exit(&self, result: ExitResult) {
        let mut state = self.state.lock();
        if state.exit_result.is_none() && !state.plugin_shut_down {
            state.exit_result = Some(result);
            self.notify.notify_waiters();
        }
    }
}

#[async_trait]
impl ExecutorClient for MockExecutor {
    async fn launch(&self, _command: ExecCommand) -> Result<ReattachDescriptor, ExecutorError> {
        let state = self.state.clone();
        let notify = self.notify.clone();
        let run_for = self.script.run_for;
        let exit_code = self.script.exit_code;
        tokio::spawn(async move {
            tokio::time::sleep(run_for).await;
            let mut state = state.lock();
            if state.exit_result.is_none() && !state.plugin_shut_down {
                state.exit_result = Some(ExitResult::success(exit_code));
                notify.notify_waiters();
            }
        });

        if let Some(delay) = self.script.simulate_plugin_shutdown_after {
            let state = self.state.clone();
            let notify = self.notify.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut state = state.lock();
                if state.exit_result.is_none() {
                    state.plugin_shut_down = true;
                    notify.notify_waiters();
                }
            });
        }

        Ok(ReattachDescriptor {
            network_address: "mock://in-process".to_string(),
            protocol_version: 1,
            auth_cookie: "mock".to_string(),
            pid: 0,
        })
    }

    async fn wait(&self) -> Result<ExitResult, ExecutorError> {
        loop {
            // Register before checking: a notification landing between the
            // check and the `.await` below must not be missed.
            let notified = self.notify.notified();
            {
                let state = self.state.lock();
                if let Some(result) = state.exit_result.clone() {
                    return Ok(result);
                }
                if state.plugin_shut_down {
                    return Err(ExecutorError::WaitFailed("mock executor simulated plugin shutdown".to_string()));
                }
            }
            notified.await;
        }
    }

    async fn shutdown(&self, _signal: Signal, _grace: Duration, _escalate: Signal) -> Result<(), ExecutorError> {
        self.force_exit(ExitResult::killed_by_signal("SIGTERM"));
        Ok(())
    }

    async fn kill(&self) -> Result<(), ExecutorError> {
        self.force_exit(ExitResult::killed_by_signal("SIGKILL"));
        Ok(())
    }

    async fn stats(&self) -> Result<StatsSample, ExecutorError> {
        if self.state.lock().plugin_shut_down {
            return Err(ExecutorError::StatsUnavailable("mock executor simulated plugin shutdown".to_string()));
        }
        Ok(StatsSample { sampled_at_ms: 0, cpu_percent: 0.0, memory_bytes: 0 })
    }

    async fn signal(&self, _signal: Signal) -> Result<(), ExecutorError> {
        if self.state.lock().plugin_shut_down {
            return Err(ExecutorError::SignalFailed("mock executor simulated plugin shutdown".to_string()));
        }
        Ok(())
    }

    async fn exec(&self, _argv: Vec<String>, deadline: Duration) -> Result<ExecResult, ExecutorError> {
        match tokio::time::timeout(deadline, tokio::time::sleep(self.script.exec_delay)).await {
            Ok(()) => Ok(ExecResult { stdout: self.script.stdout.clone(), exit_code: self.script.exit_code }),
            Err(_) => Err(ExecutorError::DeadlineExceeded(deadline)),
        }
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
