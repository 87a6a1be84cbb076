// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! The supervision handle: one per launched or recovered task. It is the
//! sole owner of its executor client (spec §9 "Replacing the
//! executor-client ownership chain") and the only place a task's mutable
//! lifecycle fields live.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use td_core::{ExitResult, TaskId, TaskSpec, TaskState};
use td_executor::ExecutorClient;

struct HandleInner {
    state: TaskState,
    completed_at_ms: Option<u64>,
    exit_result: Option<ExitResult>,
    pid: u32,
}

/// A live or recovered task. `spec`, `executor` and `started_at_ms` are
/// immutable after construction (spec §5); everything that changes over the
/// task's lifetime lives behind `inner`'s single small lock.
pub struct SupervisionHandle {
    pub spec: TaskSpec,
    pub started_at_ms: u64,
    pub executor: Arc<dyn ExecutorClient>,
    inner: Mutex<HandleInner>,
    exited: Notify,
}

/// Point-in-time view of a handle's mutable fields, for `InspectTask`.
#[derive(Debug, Clone)]
pub struct HandleSnapshot {
    pub state: TaskState,
    pub completed_at_ms: Option<u64>,
    pub exit_result: Option<ExitResult>,
    pub pid: u32,
}

impl SupervisionHandle {
    pub fn new(spec: TaskSpec, executor: Arc<dyn ExecutorClient>, pid: u32, started_at_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            spec,
            started_at_ms,
            executor,
            inner: Mutex::new(HandleInner { state: TaskState::Running, completed_at_ms: None, exit_result: None, pid }),
            exited: Notify::new(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.spec.id
    }

    pub fn state(&self) -> TaskState {
        self.inner.lock().state
    }

    pub fn snapshot(&self) -> HandleSnapshot {
        let inner = self.inner.lock();
        HandleSnapshot {
            state: inner.state,
            completed_at_ms: inner.completed_at_ms,
            exit_result: inner.exit_result.clone(),
            pid: inner.pid,
        }
    }

    /// Invariant (spec §8 exit-monotonicity): once terminal, state never
    /// changes again.
    fn record_terminal(&self, state: TaskState, result: ExitResult, completed_at_ms: u64) {
        let mut inner = self.inner.lock();
        if inner.state.is_terminal() {
            return;
        }
        inner.state = state;
        inner.exit_result = Some(result);
        inner.completed_at_ms = Some(completed_at_ms);
        drop(inner);
        self.exited.notify_waiters();
    }

    pub(crate) fn record_exit(&self, result: ExitResult, completed_at_ms: u64) {
        self.record_terminal(TaskState::Exited, result, completed_at_ms);
    }

    pub(crate) fn record_wait_error(&self, error: String, completed_at_ms: u64) {
        self.record_terminal(TaskState::Unknown, ExitResult::wait_error(error), completed_at_ms);
    }

    /// Blocks until the supervisor loop records a terminal outcome, then
    /// returns exactly one exit record. Safe to call concurrently from any
    /// number of `WaitTask` callers; each gets its own record (spec §4.1).
    pub async fn wait_for_exit(&self) -> ExitResult {
        loop {
            // Register as a waiter before checking, so a `notify_waiters`
            // that lands between the check and the `.await` below is not
            // missed (see `tokio::sync::Notify`'s documented usage).
            let notified = self.exited.notified();
            if let Some(result) = self.inner.lock().exit_result.clone() {
                return result;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
