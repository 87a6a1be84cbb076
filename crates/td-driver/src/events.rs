// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Event multiplexer (spec §4.5): fans out task lifecycle events to any
//! number of subscribers with bounded per-subscriber buffering. Publishing
//! never awaits, so a lagging subscriber cannot block the supervisor loop
//! that publishes into it.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use td_core::{ExitResult, TaskId};

/// Default bound on a subscriber's event channel. Chosen generously enough
/// that a subscriber would have to be badly stuck to overflow it between
/// polls; see `publish`'s drop-and-warn behavior for what happens then.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum TaskEventKind {
    Started,
    RecoveryAttached,
    Exited(ExitResult),
}

#[derive(Debug, Clone)]
pub struct TaskEvent {
    pub id: TaskId,
    pub kind: TaskEventKind,
    pub at_ms: u64,
}

/// Publishes [`TaskEvent`]s; subscribers receive all events published after
/// they subscribe, in the order published, for that one task ID only.
pub struct EventBus {
    capacity: usize,
    subscribers: Mutex<HashMap<TaskId, Vec<mpsc::Sender<TaskEvent>>>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, subscribers: Mutex::new(HashMap::new()) }
    }

    /// Registers a new subscriber for `id`'s events.
    pub fn subscribe(&self, id: TaskId) -> mpsc::Receiver<TaskEvent> {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.subscribers.lock().entry(id).or_default().push(tx);
        rx
    }

    /// Publishes `event` to every live subscriber of its task ID. Subscribers
    /// whose channel is full are skipped with a warning rather than blocked
    /// on; subscribers whose channel is closed are dropped from the list.
    pub fn publish(&self, event: TaskEvent) {
        let mut subscribers = self.subscribers.lock();
        let Some(list) = subscribers.get_mut(&event.id) else {
            return;
        };
        list.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(task_id = %event.id, "event subscriber lagging, dropping event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
