// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Task registry: the single source of truth for task liveness (spec §4.2).
//!
//! Reads are shared, writes are exclusive. `StartTask` needs an atomic
//! check-and-reserve step so two concurrent calls for the same ID cannot
//! both proceed to launch; `reserve` provides that without holding the
//! write lock across the (slow, fallible) launch sequence itself.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use td_core::TaskId;

use crate::handle::SupervisionHandle;

enum Slot {
    /// An ID claimed by an in-flight `StartTask`, not yet visible to readers.
    Reserved,
    Active(Arc<SupervisionHandle>),
}

/// Concurrent ID-keyed map from task ID to supervision handle.
pub struct TaskRegistry {
    slots: RwLock<HashMap<TaskId, Slot>>,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self { slots: RwLock::new(HashMap::new()) }
    }

    /// Returns the handle for `id`, or `None` if absent or only reserved.
    pub fn get(&self, id: &TaskId) -> Option<Arc<SupervisionHandle>> {
        match self.slots.read().get(id) {
            Some(Slot::Active(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Atomically claims `id` for an in-flight `StartTask`. Returns `false`
    /// if the ID is already reserved or active.
    pub fn reserve(&self, id: TaskId) -> bool {
        let mut slots = self.slots.write();
        if slots.contains_key(&id) {
            return false;
        }
        slots.insert(id, Slot::Reserved);
        true
    }

    /// Promotes a reservation to an active handle, making it visible to readers.
    pub fn commit(&self, id: TaskId, handle: Arc<SupervisionHandle>) {
        self.slots.write().insert(id, Slot::Active(handle));
    }

    /// Releases a reservation without committing, used when launch fails
    /// after `reserve` but before `commit`.
    pub fn abort_reservation(&self, id: &TaskId) {
        self.slots.write().remove(id);
    }

    /// Unconditionally removes `id`, returning the handle if it was active.
    pub fn delete(&self, id: &TaskId) -> Option<Arc<SupervisionHandle>> {
        match self.slots.write().remove(id) {
            Some(Slot::Active(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Direct insert used by `RecoverTask`, which bypasses the reserve/commit
    /// dance since it is idempotent by construction (spec §4.1).
    pub fn set(&self, id: TaskId, handle: Arc<SupervisionHandle>) {
        self.slots.write().insert(id, Slot::Active(handle));
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
