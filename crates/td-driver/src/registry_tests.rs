// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;
use td_core::test_support::task_spec;
use td_executor::MockExecutor;
use td_executor::MockScript;

fn sample_handle() -> Arc<SupervisionHandle> {
    let spec = task_spec("tsk-registry-test0000", "demo");
    let executor = Arc::new(MockExecutor::new(MockScript::default()));
    SupervisionHandle::new(spec, executor, 42, 0)
}

#[test]
fn get_is_none_for_unknown_id() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    assert!(registry.get(&handle.id()).is_none());
}

#[test]
fn reserve_then_commit_makes_handle_visible() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    let id = handle.id();
    assert!(registry.reserve(id));
    assert!(registry.get(&id).is_none());
    registry.commit(id, handle.clone());
    assert!(registry.get(&id).is_some());
}

#[test]
fn reserve_twice_for_same_id_fails() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    let id = handle.id();
    assert!(registry.reserve(id));
    assert!(!registry.reserve(id));
}

#[test]
fn abort_reservation_frees_the_id() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    let id = handle.id();
    registry.reserve(id);
    registry.abort_reservation(&id);
    assert!(registry.reserve(id));
}

#[test]
fn delete_removes_active_handle() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    let id = handle.id();
    registry.set(id, handle);
    assert!(registry.get(&id).is_some());
    assert!(registry.delete(&id).is_some());
    assert!(registry.get(&id).is_none());
}

#[test]
fn delete_on_reserved_only_slot_returns_none() {
    let registry = TaskRegistry::new();
    let handle = sample_handle();
    let id = handle.id();
    registry.reserve(id);
    assert!(registry.delete(&id).is_none());
}
