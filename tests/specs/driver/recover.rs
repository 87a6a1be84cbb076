// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use std::time::Duration;

use td_core::test_support::task_spec;
use td_core::TaskState;
use td_driver::ControlPlane;
use td_executor::MockScript;
use tokio_util::sync::CancellationToken;

use super::prelude::build_driver;

/// Scenario 3 (spec §8): a driver restart is simulated by constructing a
/// fresh `Driver` over the same on-disk state rather than reaching into the
/// original driver's registry, since a real restart never has that access
/// either.
#[tokio::test]
async fn recover_reattaches_a_running_task_after_a_simulated_restart() {
    let dir = tempfile::tempdir().unwrap();
    let script = MockScript { run_for: Duration::from_secs(600), ..MockScript::default() };

    let first = build_driver(script.clone(), dir.path()).await;
    let spec = task_spec("tsk-e2e-recoverrestar", "recover");
    let blob = first.start_task(spec.clone()).await.unwrap();

    let already_cancelled = CancellationToken::new();
    already_cancelled.cancel();
    let detached = first.wait_task(spec.id, already_cancelled).await;
    assert!(detached.is_none(), "cancelling WaitTask must only detach the caller, not the task");

    drop(first);

    let second = build_driver(script, dir.path()).await;
    second.recover_task(blob.clone()).await.unwrap();
    second.recover_task(blob).await.unwrap();

    let snapshot = second.inspect_task(spec.id).await.unwrap();
    assert_eq!(snapshot.state, TaskState::Running);

    second.stop_task(spec.id, Duration::from_secs(2), "SIGTERM").await.unwrap();
    second.destroy_task(spec.id, true).await.unwrap();
}
