// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use std::time::Duration;

use td_core::test_support::task_spec;
use td_core::TaskState;
use td_driver::ControlPlane;
use td_executor::MockScript;
use tokio_util::sync::CancellationToken;

use super::prelude::build_driver;

#[tokio::test]
async fn echo_and_exit_reports_success_and_destroys_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let script = MockScript { exit_code: 0, run_for: Duration::from_millis(5), ..MockScript::default() };
    let driver = build_driver(script, dir.path()).await;
    let spec = task_spec("tsk-e2e-echoandexit00", "echo-and-exit");

    driver.start_task(spec.clone()).await.unwrap();
    let result = driver.wait_task(spec.id, CancellationToken::new()).await.unwrap();
    assert_eq!(result.exit_code, Some(0));

    driver.destroy_task(spec.id, false).await.unwrap();
    let err = driver.inspect_task(spec.id).await.unwrap_err();
    assert!(matches!(err, td_core::DriverError::TaskNotFound(_)));
}

#[tokio::test]
async fn stop_with_grace_yields_a_non_successful_exit() {
    let dir = tempfile::tempdir().unwrap();
    let script = MockScript { run_for: Duration::from_secs(600), ..MockScript::default() };
    let driver = build_driver(script, dir.path()).await;
    let spec = task_spec("tsk-e2e-stopwithgrace", "stop-with-grace");

    driver.start_task(spec.clone()).await.unwrap();
    let snapshot = driver.inspect_task(spec.id).await.unwrap();
    assert_eq!(snapshot.state, TaskState::Running);

    driver.stop_task(spec.id, Duration::from_secs(2), "SIGINT").await.unwrap();
    let result = driver.wait_task(spec.id, CancellationToken::new()).await.unwrap();
    assert!(result.exit_code.is_none() || result.exit_code != Some(0));

    let done = tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            if driver.inspect_task(spec.id).await.unwrap().state == TaskState::Exited {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(done.is_ok(), "task should reach Exited after stop_task");

    driver.destroy_task(spec.id, false).await.unwrap();
}
