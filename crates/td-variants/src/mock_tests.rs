// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use std::path::Path;
use std::time::Duration;

use td_core::{Health, IpcMode, NetworkIsolationMode, PidMode, ResourceRequest};
use td_executor::ExecCommand;

use super::*;

fn exec_command() -> ExecCommand {
    ExecCommand {
        binary: "/bin/true".to_string(),
        argv: Vec::new(),
        env: Vec::new(),
        working_user: "nobody".to_string(),
        resources: ResourceRequest::default(),
        stdout_path: "/dev/null".to_string(),
        stderr_path: "/dev/null".to_string(),
        mounts: Vec::new(),
        devices: Vec::new(),
        network_isolation: NetworkIsolationMode::Host,
        pid_mode: PidMode::Private,
        ipc_mode: IpcMode::Private,
        capabilities: Vec::new(),
        no_pivot_root: false,
    }
}

#[test]
fn capability_descriptor_advertises_no_filesystem_isolation() {
    let variant = MockVariant::default();
    let caps = variant.capability_descriptor();
    assert_eq!(caps.filesystem_isolation, FilesystemIsolationMode::None);
}

#[tokio::test]
async fn fingerprint_probe_is_always_healthy() {
    let variant = MockVariant::default();
    let record = variant.fingerprint_probe().await;
    assert_eq!(record.health, Health::Healthy);
}

#[tokio::test]
async fn new_executor_honours_the_scripted_run_for_duration() {
    let variant = MockVariant::new(MockScript { run_for: Duration::from_millis(5), exit_code: 7, ..MockScript::default() });
    let executor = variant.new_executor(Path::new("/tmp"));
    executor.launch(exec_command()).await.unwrap();
    let result = executor.wait().await.unwrap();
    assert_eq!(result.exit_code, Some(7));
}

#[tokio::test]
async fn reattach_executor_produces_a_fresh_scripted_run() {
    let variant = MockVariant::new(MockScript { exit_code: 3, ..MockScript::default() });
    let descriptor = td_wire::ReattachDescriptor { network_address: "mock://x".to_string(), protocol_version: 1, auth_cookie: "x".to_string(), pid: 0 };
    let executor = variant.reattach_executor(Path::new("/tmp"), &descriptor).await.unwrap();
    executor.launch(exec_command()).await.unwrap();
    let result = executor.wait().await.unwrap();
    assert_eq!(result.exit_code, Some(3));
}
