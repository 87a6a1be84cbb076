// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;
use td_core::task::DnsOptions;
use td_core::TaskSpecBuilder;

fn inputs() -> PlanInputs {
    PlanInputs {
        default_pid_mode: PidMode::Private,
        default_ipc_mode: IpcMode::Private,
        capability_defaults: vec!["chown".to_string(), "kill".to_string()],
        capability_allow_list: vec!["chown".to_string(), "kill".to_string()],
        filesystem_isolation: FilesystemIsolationMode::Chroot,
        resolv_conf_host_path: "/var/lib/alloc/abc/resolv.conf".to_string(),
    }
}

#[test]
fn task_pid_mode_overrides_plugin_default() {
    let task = TaskSpecBuilder::default().build();
    let resolved = plan(&task, &inputs()).unwrap();
    assert_eq!(resolved.pid_mode, PidMode::Private);

    let mut overridden = TaskSpecBuilder::default().build();
    overridden.isolation.pid_mode = Some(PidMode::Host);
    let resolved = plan(&overridden, &inputs()).unwrap();
    assert_eq!(resolved.pid_mode, PidMode::Host);
}

#[test]
fn no_dns_options_means_no_extra_mount() {
    let task = TaskSpecBuilder::default().build();
    let resolved = plan(&task, &inputs()).unwrap();
    assert!(resolved.extra_mount.is_none());
}

#[test]
fn dns_options_add_resolv_conf_mount() {
    let mut task = TaskSpecBuilder::default().build();
    task.dns = DnsOptions { servers: vec!["1.1.1.1".to_string()], searches: vec![], options: vec![] };
    let resolved = plan(&task, &inputs()).unwrap();
    let mount = resolved.extra_mount.unwrap();
    assert_eq!(mount.task_path, "/etc/resolv.conf");
}

#[test]
fn no_pivot_root_forces_chroot() {
    let mut task = TaskSpecBuilder::default().build();
    task.isolation.no_pivot_root = true;
    let resolved = plan(&task, &PlanInputs { filesystem_isolation: FilesystemIsolationMode::None, ..inputs() }).unwrap();
    assert_eq!(resolved.filesystem_isolation, FilesystemIsolationMode::Chroot);
    assert!(resolved.no_pivot_root);
}

#[test]
fn unknown_capability_propagates_as_isolation_error() {
    let mut task = TaskSpecBuilder::default().build();
    task.isolation.cap_add = vec!["bogus".to_string()];
    let err = plan(&task, &inputs()).unwrap_err();
    assert!(matches!(err, IsolationError::Capability(_)));
}
