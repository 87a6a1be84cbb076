// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn default_working_user_is_nobody_for_chroot_drivers() {
    let cmd = ExecCommand {
        binary: "/bin/true".to_string(),
        argv: vec![],
        env: vec![],
        working_user: "nobody".to_string(),
        resources: ResourceRequest::default(),
        stdout_path: "/dev/null".to_string(),
        stderr_path: "/dev/null".to_string(),
        mounts: vec![],
        devices: vec![],
        network_isolation: NetworkIsolationMode::Host,
        pid_mode: PidMode::Private,
        ipc_mode: IpcMode::Private,
        capabilities: vec![],
        no_pivot_root: false,
    };
    assert_eq!(cmd.working_user, "nobody");
}
