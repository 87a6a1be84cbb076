// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;
use td_core::capability::NetworkIsolationMode;
use td_core::task::ResourceRequest;
use tokio::net::UnixListener;

fn sample_command() -> ExecCommand {
    ExecCommand {
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
        pid_mode: td_core::PidMode::Private,
        ipc_mode: td_core::IpcMode::Private,
        capabilities: vec![],
        no_pivot_root: false,
    }
}

#[tokio::test]
async fn launch_connects_and_completes_handshake() {
    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("executor.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _req: ExecutorRequest = read_json(&mut stream).await.unwrap();
        let descriptor = ReattachDescriptor {
            network_address: socket_path.display().to_string(),
            protocol_version: 1,
            auth_cookie: "cookie".to_string(),
            pid: 123,
        };
        write_json(&mut stream, &ExecutorResponse::Reattach { descriptor }).await.unwrap();
    });

    let mut config = ProcessExecutorConfig::new("/bin/true", dir.path().join("executor.sock"));
    config.ready_poll_ms = 5;
    config.ready_max_attempts = 50;
    let executor = ProcessExecutor::new(config);

    let descriptor = executor.launch(sample_command()).await.unwrap();
    assert_eq!(descriptor.pid, 123);
    server.await.unwrap();
}

#[tokio::test]
async fn kill_without_launch_is_a_no_op() {
    let config = ProcessExecutorConfig::new("/bin/true", PathBuf::from("/tmp/does-not-exist.sock"));
    let executor = ProcessExecutor::new(config);
    assert!(executor.kill().await.is_ok());
}
