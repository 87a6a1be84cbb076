// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Shared scaffolding for the end-to-end driver scenarios (spec §8). Every
//! scenario drives a `Driver<MockVariant, FakeClock>` through `ControlPlane`
//! exactly as a real control-plane transport would; the mock variant stands
//! in for a real executor process, which lives outside this workspace.

use std::path::Path;
use std::sync::Arc;

use td_core::{FakeClock, FilesystemIsolationMode, IpcMode, PidMode};
use td_driver::{Driver, HandleStore, LaunchConfig};
use td_executor::MockScript;
use td_variants::MockVariant;
use td_wire::PluginDescriptor;

pub fn plan_inputs() -> td_isolation::PlanInputs {
    td_isolation::PlanInputs {
        default_pid_mode: PidMode::Private,
        default_ipc_mode: IpcMode::Private,
        capability_defaults: vec!["chown".to_string(), "net_bind_service".to_string()],
        capability_allow_list: vec!["chown".to_string(), "net_bind_service".to_string()],
        filesystem_isolation: FilesystemIsolationMode::Chroot,
        resolv_conf_host_path: "/etc/resolv.conf".to_string(),
    }
}

pub async fn build_driver(script: MockScript, dir: &Path) -> Driver<MockVariant, FakeClock> {
    let launch_cfg = LaunchConfig { plan_inputs: plan_inputs(), state_dir: dir.to_path_buf() };
    let store: Arc<dyn HandleStore> = Arc::new(td_driver::FileHandleStore::new(dir.join("handles")));
    Driver::with_defaults(
        Arc::new(MockVariant::new(script)),
        PluginDescriptor { name: "mock".to_string(), version: "0.2.0".to_string(), protocol_version: 1 },
        serde_json::json!({}),
        serde_json::json!({}),
        launch_cfg,
        store,
        FakeClock::new(),
    )
    .await
}
