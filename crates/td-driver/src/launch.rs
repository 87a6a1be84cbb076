// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Launch orchestrator (spec §4.3): turns a validated task spec into a
//! running, registered, persisted supervision handle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use nix::sys::signal::Signal;

use td_core::{Clock, DriverError, TaskSpec};
use td_executor::ExecCommand;
use td_isolation::PlanInputs;
use td_wire::{ReattachDescriptor, TaskHandleBlob};

use crate::handle::SupervisionHandle;
use crate::handle_store::HandleStore;
use crate::variant::DriverVariant;

/// Plugin-level facts the orchestrator needs beyond the isolation planner's
/// own inputs: where task directories live on disk.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub plan_inputs: PlanInputs,
    pub state_dir: PathBuf,
}

/// Falls back through XDG state dir, then `$HOME/.local/state`, then `/tmp`,
/// matching how other driver plugins in this family pick a default when the
/// host process gives no explicit `state_dir`.
pub fn default_state_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("td")
}

pub struct LaunchOutcome {
    pub handle: Arc<SupervisionHandle>,
    pub blob: TaskHandleBlob,
}

fn task_dir(cfg: &LaunchConfig, spec: &TaskSpec) -> PathBuf {
    cfg.state_dir.join(spec.id.to_string())
}

/// Runs the full §4.3 sequence. On any failure after the executor has been
/// spawned, it is torn down before the error is returned (spec §9
/// "Replacing the executor-client ownership chain": the orchestrator owns
/// teardown until registry insertion succeeds).
pub async fn launch<V: DriverVariant + ?Sized, C: Clock>(
    variant: &V,
    spec: TaskSpec,
    cfg: &LaunchConfig,
    clock: &C,
    store: &dyn HandleStore,
) -> Result<LaunchOutcome, DriverError> {
    variant.extra_task_validation(&spec)?;

    let dir = task_dir(cfg, &spec);
    std::fs::create_dir_all(&dir).map_err(|e| DriverError::LaunchFailed(format!("creating task directory: {e}")))?;

    let plan = td_isolation::plan(&spec, &cfg.plan_inputs).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;

    if let Some(content) = &plan.resolv_conf_content {
        std::fs::write(&cfg.plan_inputs.resolv_conf_host_path, content)
            .map_err(|e| DriverError::LaunchFailed(format!("writing resolv.conf: {e}")))?;
    }

    let invocation = variant.build_invocation(&spec);
    let executor = variant.new_executor(&dir);

    let mut mounts = spec.mounts.clone();
    if let Some(extra) = plan.extra_mount.clone() {
        mounts.push(extra);
    }

    let mut env: Vec<(String, String)> = spec.env.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    env.extend(invocation.extra_env);

    let command = ExecCommand {
        binary: invocation.binary,
        argv: invocation.argv,
        env,
        working_user: spec.user.clone(),
        resources: spec.resources.clone(),
        stdout_path: spec.stdout_path.clone(),
        stderr_path: spec.stderr_path.clone(),
        mounts,
        devices: spec.devices.clone(),
        network_isolation: plan.network_isolation,
        pid_mode: plan.pid_mode,
        ipc_mode: plan.ipc_mode,
        capabilities: plan.capabilities,
        no_pivot_root: plan.no_pivot_root,
    };

    let descriptor = match executor.launch(command).await {
        Ok(descriptor) => descriptor,
        Err(e) => {
            let _ = executor.kill().await;
            return Err(DriverError::LaunchFailed(e.to_string()));
        }
    };

    let started_at_ms = clock.epoch_ms();
    let pid = descriptor.pid;
    let handle = SupervisionHandle::new(spec.clone(), executor.clone(), pid, started_at_ms);
    let blob = TaskHandleBlob::new(descriptor, spec, pid, started_at_ms);

    if let Err(e) = store.save(&blob).await {
        let _ = executor.shutdown(Signal::SIGTERM, Duration::from_secs(1), Signal::SIGKILL).await;
        let _ = executor.kill().await;
        return Err(DriverError::StatePersistFailed(e.to_string()));
    }

    Ok(LaunchOutcome { handle, blob })
}

/// Supervisor loop (spec §4.3): blocks on `executor.wait`, records the
/// outcome into the handle, and publishes the completion event. Runs for
/// the lifetime of the handle; cancelled only by the driver's top-level
/// shutdown token, which does not stop the workload itself (spec §5).
pub async fn supervise<C: Clock>(handle: Arc<SupervisionHandle>, clock: C, on_exit: impl FnOnce(&SupervisionHandle) + Send + 'static) {
    match handle.executor.wait().await {
        Ok(result) => handle.record_exit(result, clock.epoch_ms()),
        Err(e) => handle.record_wait_error(e.to_string(), clock.epoch_ms()),
    }
    on_exit(&handle);
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
