// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Generic exec variant (spec §4.7): launches the task's own command
//! directly, with no runtime selection beyond the isolation plan.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use td_core::{DriverCapabilities, DriverError, FilesystemIsolationMode, FingerprintRecord, NetworkIsolationMode, TaskSpec};
use td_executor::{ExecutorClient, ProcessExecutor, ProcessExecutorConfig};
use td_wire::{PluginConfigExec, ReattachDescriptor};

use td_driver::{CommandInvocation, DriverVariant};

/// Path to the cgroup-v2 unified hierarchy's controller file; its presence
/// is a cheap proxy for "a usable cgroup mount exists" (v1 deployments
/// mount the equivalent per-controller hierarchy instead).
const CGROUP_V2_MARKER: &str = "/sys/fs/cgroup/cgroup.controllers";
const CGROUP_V1_MARKER: &str = "/sys/fs/cgroup/memory";

pub struct ExecVariant {
    executor_binary: String,
}

impl ExecVariant {
    pub fn new(executor_binary: impl Into<String>) -> Self {
        Self { executor_binary: executor_binary.into() }
    }

    fn process_config(&self, task_dir: &Path) -> ProcessExecutorConfig {
        let mut cfg = ProcessExecutorConfig::new(self.executor_binary.clone(), task_dir.join("executor.sock"));
        cfg.log_path = task_dir.join("executor.out").to_string_lossy().into_owned();
        cfg
    }
}

#[async_trait]
impl DriverVariant for ExecVariant {
    fn name(&self) -> &'static str {
        "exec"
    }

    fn capability_descriptor(&self) -> DriverCapabilities {
        DriverCapabilities {
            signals_supported: true,
            exec_supported: true,
            filesystem_isolation: FilesystemIsolationMode::Chroot,
            network_isolation_modes: vec![NetworkIsolationMode::Host, NetworkIsolationMode::Group],
            mount_config_support: td_core::MountConfigSupport::Full,
        }
    }

    fn build_invocation(&self, spec: &TaskSpec) -> CommandInvocation {
        CommandInvocation { binary: spec.command.clone(), argv: spec.args.clone(), extra_env: Vec::new() }
    }

    fn extra_task_validation(&self, spec: &TaskSpec) -> Result<(), DriverError> {
        if spec.command.is_empty() {
            return Err(DriverError::InvalidConfig("exec variant requires a non-empty command".to_string()));
        }
        Ok(())
    }

    fn validate_plugin_config(&self, payload: &serde_json::Value) -> Result<(), DriverError> {
        if payload.is_null() {
            return Ok(());
        }
        serde_json::from_value::<PluginConfigExec>(payload.clone())
            .map(|_| ())
            .map_err(|e| DriverError::InvalidConfig(format!("invalid exec plugin config: {e}")))
    }

    async fn fingerprint_probe(&self) -> FingerprintRecord {
        if !cfg!(target_os = "linux") {
            return FingerprintRecord::undetected("generic exec driver requires Linux");
        }
        if !nix::unistd::Uid::effective().is_root() {
            return FingerprintRecord::unhealthy("generic exec driver requires root");
        }
        let has_cgroups = Path::new(CGROUP_V2_MARKER).exists() || Path::new(CGROUP_V1_MARKER).exists();
        if !has_cgroups {
            return FingerprintRecord::unhealthy("no usable cgroup mount found");
        }
        FingerprintRecord::healthy("generic exec driver ready").with_attribute("driver.exec", true)
    }

    fn new_executor(&self, task_dir: &Path) -> Arc<dyn ExecutorClient> {
        Arc::new(ProcessExecutor::new(self.process_config(task_dir)))
    }

    async fn reattach_executor(&self, task_dir: &Path, descriptor: &ReattachDescriptor) -> Result<Arc<dyn ExecutorClient>, DriverError> {
        let executor = ProcessExecutor::reattach(self.process_config(task_dir), descriptor)
            .await
            .map_err(|e| DriverError::RecoveryFailed(e.to_string()))?;
        Ok(Arc::new(executor) as Arc<dyn ExecutorClient>)
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
