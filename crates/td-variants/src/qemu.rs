// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! VM-image variant (spec §4.7): boots a disk image under an emulator
//! instead of exec'ing the task's own command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use td_core::{DriverCapabilities, DriverError, FilesystemIsolationMode, FingerprintRecord, NetworkIsolationMode, TaskId, TaskSpec};
use td_executor::{ExecutorClient, ProcessExecutor, ProcessExecutorConfig};
use td_isolation::vm::{parse_drive_interface, validate_args, validate_image_path, validate_platform_feature};
use td_wire::{PluginConfigVm, ReattachDescriptor, TaskConfigVm};

use td_driver::{CommandInvocation, DriverVariant};

const DEFAULT_DRIVE_INTERFACE: &str = "virtio";

pub struct QemuVariant {
    executor_binary: String,
    emulator_binary: String,
    image_root: PathBuf,
    operator_allowlist: Vec<PathBuf>,
    args_allowlist: Vec<String>,
    runtime_dir: PathBuf,
}

impl QemuVariant {
    pub fn new(executor_binary: impl Into<String>, emulator_binary: impl Into<String>, image_root: impl Into<PathBuf>) -> Self {
        Self {
            executor_binary: executor_binary.into(),
            emulator_binary: emulator_binary.into(),
            image_root: image_root.into(),
            operator_allowlist: Vec::new(),
            args_allowlist: Vec::new(),
            runtime_dir: PathBuf::from("/run/td-vm"),
        }
    }

    pub fn with_operator_allowlist(mut self, allowlist: Vec<PathBuf>) -> Self {
        self.operator_allowlist = allowlist;
        self
    }

    pub fn with_args_allowlist(mut self, allowlist: Vec<String>) -> Self {
        self.args_allowlist = allowlist;
        self
    }

    pub fn with_runtime_dir(mut self, runtime_dir: impl Into<PathBuf>) -> Self {
        self.runtime_dir = runtime_dir.into();
        self
    }

    /// Guest QMP monitor socket, one per task, named from the task ID so
    /// reattach never has to scan the runtime directory for it.
    fn monitor_socket_path(&self, id: TaskId) -> PathBuf {
        self.runtime_dir.join(format!("{id}-monitor.sock"))
    }

    /// Guest-agent virtio-serial socket, same naming scheme as the monitor.
    fn guest_agent_socket_path(&self, id: TaskId) -> PathBuf {
        self.runtime_dir.join(format!("{id}-guest.sock"))
    }

    fn process_config(&self, task_dir: &Path) -> ProcessExecutorConfig {
        let mut cfg = ProcessExecutorConfig::new(self.executor_binary.clone(), task_dir.join("executor.sock"));
        cfg.log_path = task_dir.join("executor.out").to_string_lossy().into_owned();
        cfg
    }

    fn task_config(spec: &TaskSpec) -> Result<TaskConfigVm, DriverError> {
        serde_json::from_value(spec.variant_config.clone()).map_err(|e| DriverError::InvalidConfig(format!("invalid vm task config: {e}")))
    }
}

#[async_trait]
impl DriverVariant for QemuVariant {
    fn name(&self) -> &'static str {
        "qemu"
    }

    fn capability_descriptor(&self) -> DriverCapabilities {
        DriverCapabilities {
            signals_supported: false,
            exec_supported: false,
            filesystem_isolation: FilesystemIsolationMode::Image,
            network_isolation_modes: vec![NetworkIsolationMode::Host],
            mount_config_support: td_core::MountConfigSupport::None,
        }
    }

    fn build_invocation(&self, spec: &TaskSpec) -> CommandInvocation {
        let cfg = Self::task_config(spec).unwrap_or_default();
        let drive_interface = if cfg.drive_interface.is_empty() { DEFAULT_DRIVE_INTERFACE } else { cfg.drive_interface.as_str() };

        let mut argv = vec!["-drive".to_string(), format!("file={},if={}", cfg.image_path, drive_interface), "-nographic".to_string()];

        if !cfg.accelerator.is_empty() {
            argv.push("-accel".to_string());
            argv.push(cfg.accelerator.clone());
        }

        let memory_mb = spec.resources.memory_bytes / (1024 * 1024);
        if memory_mb > 0 {
            argv.push("-m".to_string());
            argv.push(memory_mb.to_string());
        }

        if !cfg.port_map.is_empty() {
            let hostfwd: Vec<String> = cfg.port_map.iter().map(|(guest_port, host_port)| format!("hostfwd=tcp::{host_port}-:{guest_port}")).collect();
            argv.push("-netdev".to_string());
            argv.push(format!("user,id=net0,{}", hostfwd.join(",")));
            argv.push("-device".to_string());
            argv.push("virtio-net,netdev=net0".to_string());
        }

        if cfg.graceful_shutdown {
            argv.push("-qmp".to_string());
            argv.push(format!("unix:{},server,nowait", self.monitor_socket_path(spec.id).display()));
        }

        if cfg.guest_agent {
            argv.push("-chardev".to_string());
            argv.push(format!("socket,path={},server,nowait,id=qga0", self.guest_agent_socket_path(spec.id).display()));
            argv.push("-device".to_string());
            argv.push("virtio-serial".to_string());
            argv.push("-device".to_string());
            argv.push("virtserialport,chardev=qga0,name=org.qemu.guest_agent.0".to_string());
        }

        argv.extend(cfg.args.clone());
        CommandInvocation { binary: self.emulator_binary.clone(), argv, extra_env: Vec::new() }
    }

    fn extra_task_validation(&self, spec: &TaskSpec) -> Result<(), DriverError> {
        let cfg = Self::task_config(spec)?;
        if cfg.image_path.is_empty() {
            return Err(DriverError::InvalidConfig("vm variant requires image_path".to_string()));
        }
        let image_path = PathBuf::from(&cfg.image_path);
        validate_image_path(&image_path, &self.image_root, &self.operator_allowlist).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;

        if !cfg.drive_interface.is_empty() {
            parse_drive_interface(&cfg.drive_interface).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        }

        validate_args(&cfg.args, &self.args_allowlist).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        validate_platform_feature("graceful_shutdown", cfg.graceful_shutdown).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        validate_platform_feature("guest_agent", cfg.guest_agent).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        Ok(())
    }

    fn validate_plugin_config(&self, payload: &serde_json::Value) -> Result<(), DriverError> {
        if payload.is_null() {
            return Ok(());
        }
        serde_json::from_value::<PluginConfigVm>(payload.clone())
            .map(|_| ())
            .map_err(|e| DriverError::InvalidConfig(format!("invalid vm plugin config: {e}")))
    }

    async fn fingerprint_probe(&self) -> FingerprintRecord {
        let output = match tokio::process::Command::new(&self.emulator_binary).arg("--version").output().await {
            Ok(output) => output,
            Err(e) => return FingerprintRecord::unhealthy(format!("failed to invoke {}: {e}", self.emulator_binary)),
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.split_whitespace().nth(3) {
            Some(version) => FingerprintRecord::healthy(format!("{} {version}", self.emulator_binary)).with_attribute("vm.emulator_version", version.to_string()),
            None => FingerprintRecord::unhealthy("could not parse emulator version output"),
        }
    }

    fn new_executor(&self, task_dir: &Path) -> Arc<dyn ExecutorClient> {
        Arc::new(ProcessExecutor::new(self.process_config(task_dir)))
    }

    async fn reattach_executor(&self, task_dir: &Path, descriptor: &ReattachDescriptor) -> Result<Arc<dyn ExecutorClient>, DriverError> {
        let executor = ProcessExecutor::reattach(self.process_config(task_dir), descriptor).await.map_err(|e| DriverError::RecoveryFailed(e.to_string()))?;
        Ok(Arc::new(executor) as Arc<dyn ExecutorClient>)
    }
}

#[cfg(test)]
#[path = "qemu_tests.rs"]
mod tests;
