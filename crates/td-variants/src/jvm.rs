// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! JVM variant (spec §4.7): runs a jar or class inside a JVM, with
//! JVM options and classpath prepended ahead of the user's own arguments.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use td_core::{DriverCapabilities, DriverError, FilesystemIsolationMode, FingerprintRecord, NetworkIsolationMode, TaskSpec};
use td_executor::{ExecutorClient, ProcessExecutor, ProcessExecutorConfig};
use td_wire::{PluginConfigJvm, ReattachDescriptor, TaskConfigJvm};

use td_driver::{CommandInvocation, DriverVariant};

const CGROUP_V2_MARKER: &str = "/sys/fs/cgroup/cgroup.controllers";
const CGROUP_V1_MARKER: &str = "/sys/fs/cgroup/memory";

pub struct JvmVariant {
    executor_binary: String,
    java_binary: String,
}

impl JvmVariant {
    pub fn new(executor_binary: impl Into<String>) -> Self {
        Self { executor_binary: executor_binary.into(), java_binary: "java".to_string() }
    }

    pub fn with_java_binary(mut self, java_binary: impl Into<String>) -> Self {
        self.java_binary = java_binary.into();
        self
    }

    fn process_config(&self, task_dir: &Path) -> ProcessExecutorConfig {
        let mut cfg = ProcessExecutorConfig::new(self.executor_binary.clone(), task_dir.join("executor.sock"));
        cfg.log_path = task_dir.join("executor.out").to_string_lossy().into_owned();
        cfg
    }

    fn task_config(spec: &TaskSpec) -> Result<TaskConfigJvm, DriverError> {
        serde_json::from_value(spec.variant_config.clone())
            .map_err(|e| DriverError::InvalidConfig(format!("invalid jvm task config: {e}")))
    }
}

/// Parses `java -version`'s three-line stderr block:
/// `openjdk version "21.0.1" 2023-10-17`, a runtime line, and a VM line.
fn parse_java_version(stderr: &str) -> Option<(String, String, String)> {
    let mut lines = stderr.lines();
    let version_line = lines.next()?;
    let runtime_line = lines.next()?;
    let vm_line = lines.next()?;
    let start = version_line.find('"')?;
    let rest = &version_line[start + 1..];
    let end = rest.find('"')?;
    Some((rest[..end].to_string(), runtime_line.trim().to_string(), vm_line.trim().to_string()))
}

#[async_trait]
impl DriverVariant for JvmVariant {
    fn name(&self) -> &'static str {
        "jvm"
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
        let cfg = Self::task_config(spec).unwrap_or_default();
        let mut argv = cfg.jvm_options.clone();
        if let Some(class_path) = &cfg.class_path {
            argv.push("-cp".to_string());
            argv.push(class_path.clone());
        }
        if let Some(jar) = &cfg.jar_path {
            argv.push("-jar".to_string());
            argv.push(jar.clone());
        } else if let Some(class) = &cfg.class {
            argv.push(class.clone());
        }
        argv.extend(cfg.args.clone());
        CommandInvocation { binary: self.java_binary.clone(), argv, extra_env: Vec::new() }
    }

    fn extra_task_validation(&self, spec: &TaskSpec) -> Result<(), DriverError> {
        let cfg = Self::task_config(spec)?;
        if !cfg.has_entry_point() {
            return Err(DriverError::InvalidConfig("jvm variant requires class or jar_path".to_string()));
        }
        Ok(())
    }

    fn validate_plugin_config(&self, payload: &serde_json::Value) -> Result<(), DriverError> {
        if payload.is_null() {
            return Ok(());
        }
        serde_json::from_value::<PluginConfigJvm>(payload.clone())
            .map(|_| ())
            .map_err(|e| DriverError::InvalidConfig(format!("invalid jvm plugin config: {e}")))
    }

    async fn fingerprint_probe(&self) -> FingerprintRecord {
        if cfg!(target_os = "linux") {
            if !nix::unistd::Uid::effective().is_root() {
                return FingerprintRecord::unhealthy("jvm driver requires root");
            }
            let has_cgroups = Path::new(CGROUP_V2_MARKER).exists() || Path::new(CGROUP_V1_MARKER).exists();
            if !has_cgroups {
                return FingerprintRecord::unhealthy("no usable cgroup mount found");
            }
        } else if !cfg!(target_os = "macos") {
            return FingerprintRecord::undetected("jvm driver supports Linux and macOS only");
        }

        let output = match tokio::process::Command::new(&self.java_binary).arg("-version").output().await {
            Ok(output) => output,
            Err(e) => return FingerprintRecord::unhealthy(format!("failed to invoke {}: {e}", self.java_binary)),
        };
        let stderr = String::from_utf8_lossy(&output.stderr);
        match parse_java_version(&stderr) {
            Some((version, runtime, vm)) => FingerprintRecord::healthy(format!("java {version}"))
                .with_attribute("jvm.version", version)
                .with_attribute("jvm.runtime", runtime)
                .with_attribute("jvm.vm", vm),
            None => FingerprintRecord::unhealthy("could not parse java -version output"),
        }
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
#[path = "jvm_tests.rs"]
mod tests;
