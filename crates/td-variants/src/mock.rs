// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

//! Synthetic mock variant (spec §4.7): replaces the executor with an
//! in-process supervision task that writes scripted stdout/stderr, honours
//! a run-for duration, and can simulate an unprompted plugin shutdown.
//! Used by integration tests and by operators bring-up testing a new
//! driver frame without a real runtime.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use td_core::{DriverCapabilities, DriverError, FilesystemIsolationMode, FingerprintRecord, NetworkIsolationMode, TaskSpec};
use td_executor::{ExecutorClient, MockExecutor, MockScript};
use td_wire::ReattachDescriptor;

use td_driver::{CommandInvocation, DriverVariant};

/// Mock driver variant. Every task it launches runs the same scripted
/// behavior, configured once at construction rather than per task: this
/// variant exists to exercise the driver frame, not to model a workload.
pub struct MockVariant {
    script: MockScript,
}

impl MockVariant {
    pub fn new(script: MockScript) -> Self {
        Self { script }
    }
}

impl Default for MockVariant {
    fn default() -> Self {
        Self::new(MockScript::default())
    }
}

#[async_trait]
impl DriverVariant for MockVariant {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capability_descriptor(&self) -> DriverCapabilities {
        DriverCapabilities {
            signals_supported: true,
            exec_supported: true,
            filesystem_isolation: FilesystemIsolationMode::None,
            network_isolation_modes: vec![NetworkIsolationMode::Host, NetworkIsolationMode::Group],
            mount_config_support: td_core::MountConfigSupport::Full,
        }
    }

    fn build_invocation(&self, spec: &TaskSpec) -> CommandInvocation {
        CommandInvocation { binary: spec.command.clone(), argv: spec.args.clone(), extra_env: Vec::new() }
    }

    fn extra_task_validation(&self, _spec: &TaskSpec) -> Result<(), DriverError> {
        Ok(())
    }

    fn validate_plugin_config(&self, _payload: &serde_json::Value) -> Result<(), DriverError> {
        Ok(())
    }

    async fn fingerprint_probe(&self) -> FingerprintRecord {
        FingerprintRecord::healthy("mock driver always reports healthy").with_attribute("driver.mock", true)
    }

    fn new_executor(&self, _task_dir: &Path) -> Arc<dyn ExecutorClient> {
        Arc::new(MockExecutor::new(self.script.clone()))
    }

    async fn reattach_executor(&self, _task_dir: &Path, _descriptor: &ReattachDescriptor) -> Result<Arc<dyn ExecutorClient>, DriverError> {
        Ok(Arc::new(MockExecutor::new(self.script.clone())))
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
