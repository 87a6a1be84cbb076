// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use td_core::test_support::task_spec;
use td_core::Health;

use super::*;

#[test]
fn capability_descriptor_advertises_exec_and_signals() {
    let variant = ExecVariant::new("td-executor");
    let caps = variant.capability_descriptor();
    assert!(caps.exec_supported);
    assert!(caps.signals_supported);
}

#[test]
fn build_invocation_uses_the_task_command_verbatim() {
    let variant = ExecVariant::new("td-executor");
    let mut spec = task_spec("tsk-exec-invocation00", "demo");
    spec.command = "/usr/bin/env".to_string();
    spec.args = vec!["true".to_string()];

    let invocation = variant.build_invocation(&spec);
    assert_eq!(invocation.binary, "/usr/bin/env");
    assert_eq!(invocation.argv, vec!["true".to_string()]);
}

#[test]
fn extra_task_validation_rejects_an_empty_command() {
    let variant = ExecVariant::new("td-executor");
    let mut spec = task_spec("tsk-exec-emptycmd000", "demo");
    spec.command = String::new();

    assert!(matches!(variant.extra_task_validation(&spec), Err(DriverError::InvalidConfig(_))));
}

#[test]
fn validate_plugin_config_rejects_an_unknown_pid_mode() {
    let variant = ExecVariant::new("td-executor");
    let payload = serde_json::json!({ "default_pid_mode": "other" });
    let err = variant.validate_plugin_config(&payload).unwrap_err();
    let DriverError::InvalidConfig(message) = err else { panic!("expected InvalidConfig") };
    assert!(message.contains("other"));
}

#[test]
fn validate_plugin_config_accepts_a_partial_object() {
    let variant = ExecVariant::new("td-executor");
    assert!(variant.validate_plugin_config(&serde_json::json!({"allow_caps": ["chown"]})).is_ok());
}

#[test]
fn validate_plugin_config_accepts_null() {
    let variant = ExecVariant::new("td-executor");
    assert!(variant.validate_plugin_config(&serde_json::Value::Null).is_ok());
}

#[tokio::test]
async fn fingerprint_probe_reports_the_exec_attribute_when_healthy() {
    let variant = ExecVariant::new("td-executor");
    let record = variant.fingerprint_probe().await;
    if record.health == Health::Healthy {
        assert_eq!(record.attributes.get("driver.exec").and_then(|v| match v {
            td_core::AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }), Some(true));
    }
}
