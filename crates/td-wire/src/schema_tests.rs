// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn plugin_config_exec_defaults_match_nomad_baseline() {
    let cfg = PluginConfigExec::default();
    assert!(!cfg.no_pivot_root);
    assert_eq!(cfg.default_pid_mode, PidMode::Private);
    assert!(cfg.allow_caps.contains(&"net_bind_service".to_string()));
}

#[test]
fn jvm_task_config_requires_class_or_jar() {
    let mut cfg = TaskConfigJvm::default();
    assert!(!cfg.has_entry_point());
    cfg.jar_path = Some("/opt/app.jar".to_string());
    assert!(cfg.has_entry_point());
}

#[test]
fn missing_fields_deserialize_to_defaults() {
    let cfg: TaskConfigExec = serde_json::from_value(serde_json::json!({ "command": "/bin/true" })).unwrap();
    assert_eq!(cfg.command, "/bin/true");
    assert!(cfg.args.is_empty());
    assert!(cfg.cap_add.is_empty());
}

#[test]
fn exec_schema_marks_command_required() {
    let schema = task_config_schema_exec();
    assert_eq!(schema["command"]["required"], true);
}

#[test]
fn vm_schema_marks_image_path_required() {
    let schema = task_config_schema_vm();
    assert_eq!(schema["image_path"]["required"], true);
}

#[test]
fn jvm_schema_lists_entry_point_fields() {
    let schema = task_config_schema_jvm();
    assert!(schema.get("class").is_some());
    assert!(schema.get("jar_path").is_some());
}
