// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use td_core::test_support::task_spec;
use td_core::DriverError;
use td_wire::TaskConfigJvm;

use super::*;

fn jvm_spec(id: &str, cfg: TaskConfigJvm) -> td_core::TaskSpec {
    let mut spec = task_spec(id, "demo");
    spec.variant_config = serde_json::to_value(cfg).unwrap();
    spec
}

#[test]
fn build_invocation_prepends_options_and_classpath_before_args() {
    let variant = JvmVariant::new("td-executor");
    let cfg = TaskConfigJvm {
        class_path: Some("/opt/app/lib".to_string()),
        jar_path: Some("/opt/app/app.jar".to_string()),
        jvm_options: vec!["-Xmx512m".to_string()],
        args: vec!["--serve".to_string()],
        ..Default::default()
    };
    let spec = jvm_spec("tsk-jvm-invocation000", cfg);

    let invocation = variant.build_invocation(&spec);
    assert_eq!(invocation.binary, "java");
    assert_eq!(invocation.argv, vec!["-Xmx512m", "-cp", "/opt/app/lib", "-jar", "/opt/app/app.jar", "--serve"]);
}

#[test]
fn build_invocation_falls_back_to_class_when_no_jar() {
    let variant = JvmVariant::new("td-executor");
    let cfg = TaskConfigJvm { class: Some("com.example.Main".to_string()), ..Default::default() };
    let spec = jvm_spec("tsk-jvm-classonly0000", cfg);

    let invocation = variant.build_invocation(&spec);
    assert_eq!(invocation.argv, vec!["com.example.Main"]);
}

#[test]
fn extra_task_validation_rejects_missing_entry_point() {
    let variant = JvmVariant::new("td-executor");
    let spec = jvm_spec("tsk-jvm-noentrypoint0", TaskConfigJvm::default());

    assert!(matches!(variant.extra_task_validation(&spec), Err(DriverError::InvalidConfig(_))));
}

#[test]
fn extra_task_validation_accepts_a_jar_path() {
    let variant = JvmVariant::new("td-executor");
    let cfg = TaskConfigJvm { jar_path: Some("/opt/app.jar".to_string()), ..Default::default() };
    let spec = jvm_spec("tsk-jvm-hasjarpath000", cfg);

    assert!(variant.extra_task_validation(&spec).is_ok());
}

#[test]
fn validate_plugin_config_rejects_an_unknown_ipc_mode() {
    let variant = JvmVariant::new("td-executor");
    let err = variant.validate_plugin_config(&serde_json::json!({ "default_ipc_mode": "shared" })).unwrap_err();
    let DriverError::InvalidConfig(message) = err else { panic!("expected InvalidConfig") };
    assert!(message.contains("shared"));
}

#[test]
fn parse_java_version_reads_the_quoted_version_token() {
    let stderr = "openjdk version \"21.0.1\" 2023-10-17\nOpenJDK Runtime Environment (build 21.0.1+12)\nOpenJDK 64-Bit Server VM (build 21.0.1+12, mixed mode)\n";
    let parsed = parse_java_version(stderr);
    assert_eq!(parsed, Some(("21.0.1".to_string(), "OpenJDK Runtime Environment (build 21.0.1+12)".to_string(), "OpenJDK 64-Bit Server VM (build 21.0.1+12, mixed mode)".to_string())));
}

#[test]
fn parse_java_version_rejects_truncated_output() {
    assert_eq!(parse_java_version("openjdk version \"21.0.1\""), None);
}
