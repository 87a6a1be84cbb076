// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;
use td_core::TaskSpecBuilder;

fn sample_spec() -> TaskSpec {
    TaskSpecBuilder::default().name("demo").build()
}

#[test]
fn round_trips_current_version() {
    let blob = TaskHandleBlob::new(
        ReattachDescriptor {
            network_address: "127.0.0.1:9000".to_string(),
            protocol_version: 1,
            auth_cookie: "secret".to_string(),
            pid: 4242,
        },
        sample_spec(),
        4242,
        1_000_000,
    );
    let bytes = serde_json::to_vec(&blob).unwrap();
    let decoded = decode_blob(&bytes).unwrap();
    assert_eq!(decoded, blob);
}

#[test]
fn legacy_v0_blob_decodes_through_compatibility_path() {
    let legacy = serde_json::json!({
        "version": 0,
        "reattach_address": "127.0.0.1:7000",
        "auth_cookie": "cookie",
        "task_id": "tsk-legacy0000000000000",
        "pid": 99,
        "started_at_ms": 500,
    });
    let blob = decode_blob(&serde_json::to_vec(&legacy).unwrap()).unwrap();
    assert_eq!(blob.version, HANDLE_BLOB_VERSION);
    assert_eq!(blob.reattach.network_address, "127.0.0.1:7000");
    assert_eq!(blob.reattach.protocol_version, 0);
    assert_eq!(blob.pid, 99);
    assert_eq!(blob.task_spec.id.as_str(), "tsk-legacy0000000000000");
}

#[test]
fn unknown_version_is_rejected() {
    let unknown = serde_json::json!({ "version": 7 });
    let err = decode_blob(&serde_json::to_vec(&unknown).unwrap()).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownVersion(7)));
}
