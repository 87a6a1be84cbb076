// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;
use td_core::test_support::task_spec;
use td_wire::ReattachDescriptor;

fn sample_blob() -> TaskHandleBlob {
    let spec = task_spec("tsk-store-test00000000", "demo");
    TaskHandleBlob::new(
        ReattachDescriptor { network_address: "unix:///tmp/x.sock".to_string(), protocol_version: 1, auth_cookie: "c".to_string(), pid: 1 },
        spec,
        1,
        0,
    )
}

#[tokio::test]
async fn save_then_delete_round_trips_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHandleStore::new(dir.path().to_path_buf());
    let blob = sample_blob();

    store.save(&blob).await.unwrap();
    let path = dir.path().join(format!("{}.json", blob.task_spec.id));
    assert!(path.exists());

    store.delete(blob.task_spec.id).await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn delete_of_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHandleStore::new(dir.path().to_path_buf());
    store.delete(td_core::TaskId::from_string("tsk-missing")).await.unwrap();
}
