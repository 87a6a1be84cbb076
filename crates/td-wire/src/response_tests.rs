// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Task Driver Contributors

use super::*;

#[test]
fn error_response_round_trips() {
    let resp = Response::Error { kind: "task_not_found".to_string(), message: "tsk-abc".to_string() };
    let json = serde_json::to_string(&resp).unwrap();
    let decoded: Response = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, resp);
}

#[test]
fn ok_response_has_no_extra_fields() {
    let json = serde_json::to_value(Response::Ok).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "Ok" }));
}
