// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::Json;

use super::*;

#[test]
fn http_status_mapping() {
    assert_eq!(ErrorCode::BadRequest.http_status(), 400);
    assert_eq!(ErrorCode::Unauthorized.http_status(), 401);
    assert_eq!(ErrorCode::Conflict.http_status(), 409);
    assert_eq!(ErrorCode::Terminated.http_status(), 503);
    assert_eq!(ErrorCode::Internal.http_status(), 500);
}

#[test]
fn as_str_is_stable() {
    assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
    assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
    assert_eq!(ErrorCode::Terminated.as_str(), "TERMINATED");
}

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::Internal.to_string(), "INTERNAL");
}

#[test]
fn to_error_body_carries_message() {
    let body = ErrorCode::BadRequest.to_error_body("content must not be empty");
    assert_eq!(body.code, "BAD_REQUEST");
    assert_eq!(body.message, "content must not be empty");
}

#[test]
fn to_http_response_status_matches() {
    let (status, Json(resp)) = ErrorCode::Unauthorized.to_http_response("missing token");
    assert_eq!(status.as_u16(), 401);
    assert_eq!(resp.error.code, "UNAUTHORIZED");
    assert_eq!(resp.error.message, "missing token");
}
