//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a JSON error body `{"status": .., "error": ..}`
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert_eq!(json["error"].as_str(), Some(message), "Full response: {json}");
}

/// Assert the body is packed panel codes of `bytes` bytes
pub fn assert_panel_codes(response: &TestResponse, bytes: usize) {
    assert_ok(response);
    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    let text = response.text();
    assert!(text.ends_with("};\n"), "Missing terminator: {text:?}");
    let count = text
        .trim_end()
        .trim_end_matches("};")
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .count();
    assert_eq!(count, bytes, "Unexpected byte count in {text:?}");
}
