//! Extraction strategies for unstable VC backend response shapes
//!
//! The VC backend has returned its login token and startup list in several
//! shapes over time. Rather than branch inline, each known shape is an
//! ordered, named strategy tried in sequence; exhaustion returns `None`
//! and the caller decides what degraded mode looks like.

use serde_json::Value;
use tracing::debug;

use crate::domain::StartupSummary;

type TokenStrategy = fn(&Value) -> Option<String>;

/// Known login-response shapes, most common first.
const LOGIN_TOKEN_STRATEGIES: &[(&str, TokenStrategy)] = &[
    ("token_field", |v| field_string(v, "token")),
    ("access_token_field", |v| field_string(v, "access_token")),
    ("accessToken_field", |v| field_string(v, "accessToken")),
    ("raw_string_body", |v| v.as_str().map(String::from)),
];

/// Wrapper fields the startup list has been observed under.
const STARTUP_WRAPPER_FIELDS: &[&str] = &["data", "results", "items", "startups"];

fn field_string(value: &Value, field: &str) -> Option<String> {
    value.get(field)?.as_str().map(String::from)
}

/// Pull a bearer token out of a login response body.
///
/// Returns `None` when no strategy recognizes the shape; the router layer
/// owns the fallback behavior.
pub fn extract_login_token(body: &Value) -> Option<String> {
    for (name, strategy) in LOGIN_TOKEN_STRATEGIES {
        if let Some(token) = strategy(body) {
            debug!(strategy = name, "Extracted login token");
            return Some(token);
        }
    }
    None
}

/// Pull the startup list out of a listing response body.
///
/// Accepts a bare array or an object wrapping the array under one of the
/// known fields.
pub fn extract_startup_list(body: &Value) -> Option<Vec<StartupSummary>> {
    if let Some(list) = parse_summaries(body) {
        debug!(strategy = "bare_array", "Extracted startup list");
        return Some(list);
    }
    for field in STARTUP_WRAPPER_FIELDS {
        if let Some(list) = body.get(field).and_then(parse_summaries) {
            debug!(strategy = field, "Extracted startup list");
            return Some(list);
        }
    }
    None
}

fn parse_summaries(value: &Value) -> Option<Vec<StartupSummary>> {
    if !value.is_array() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
