//! Response status checks and edge extraction.

use partnertap_types::{Result, TapError};
use reqwest::StatusCode;
use serde_json::Value;

use crate::RawResponse;

/// Validates a response and takes the array of raw edges out of it.
///
/// Every edge must be an object, as must its `node` when present. An empty
/// `edges` array is a valid quiet day.
///
/// # Errors
///
/// Returns [`TapError::Transport`] for a non-2xx status and
/// [`TapError::ResponseShape`] if the body is not JSON, has nothing
/// array-shaped at `pointer`, or holds a non-object edge.
pub fn parse_edges(day: &str, pointer: &str, response: &RawResponse) -> Result<Vec<Value>> {
    if !response.is_success() {
        let reason = StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        return Err(TapError::Transport {
            day: day.to_string(),
            status: Some(response.status),
            message: format!("HTTP {} {reason}", response.status)
                .trim_end()
                .to_string(),
        });
    }

    let mut body: Value =
        serde_json::from_slice(&response.body).map_err(|e| TapError::ResponseShape {
            day: day.to_string(),
            message: format!("invalid JSON body: {e}"),
        })?;

    let edges = match body.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(edges)) => edges,
        Some(other) => {
            return Err(TapError::ResponseShape {
                day: day.to_string(),
                message: format!("expected an array at {pointer}, found {}", type_name(&other)),
            });
        }
        None => {
            return Err(TapError::ResponseShape {
                day: day.to_string(),
                message: graphql_errors(&body).map_or_else(
                    || format!("missing {pointer}"),
                    |e| format!("missing {pointer}: {e}"),
                ),
            });
        }
    };

    let bad = edges
        .iter()
        .enumerate()
        .find_map(|(index, edge)| malformed(edge).map(|found| (index, found)));
    if let Some((index, found)) = bad {
        return Err(TapError::ResponseShape {
            day: day.to_string(),
            message: format!("expected an object at {pointer}/{index}, found {found}"),
        });
    }

    Ok(edges)
}

/// Describes an edge that is not a mapping, or whose `node` is not one.
fn malformed(edge: &Value) -> Option<&'static str> {
    if !edge.is_object() {
        return Some(type_name(edge));
    }
    edge.get("node").filter(|node| !node.is_object()).map(type_name)
}

/// Joins the `errors[].message` entries of a GraphQL error payload.
fn graphql_errors(body: &Value) -> Option<String> {
    let messages: Vec<&str> = body
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
