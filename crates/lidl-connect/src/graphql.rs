// GraphQL request/response envelope
//
// The API speaks plain GraphQL-over-HTTP: a JSON `{query, operationName,
// variables}` request and a `{data, errors}` response. No schema
// introspection, no codegen -- each query decodes into its own typed
// response struct.

use serde::{Deserialize, Serialize};

/// Standard GraphQL HTTP request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    /// Required by the server when the document contains multiple
    /// named operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// Standard GraphQL response envelope.
///
/// `errors` may be present alongside partial `data`; any error entry
/// fails the whole call.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    // No `#[serde(default)]` here: on a generic field the derive would
    // demand `T: Default`, and a missing `Option` is `None` anyway.
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

/// A single entry from the envelope's `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// Join all error messages into one line, or `None` if the
    /// envelope carried no errors.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
