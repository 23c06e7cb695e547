//! GraphQL wire types
//!
//! Request body `{query, variables}` and response envelope `{data, errors}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ContentError;

/// Outgoing GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

/// One entry of a response's `errors` list, passed through unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

impl From<ContentError> for GraphQlError {
    fn from(err: ContentError) -> Self {
        Self::from_message(err.to_string())
    }
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// What a response carried once decoded
#[derive(Debug, PartialEq)]
pub enum QueryOutcome<T> {
    Data(T),
    Errors(Vec<GraphQlError>),
}

impl<T> GraphQlResponse<T> {
    /// An `errors` field wins over `data`, even when empty.
    /// A response with neither is malformed.
    pub fn into_outcome(self) -> Result<QueryOutcome<T>, ContentError> {
        match (self.errors, self.data) {
            (Some(errors), _) => Ok(QueryOutcome::Errors(errors)),
            (None, Some(data)) => Ok(QueryOutcome::Data(data)),
            (None, None) => Err(ContentError::Malformed(
                "response has neither data nor errors".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        pong: bool,
    }

    fn decode(value: Value) -> Result<QueryOutcome<Ping>, ContentError> {
        serde_json::from_value::<GraphQlResponse<Ping>>(value)
            .unwrap()
            .into_outcome()
    }

    #[test]
    fn test_data_outcome() {
        let outcome = decode(json!({"data": {"pong": true}})).unwrap();
        assert_eq!(outcome, QueryOutcome::Data(Ping { pong: true }));
    }

    #[test]
    fn test_errors_win_over_data() {
        let outcome = decode(json!({
            "data": {"pong": true},
            "errors": [{"message": "boom", "path": ["ping"]}]
        }))
        .unwrap();
        let QueryOutcome::Errors(errors) = outcome else {
            panic!("expected errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "boom");
        assert_eq!(errors[0].path, Some(json!(["ping"])));
    }

    #[test]
    fn test_missing_data_and_errors_is_malformed() {
        let err = decode(json!({})).unwrap_err();
        assert!(matches!(err, ContentError::Malformed(_)));
    }

    #[test]
    fn test_error_passthrough_serialization() {
        let raw = json!({"message": "not allowed", "extensions": {"code": "FORBIDDEN"}});
        let err: GraphQlError = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&err).unwrap(), raw);
    }

    #[test]
    fn test_request_body_shape() {
        let req = GraphQlRequest {
            query: "query { ping }",
            variables: json!({"slug": "x"}),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "query { ping }", "variables": {"slug": "x"}})
        );
    }
}
