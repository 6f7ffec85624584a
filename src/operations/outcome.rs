use crate::client::RedditClientError;
use log::error;
use serde::Serialize;

/// Broad category of a failed tool call
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Unauthorized,
    Network,
    Upstream,
    Parse,
}

/// Structured error handed back to the caller instead of an empty result
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RedditClientError> for ToolError {
    fn from(err: &RedditClientError) -> Self {
        let kind = match err {
            RedditClientError::RequestError(_) => ErrorKind::Network,
            RedditClientError::ApiError(_) => ErrorKind::Upstream,
            RedditClientError::ParseError(_) => ErrorKind::Parse,
            RedditClientError::NotFound(_) => ErrorKind::NotFound,
            RedditClientError::Unauthorized(_) => ErrorKind::Unauthorized,
            RedditClientError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result of one tool call, as seen by the caller
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome<T> {
    Ok { data: T },
    Error { error: ToolError },
}

impl<T: Serialize> ToolOutcome<T> {
    /// Convert an operation result, logging failures under the tool's name
    pub fn from_result(tool: &str, result: Result<T, RedditClientError>) -> Self {
        match result {
            Ok(data) => ToolOutcome::Ok { data },
            Err(err) => {
                error!("{} failed: {}", tool, err);
                ToolOutcome::Error {
                    error: ToolError::from(&err),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ToolOutcome::Ok { .. })
    }

    /// Pretty JSON for tool content and CLI output
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","error":{{"kind":"parse","message":"failed to serialize result: {}"}}}}"#,
                e
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_outcome_wraps_data() {
        let outcome = ToolOutcome::from_result("demo", Ok(vec![1, 2, 3]));
        assert!(outcome.is_ok());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "ok", "data": [1, 2, 3]})
        );
    }

    #[test]
    fn error_outcome_carries_kind_and_message() {
        let outcome: ToolOutcome<Vec<u8>> = ToolOutcome::from_result(
            "demo",
            Err(RedditClientError::NotFound("r/nope".to_string())),
        );
        assert!(!outcome.is_ok());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "error",
                "error": {"kind": "not_found", "message": "Not found: r/nope"}
            })
        );
    }

    #[test]
    fn to_json_round_trips_through_serde() {
        let outcome: ToolOutcome<&str> = ToolOutcome::Error {
            error: ToolError {
                kind: ErrorKind::InvalidArgument,
                message: "bad".to_string(),
            },
        };
        let value: serde_json::Value = serde_json::from_str(&outcome.to_json()).unwrap();
        assert_eq!(value["error"]["kind"], "invalid_argument");
    }
}
