//! Shared request/response bodies for the notebook HTTP API.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /note` and `POST /search`.
///
/// Both endpoints take a single text field: the note content or the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPayload {
    pub str_data: String,
}

impl TextPayload {
    pub fn new(str_data: impl Into<String>) -> Self {
        Self {
            str_data: str_data.into(),
        }
    }
}

// =====================================================
// Response Types
// =====================================================

/// Wrapper used by the JSON endpoints: `{"result": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// =====================================================
// Service Info
// =====================================================

/// Snapshot returned by `GET /api/notes/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesInfo {
    pub notes_dir: String,
    pub results_dir: String,
    pub note_count: usize,
    pub result_count: usize,
    pub match_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_field_name() {
        let payload: TextPayload = serde_json::from_str(r#"{"str_data": "hello"}"#).unwrap();
        assert_eq!(payload.str_data, "hello");
    }

    #[test]
    fn test_result_response_shape() {
        let body = serde_json::to_value(ResultResponse::new(vec!["note/a.txt"])).unwrap();
        assert_eq!(body, serde_json::json!({ "result": ["note/a.txt"] }));
    }
}
