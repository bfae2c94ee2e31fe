//! Wire models for the HTTP layer

use serde::{Deserialize, Serialize};

/// Error body returned by validation and lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: bool,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

/// Body of `POST /api/v1/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub lat: f64,
    pub long: f64,
    pub question_text: String,
}

/// Body of `POST /api/v1/cameras/nearest`.
#[derive(Debug, Clone, Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub long: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_shape() {
        let err = ApiError::new("Missing required fields: lat, long");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "Missing required fields: lat, long");
    }

    #[test]
    fn test_query_request_parses() {
        let json = r#"{"lat": 55.6761, "long": 12.5683, "question_text": "Where is the exit?"}"#;
        let request: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.lat, 55.6761);
        assert_eq!(request.question_text, "Where is the exit?");
    }

    #[test]
    fn test_query_request_rejects_missing_fields() {
        let json = r#"{"lat": 55.6761}"#;
        assert!(serde_json::from_str::<QueryRequest>(json).is_err());
    }
}
