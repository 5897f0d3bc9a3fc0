use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::lookup::LookupError;

/// API error type with HTTP status code and message
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// 422 for a malformed code, 404 for any directory failure, 500 for the
/// weather stage with the cause appended to the message.
impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        let status = match err {
            LookupError::InvalidCep(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LookupError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Temperature(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CepWeatherError;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(LookupError::InvalidCep(CepWeatherError::validation("x")));
        assert_eq!(err, ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode"));

        let err = ApiError::from(LookupError::LocationNotFound(CepWeatherError::upstream(
            "connection reset",
        )));
        assert_eq!(err, ApiError::new(StatusCode::NOT_FOUND, "can not find zipcode"));

        let err = ApiError::from(LookupError::Temperature(CepWeatherError::upstream(
            "status 401",
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message,
            "error getting temperature, Upstream error: status 401"
        );
    }
}
