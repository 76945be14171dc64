use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nb_core::Error;
use tracing::error;

/// Pipeline errors rendered as `{"error": "..."}` with a status matching the cause.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::EmptySearchResult => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Status { .. } | Error::RetriesExhausted { .. } | Error::Http(_) | Error::Generation(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ Request failed: {}", self.0);
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::EmptySearchResult, StatusCode::NOT_FOUND),
            (Error::Validation("short".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (Error::RetriesExhausted { attempts: 10 }, StatusCode::BAD_GATEWAY),
            (
                Error::Status {
                    status: 500,
                    detail: String::new(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (Error::Generation("no choices".into()), StatusCode::BAD_GATEWAY),
            (Error::Config("missing key".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
