//! Error types for the HTTP layer.
//!
//! [`ApiError`] converts engine failures and request rejections into an
//! Axum response with a JSON body via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use league_stats::StatsError;

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected or failed the request.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Stats(StatsError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Stats(StatsError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Stats(StatsError::InvalidScope(_) | StatsError::InvalidRating(_))
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ApiError::from(StatsError::StoreUnavailable("down".to_owned())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(StatsError::not_found("team", 3)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(StatsError::InvalidScope("x".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(StatsError::InvalidRating("9".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::InvalidBody("eof".to_owned()), StatusCode::BAD_REQUEST),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn message_is_the_engine_message() {
        let err = ApiError::from(StatsError::not_found("player", 42));
        assert_eq!(err.to_string(), "player 42 not found");
    }
}
