use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{db::StoreError, types::ErrorResponse};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Every way a create or redirect invocation can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing request body")]
    MissingBody,
    #[error("Invalid JSON in request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("{} is required", field_label(.0))]
    MissingField(&'static str),
    #[error("Invalid short code: {0}")]
    InvalidPath(#[source] PathRejection),
    #[error("Database error: {0}")]
    StoreWrite(#[source] StoreError),
    #[error("Database error: {0}")]
    StoreRead(#[source] StoreError),
    #[error("Short URL not found")]
    NotFound,
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

fn field_label(field: &str) -> &str {
    match field {
        "url" => "URL",
        "code" => "Short code",
        other => other,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingBody
            | Self::MalformedBody(_)
            | Self::MissingField(_)
            | Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreWrite(_) | Self::StoreRead(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Diagnostic text for the body; only unanticipated faults carry one.
    pub fn trace(&self) -> Option<String> {
        match self {
            Self::Internal(e) => Some(format!("{e:?}")),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = ?self, "Request failed");
        } else {
            error!(status = %status, error = %self, "Request rejected");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            trace: self.trace(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn client_errors_map_to_400_and_404() {
        assert_eq!(ApiError::MissingBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingField("url").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);

        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(
            ApiError::MalformedBody(parse_error).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn messages_name_the_missing_field() {
        assert_eq!(ApiError::MissingField("url").to_string(), "URL is required");
        assert_eq!(
            ApiError::MissingField("code").to_string(),
            "Short code is required"
        );
    }

    #[test]
    fn malformed_body_carries_parse_detail() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let detail = parse_error.to_string();
        let message = ApiError::MalformedBody(parse_error).to_string();
        assert_eq!(message, format!("Invalid JSON in request body: {detail}"));
    }

    #[test]
    fn only_internal_errors_carry_a_trace() {
        let internal = ApiError::Internal(anyhow!("boom").context("while redirecting"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "while redirecting");
        let trace = internal.trace().unwrap();
        assert!(trace.contains("boom"));

        assert!(ApiError::NotFound.trace().is_none());
        assert!(ApiError::MissingBody.trace().is_none());
    }
}
