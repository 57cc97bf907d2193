use std::{io, path::PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No polygons to export")]
    EmptyExport,

    #[error("Malformed feature: {0}")]
    MalformedFeature(String),

    #[error("Could not read request body: {0}")]
    UnreadableBody(String),

    #[error("Could not write export file {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyExport
            | ApiError::MalformedFeature(_)
            | ApiError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            ApiError::FileWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use axum::http::StatusCode;
    use rstest::rstest;

    use super::ApiError;

    #[rstest]
    #[case(ApiError::EmptyExport, StatusCode::BAD_REQUEST)]
    #[case(ApiError::MalformedFeature("nope".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::UnreadableBody("cut off".to_string()), StatusCode::BAD_REQUEST)]
    #[case(
        ApiError::FileWrite { path: "output".into(), source: io::Error::from(io::ErrorKind::PermissionDenied) },
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_status(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn test_empty_export_message() {
        assert_eq!(ApiError::EmptyExport.to_string(), "No polygons to export");
    }
}
