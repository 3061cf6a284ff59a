use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{store::StoreError, types::ErrorBody};

/// Message returned to clients when no better reason is available.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Failures talking to the Spotify accounts service or Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The token endpoint rejected the request or could not be reached.
    #[error("token exchange failed (status {status:?}): {payload}")]
    AuthExchange {
        status: Option<u16>,
        payload: String,
    },

    /// Minting was requested before any refresh token was stored.
    #[error("no refresh token stored, complete the authorization flow first")]
    MissingRefreshToken,

    /// The Web API answered 401 for the access token we sent.
    #[error("access token rejected by Spotify")]
    Unauthorized,

    /// Any other non-2xx answer from the Web API.
    #[error("Spotify API error: {status}")]
    Remote { status: u16, reason: Option<String> },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from Spotify: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SpotifyError {
    /// The structured reason Spotify attached to the failure, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SpotifyError::Remote { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

/// Error returned from JSON handlers. Always rendered as HTTP 500 with an
/// `{"error": "..."}` body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn generic() -> Self {
        Self {
            message: GENERIC_FAILURE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err.reason() {
            Some(reason) => Self {
                message: reason.to_string(),
            },
            None => Self::generic(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_reason_is_passed_through() {
        let err = SpotifyError::Remote {
            status: 404,
            reason: Some("NO_ACTIVE_DEVICE".to_string()),
        };
        assert_eq!(ApiError::from(err).message(), "NO_ACTIVE_DEVICE");
    }

    #[test]
    fn missing_reason_falls_back_to_generic() {
        let err = SpotifyError::Remote {
            status: 502,
            reason: None,
        };
        assert_eq!(ApiError::from(err).message(), GENERIC_FAILURE);

        let err = SpotifyError::AuthExchange {
            status: Some(400),
            payload: "{\"error\":\"invalid_grant\"}".to_string(),
        };
        assert_eq!(ApiError::from(err).message(), GENERIC_FAILURE);
    }

    #[test]
    fn api_error_renders_as_500() {
        let response = ApiError::generic().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
