//! # Spotify Integration Module
//!
//! Thin client for the two Spotify services the proxy talks to:
//!
//! - the accounts service (`/authorize`, `/api/token`), see [`auth`]
//! - the Web API player and personalization endpoints, see [`player`]
//!
//! Nothing here holds state beyond the HTTP connection pool. Access tokens are
//! passed in by the caller; their lifecycle belongs to
//! [`crate::management::TokenManager`].
//!
//! ## Error mapping
//!
//! Every Web API call funnels its response through the same check:
//!
//! - `401` becomes [`SpotifyError::Unauthorized`] so the token manager can
//!   re-mint and retry once
//! - any other non-2xx becomes [`SpotifyError::Remote`] carrying the `reason`
//!   (or `message`) from Spotify's error envelope when the body has one
//! - transport failures stay [`SpotifyError::Http`]
//!
//! Token endpoint failures are reported as [`SpotifyError::AuthExchange`]
//! with the raw payload so the operator can see what Spotify said.

use reqwest::Client;

use crate::error::SpotifyError;

pub mod auth;
pub mod player;

/// Web API client bound to a base URL such as `https://api.spotify.com/v1`.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Extracts the most useful human-readable reason from a Web API error body.
///
/// Returns `None` for empty or unexpected payloads instead of failing.
pub fn error_reason(body: &str) -> Option<String> {
    let envelope: crate::types::RemoteErrorBody = serde_json::from_str(body).ok()?;
    envelope
        .error
        .reason
        .or(envelope.error.message)
        .filter(|r| !r.trim().is_empty())
}

async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, SpotifyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(SpotifyError::Unauthorized);
    }

    // An unreadable body still leaves us with the status code.
    let body = res.text().await.unwrap_or_default();
    if !body.is_empty() {
        crate::warning!("Spotify answered {}: {}", status, body);
    }

    Err(SpotifyError::Remote {
        status: status.as_u16(),
        reason: error_reason(&body),
    })
}
