use reqwest::{Client, Url};

use crate::{
    config::{AUTH_URL_KEY, ConfigError, Settings},
    error::SpotifyError,
    types::{GrantedTokens, TokenResponse},
};

/// Builds the URL the user visits to grant the proxy access.
///
/// # Errors
///
/// Fails when the configured authorization endpoint is not a valid URL.
pub fn authorize_url(settings: &Settings) -> Result<String, ConfigError> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", settings.client.client_id.as_str()),
            ("scope", settings.scope.as_str()),
            ("redirect_uri", settings.client.redirect_uri.as_str()),
        ],
    )
    .map_err(|_| ConfigError::Invalid {
        key: AUTH_URL_KEY,
        value: settings.auth_url.clone(),
    })?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access and refresh token.
///
/// Client id and secret travel in the form body for this grant.
///
/// # Errors
///
/// Returns [`SpotifyError::AuthExchange`] when Spotify is unreachable, rejects
/// the code, or answers without a refresh token.
pub async fn exchange_code(
    http: &Client,
    settings: &Settings,
    code: &str,
) -> Result<GrantedTokens, SpotifyError> {
    let res = http
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.client.redirect_uri.as_str()),
            ("client_id", settings.client.client_id.as_str()),
            ("client_secret", settings.client.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(transport_error)?;

    let token = read_token_response(res).await?;
    match token.refresh_token {
        Some(refresh_token) if !refresh_token.is_empty() => Ok(GrantedTokens {
            access_token: token.access_token,
            refresh_token,
        }),
        _ => Err(SpotifyError::AuthExchange {
            status: None,
            payload: "token response did not include a refresh_token".to_string(),
        }),
    }
}

/// Mints a new access token from a refresh token.
///
/// Client id and secret travel as HTTP Basic credentials for this grant.
///
/// # Errors
///
/// Returns [`SpotifyError::AuthExchange`] on transport failures and non-2xx
/// answers.
pub async fn refresh_access_token(
    http: &Client,
    settings: &Settings,
    refresh_token: &str,
) -> Result<TokenResponse, SpotifyError> {
    let res = http
        .post(&settings.token_url)
        .basic_auth(
            &settings.client.client_id,
            Some(&settings.client.client_secret),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(transport_error)?;

    read_token_response(res).await
}

async fn read_token_response(res: reqwest::Response) -> Result<TokenResponse, SpotifyError> {
    let status = res.status();
    let payload = res.text().await.map_err(|e| SpotifyError::AuthExchange {
        status: Some(status.as_u16()),
        payload: e.to_string(),
    })?;

    if !status.is_success() {
        return Err(SpotifyError::AuthExchange {
            status: Some(status.as_u16()),
            payload,
        });
    }

    serde_json::from_str(&payload).map_err(|_| SpotifyError::AuthExchange {
        status: Some(status.as_u16()),
        payload,
    })
}

fn transport_error(err: reqwest::Error) -> SpotifyError {
    SpotifyError::AuthExchange {
        status: None,
        payload: err.to_string(),
    }
}
