use std::{future::Future, sync::Arc};

use reqwest::Client;
use tokio::sync::RwLock;

use crate::{
    config::{REFRESH_TOKEN_KEY, Settings},
    error::SpotifyError,
    spotify,
    store::CredentialStore,
    warning,
};

/// How many times a call is repeated after Spotify rejects the access token.
const UNAUTHORIZED_RETRIES: usize = 1;

/// Owns the process-wide access token.
///
/// The token is either cached or absent; no expiry is tracked. Staleness is
/// only discovered when Spotify answers 401, at which point the token is
/// dropped and minted again from the refresh token in the credential store.
///
/// Concurrent requests may both find the cache empty and both mint. That is
/// wasteful but harmless, the last minted token wins.
pub struct TokenManager {
    http: Client,
    settings: Arc<Settings>,
    store: Arc<CredentialStore>,
    access_token: RwLock<Option<String>>,
}

impl TokenManager {
    pub fn new(http: Client, settings: Arc<Settings>, store: Arc<CredentialStore>) -> Self {
        TokenManager {
            http,
            settings,
            store,
            access_token: RwLock::new(None),
        }
    }

    /// Returns the cached access token, minting one if none is cached.
    pub async fn ensure_access_token(&self) -> Result<String, SpotifyError> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Ok(token);
        }
        self.refresh().await
    }

    /// Mints a new access token regardless of what is cached.
    ///
    /// The refresh token is read from the credential store on every call. If
    /// Spotify hands back a rotated refresh token it is written back to the
    /// store.
    pub async fn refresh(&self) -> Result<String, SpotifyError> {
        let refresh_token = self
            .store
            .get(REFRESH_TOKEN_KEY)
            .await
            .ok_or(SpotifyError::MissingRefreshToken)?;

        let minted =
            spotify::auth::refresh_access_token(&self.http, &self.settings, &refresh_token).await?;

        if let Some(rotated) = minted
            .refresh_token
            .as_deref()
            .filter(|r| !r.is_empty() && *r != refresh_token)
        {
            if let Err(e) = self.store.set(REFRESH_TOKEN_KEY, rotated).await {
                warning!("Failed to save rotated refresh token: {}", e);
            }
        }

        *self.access_token.write().await = Some(minted.access_token.clone());
        Ok(minted.access_token)
    }

    /// Caches an access token obtained elsewhere, e.g. from the code exchange.
    pub async fn set_access_token(&self, token: String) {
        *self.access_token.write().await = Some(token);
    }

    /// Drops the cached access token.
    pub async fn invalidate(&self) {
        *self.access_token.write().await = None;
    }

    pub async fn current(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Runs `call` with a valid access token.
    ///
    /// When the call fails with [`SpotifyError::Unauthorized`] the token is
    /// invalidated and the call is repeated once with a freshly minted one.
    /// A second 401 is returned to the caller.
    pub async fn call_with_token<T, F, Fut>(&self, call: F) -> Result<T, SpotifyError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, SpotifyError>>,
    {
        let mut retries = 0;
        loop {
            let token = self.ensure_access_token().await?;
            match call(token).await {
                Err(SpotifyError::Unauthorized) if retries < UNAUTHORIZED_RETRIES => {
                    retries += 1;
                    self.invalidate().await;
                }
                result => return result,
            }
        }
    }
}
