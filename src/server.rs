use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    api, config::Settings, management::TokenManager, spotify::SpotifyClient,
    store::CredentialStore,
};

/// Shared handles every handler receives through an `Extension`.
///
/// Cloning is cheap: everything is behind an `Arc` or is a handle itself.
/// All clones share one token cache and one credential store.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<CredentialStore>,
    pub tokens: Arc<TokenManager>,
    pub spotify: SpotifyClient,
    pub http: Client,
}

impl AppState {
    /// Wires the token manager and the Web API client to one shared
    /// `reqwest` client.
    pub fn new(settings: Settings, store: CredentialStore) -> Self {
        let http = Client::new();
        let settings = Arc::new(settings);
        let store = Arc::new(store);
        let tokens = Arc::new(TokenManager::new(
            http.clone(),
            Arc::clone(&settings),
            Arc::clone(&store),
        ));
        let spotify = SpotifyClient::new(http.clone(), settings.api_url.clone());

        Self {
            settings,
            store,
            tokens,
            spotify,
            http,
        }
    }
}

/// Builds the proxy's router.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/health` | [`api::health`] |
/// | GET | `/callback` | [`api::callback`] |
/// | GET | `/spotify`, `/spotify/summary` | [`api::summary`] |
/// | GET | `/spotify/stop` | [`api::stop`] |
/// | POST | `/spotify/play/{id}` | [`api::play`] |
///
/// Unknown paths get axum's default 404.
///
/// # Example
///
/// ```
/// let state = AppState::new(settings, store);
/// let response = router(state).oneshot(request).await?;
/// ```
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/spotify", get(api::summary))
        .route("/spotify/summary", get(api::summary))
        .route(api::STOP_PATH, get(api::stop))
        .route(&format!("{}/{{id}}", api::PLAY_PATH_PREFIX), post(api::play))
        .layer(Extension(state))
}

/// Serves the router on an already bound listener until the process exits.
///
/// # Errors
///
/// Returns the I/O error that stopped `axum::serve`.
pub async fn start_api_server(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
