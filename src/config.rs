//! Configuration management for the playback proxy.
//!
//! Values come from the process environment, seeded from a `.env` file that
//! lives in the platform local data directory unless `--env-file` points
//! elsewhere. The same file doubles as the credential store (see
//! [`crate::store`]), which is why a missing file is tolerated: the first
//! successful authorization creates it.
//!
//! Precedence:
//! 1. Environment variables
//! 2. The `.env` file
//! 3. Application defaults (where applicable)

use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const CLIENT_ID_KEY: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "SPOTIFY_CLIENT_SECRET";
pub const REDIRECT_URI_KEY: &str = "SPOTIFY_REDIRECT_URI";
pub const REFRESH_TOKEN_KEY: &str = "SPOTIFY_REFRESH_TOKEN";
pub const PORT_KEY: &str = "PORT";
pub const AUTH_URL_KEY: &str = "SPOTIFY_API_AUTH_URL";
pub const TOKEN_URL_KEY: &str = "SPOTIFY_API_TOKEN_URL";
pub const API_URL_KEY: &str = "SPOTIFY_API_URL";
pub const SCOPE_KEY: &str = "SPOTIFY_API_AUTH_SCOPE";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing user-top-read user-modify-playback-state user-read-playback-state";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("cannot load {path}: {message}")]
    Env { path: String, message: String },
}

/// The registered application's id/secret/redirect triple.
///
/// Loaded once at startup and never mutated. Deliberately not `Debug` so the
/// secret cannot end up in a log line.
#[derive(Clone)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Everything the service needs to know about its environment.
#[derive(Clone)]
pub struct Settings {
    pub client: ClientIdentity,
    pub port: u16,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
}

impl Settings {
    /// Builds the settings from the current process environment.
    ///
    /// # Errors
    ///
    /// Fails when the client id or secret is missing, or when `PORT` is not
    /// a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client: ClientIdentity {
                client_id: spotify_client_id()?,
                client_secret: spotify_client_secret()?,
                redirect_uri: spotify_redirect_uri(),
            },
            port: port()?,
            auth_url: var_or(AUTH_URL_KEY, DEFAULT_AUTH_URL),
            token_url: var_or(TOKEN_URL_KEY, DEFAULT_TOKEN_URL),
            api_url: var_or(API_URL_KEY, DEFAULT_API_URL),
            scope: var_or(SCOPE_KEY, DEFAULT_SCOPE),
        })
    }

    /// Loopback address the listener binds to.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }

    /// Public origin of the service, derived from the redirect URI.
    pub fn public_base_url(&self) -> String {
        let uri = self.client.redirect_uri.trim_end_matches('/');
        uri.strip_suffix("/callback").unwrap_or(uri).to_string()
    }
}

/// Default location of the `.env` file.
///
/// - Linux: `~/.local/share/sporlproxy/.env`
/// - macOS: `~/Library/Application Support/sporlproxy/.env`
/// - Windows: `%LOCALAPPDATA%/sporlproxy/.env`
pub fn default_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlproxy/.env");
    path
}

/// Loads environment variables from the given `.env` file.
///
/// Creates the parent directory if needed. Returns `Ok(false)` when the file
/// does not exist yet; variables already present in the process environment
/// are never overridden.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file cannot be parsed.
pub async fn load_env(path: &Path) -> Result<bool, ConfigError> {
    let env_error = |message: String| ConfigError::Env {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| env_error(e.to_string()))?;
    }

    if async_fs::metadata(path).await.is_err() {
        return Ok(false);
    }

    dotenv::from_path(path).map_err(|e| env_error(e.to_string()))?;
    Ok(true)
}

pub fn spotify_client_id() -> Result<String, ConfigError> {
    required(CLIENT_ID_KEY)
}

pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required(CLIENT_SECRET_KEY)
}

/// Callback URL registered with Spotify. Must match the application settings
/// in the Spotify developer dashboard exactly.
pub fn spotify_redirect_uri() -> String {
    var_or(REDIRECT_URI_KEY, DEFAULT_REDIRECT_URI)
}

pub fn port() -> Result<u16, ConfigError> {
    match env::var(PORT_KEY) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: PORT_KEY,
            value,
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
