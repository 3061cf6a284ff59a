use std::io;

use crate::{
    config::{ConfigError, REFRESH_TOKEN_KEY, Settings},
    info, spotify,
    store::CredentialStore,
    warning,
};

/// Returns the authorization URL when no refresh token is stored yet.
pub async fn pending_authorization(
    settings: &Settings,
    store: &CredentialStore,
) -> Result<Option<String>, ConfigError> {
    if store.get(REFRESH_TOKEN_KEY).await.is_some() {
        return Ok(None);
    }
    spotify::auth::authorize_url(settings).map(Some)
}

/// Starts the one-time authorization flow if it is needed.
///
/// `open` is invoked at most once, with the authorization URL. When it fails,
/// or when `launch_browser` is false, the URL is printed for manual use.
/// Returns whether the flow had to be started.
pub async fn begin_authorization<F>(
    settings: &Settings,
    store: &CredentialStore,
    launch_browser: bool,
    open: F,
) -> Result<bool, ConfigError>
where
    F: FnOnce(&str) -> io::Result<()>,
{
    let Some(url) = pending_authorization(settings, store).await? else {
        return Ok(false);
    };

    if !launch_browser {
        info!("No refresh token found. Authorize the app at:\n{}", url);
        return Ok(true);
    }

    info!("No refresh token found. Opening browser for Spotify authorization...");
    if open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    Ok(true)
}
