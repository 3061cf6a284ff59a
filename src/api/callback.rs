use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;

use crate::{config::REFRESH_TOKEN_KEY, server::AppState, spotify, success, warning};

const CANCELED_PAGE: &str = "<h4>Authorization failed or canceled.</h4>";
const FAILED_PAGE: &str = "<h4>Error getting tokens. Check the console.</h4>";
const SUCCESS_PAGE: &str =
    "<h2>Authorization successful.</h2><p>Refresh token saved. You can close this tab.</p>";

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Html<&'static str> {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        if let Some(reason) = params.error {
            warning!("Authorization was not granted: {}", reason);
        }
        return Html(CANCELED_PAGE);
    };

    let granted = match spotify::auth::exchange_code(&state.http, &state.settings, &code).await {
        Ok(granted) => granted,
        Err(e) => {
            warning!("Error exchanging code: {}", e);
            return Html(FAILED_PAGE);
        }
    };

    if let Err(e) = state
        .store
        .set(REFRESH_TOKEN_KEY, &granted.refresh_token)
        .await
    {
        warning!("Failed to save refresh token: {}", e);
        return Html(FAILED_PAGE);
    }

    state.tokens.set_access_token(granted.access_token).await;
    success!("Refresh token saved to {}", state.store.path().display());

    Html(SUCCESS_PAGE)
}
