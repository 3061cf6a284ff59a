use axum::{Extension, Json, extract::Path};

use crate::{error::ApiError, error::SpotifyError, server::AppState, types::Ack, warning};

/// Pauses playback.
///
/// Always mints a fresh access token first. A 401 from Spotify still gets
/// one more attempt with another freshly minted token.
pub async fn stop(Extension(state): Extension<AppState>) -> Result<Json<Ack>, ApiError> {
    match pause(&state).await {
        Ok(()) => Ok(Json(Ack { success: true })),
        Err(e) => {
            warning!("Failed to pause playback: {}", e);
            Err(e.into())
        }
    }
}

/// Starts playback of one track. Token handling is the same as [`stop`].
pub async fn play(
    Path(track_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Ack>, ApiError> {
    match start(&state, &track_id).await {
        Ok(()) => Ok(Json(Ack { success: true })),
        Err(e) => {
            warning!("Failed to play track {}: {}", track_id, e);
            Err(e.into())
        }
    }
}

async fn pause(state: &AppState) -> Result<(), SpotifyError> {
    let spotify = &state.spotify;
    state.tokens.refresh().await?;
    state
        .tokens
        .call_with_token(|token| async move { spotify.pause(&token).await })
        .await
}

async fn start(state: &AppState, track_id: &str) -> Result<(), SpotifyError> {
    let spotify = &state.spotify;
    state.tokens.refresh().await?;
    state
        .tokens
        .call_with_token(|token| async move { spotify.play(&token, track_id).await })
        .await
}
