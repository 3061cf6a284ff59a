use axum::{Extension, Json};

use super::{PLAY_PATH_PREFIX, STOP_PATH, TOP_TRACKS_LIMIT};
use crate::{
    error::ApiError,
    server::AppState,
    types::{Controls, NowPlaying, RemoteTrack, Summary, TrackSummary},
    warning,
};

/// Aggregated now-playing and top-tracks view.
///
/// Both remote calls run concurrently. Any failure collapses the whole
/// response into a generic 500; partial results are never returned.
pub async fn summary(Extension(state): Extension<AppState>) -> Result<Json<Summary>, ApiError> {
    let tokens = &state.tokens;
    let spotify = &state.spotify;

    let fetched = async {
        tokens.ensure_access_token().await?;
        tokio::try_join!(
            tokens.call_with_token(|token| async move {
                spotify.top_tracks(&token, TOP_TRACKS_LIMIT).await
            }),
            tokens.call_with_token(|token| async move { spotify.currently_playing(&token).await }),
        )
    }
    .await;

    match fetched {
        Ok((top, now)) => Ok(Json(build_summary(top, now))),
        Err(e) => {
            warning!("Failed to build summary: {}", e);
            Err(ApiError::generic())
        }
    }
}

/// Reshapes Spotify's payloads into the client-facing summary.
///
/// Ranking order is preserved and every ranked track is listed. Tracks
/// without an id (local files) get an empty id and no `play_url`.
pub fn build_summary(top: Vec<RemoteTrack>, now: Option<RemoteTrack>) -> Summary {
    let top_tracks = top
        .into_iter()
        .map(|track| {
            let id = track.id.clone().unwrap_or_default();
            TrackSummary {
                play_url: (!id.is_empty()).then(|| format!("{PLAY_PATH_PREFIX}/{id}")),
                artist: track.primary_artist(),
                name: track.name,
                id,
            }
        })
        .collect();

    let now_playing = now.map(|track| NowPlaying {
        artist: track.primary_artist(),
        name: track.name,
        url: track.external_urls.spotify,
    });

    Summary {
        now_playing,
        top_tracks,
        controls: Controls {
            stop_url: STOP_PATH.to_string(),
        },
    }
}
