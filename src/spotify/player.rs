use reqwest::{StatusCode, header::CONTENT_LENGTH};

use super::{SpotifyClient, ensure_success};
use crate::{
    error::SpotifyError,
    types::{CurrentlyPlayingResponse, PlayRequest, RemoteTrack, TopTracksResponse},
};

impl SpotifyClient {
    /// `GET /me/top/tracks`, in Spotify's ranking order.
    pub async fn top_tracks(&self, token: &str, limit: u32) -> Result<Vec<RemoteTrack>, SpotifyError> {
        let res = self
            .http
            .get(self.endpoint("/me/top/tracks"))
            .query(&[("limit", limit)])
            .bearer_auth(token)
            .send()
            .await?;

        let res = ensure_success(res).await?;
        Ok(res.json::<TopTracksResponse>().await?.items)
    }

    /// `GET /me/player/currently-playing`.
    ///
    /// Spotify answers `204 No Content` when nothing is playing; that, an empty
    /// body, and a body without an `item` all map to `None`.
    pub async fn currently_playing(&self, token: &str) -> Result<Option<RemoteTrack>, SpotifyError> {
        let res = self
            .http
            .get(self.endpoint("/me/player/currently-playing"))
            .bearer_auth(token)
            .send()
            .await?;

        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = ensure_success(res).await?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let playing: CurrentlyPlayingResponse = serde_json::from_slice(&body)?;
        Ok(playing.item)
    }

    /// `PUT /me/player/pause` on the user's active device.
    pub async fn pause(&self, token: &str) -> Result<(), SpotifyError> {
        let res = self
            .http
            .put(self.endpoint("/me/player/pause"))
            .bearer_auth(token)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;

        ensure_success(res).await?;
        Ok(())
    }

    /// `PUT /me/player/play` with a single track URI.
    pub async fn play(&self, token: &str, track_id: &str) -> Result<(), SpotifyError> {
        let body = PlayRequest {
            uris: vec![format!("spotify:track:{track_id}")],
        };

        let res = self
            .http
            .put(self.endpoint("/me/player/play"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        ensure_success(res).await?;
        Ok(())
    }
}
