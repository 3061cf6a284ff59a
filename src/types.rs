use serde::{Deserialize, Serialize};

// Accounts service

/// Body of a successful `POST /api/token` answer.
///
/// `refresh_token` is always present for the authorization-code grant and
/// only present on a refresh grant when Spotify rotates it.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Credentials obtained from the authorization-code grant.
#[derive(Debug, Clone)]
pub struct GrantedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

// Web API

/// Page of `GET /v1/me/top/tracks`, best ranked first.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<RemoteTrack>,
}

/// Body of `GET /v1/me/player/currently-playing`.
///
/// `item` is null while an ad plays or for some podcast states, and Spotify
/// answers 204 with no body at all when nothing is playing.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub item: Option<RemoteTrack>,
}

/// Track object as returned by the Web API, reduced to the fields we read.
///
/// # Example
///
/// ```json
/// {
///   "id": "4uLU6hMCjMI75M1A2tKUQC",
///   "name": "Never Gonna Give You Up",
///   "artists": [{ "name": "Rick Astley" }],
///   "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTrack {
    /// Null for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RemoteArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl RemoteTrack {
    /// Name of the first credited artist, empty when there is none.
    pub fn primary_artist(&self) -> String {
        self.artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default()
    }
}

/// Simplified artist object; only the display name is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteArtist {
    pub name: String,
}

/// Links to the track outside the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    /// Web player URL.
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Error envelope of the Web API, e.g.
/// `{"error": {"status": 404, "message": "...", "reason": "NO_ACTIVE_DEVICE"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteErrorBody {
    pub error: RemoteErrorDetail,
}

/// Inner object of [`RemoteErrorBody`]. Player endpoints fill `reason`
/// (`NO_ACTIVE_DEVICE`, `PREMIUM_REQUIRED`, ...), others only `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteErrorDetail {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body of `PUT /v1/me/player/play`, e.g. `{"uris": ["spotify:track:<id>"]}`.
#[derive(Debug, Clone, Serialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
}

// Client-facing

/// One entry of [`Summary::top_tracks`].
///
/// # Example
///
/// ```json
/// { "id": "t1", "name": "First", "artist": "A", "play_url": "/spotify/play/t1" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Spotify track id, empty for local files.
    pub id: String,
    pub name: String,
    /// First credited artist, empty when none is credited.
    pub artist: String,
    /// Relative path that starts playback of this track through the proxy.
    /// Null when the track has no id and so cannot be played.
    pub play_url: Option<String>,
}

/// The track currently playing on the user's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub name: String,
    pub artist: String,
    /// Web player link, if Spotify sent one.
    pub url: Option<String>,
}

/// Relative paths of the playback controls offered to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub stop_url: String,
}

/// Response of `GET /spotify` and `GET /spotify/summary`.
///
/// # Example
///
/// ```json
/// {
///   "now_playing": { "name": "Playing", "artist": "Z", "url": "https://open.spotify.com/track/t9" },
///   "top_tracks": [
///     { "id": "t1", "name": "First", "artist": "A", "play_url": "/spotify/play/t1" }
///   ],
///   "controls": { "stop_url": "/spotify/stop" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Null when nothing is playing.
    pub now_playing: Option<NowPlaying>,
    pub top_tracks: Vec<TrackSummary>,
    pub controls: Controls,
}

/// `{"success": true}` answer of the playback controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// Body of every 500 answer, e.g. `{"error": "Something went wrong"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
