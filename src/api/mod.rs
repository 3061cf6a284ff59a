//! # API Module
//!
//! HTTP handlers served by the local web server.
//!
//! ## Endpoints
//!
//! ### Authorization
//!
//! - [`callback`] - Completes the authorization-code grant Spotify redirects
//!   back to, and stores the refresh token.
//!
//! ### Resource proxy
//!
//! - [`summary`] - Now playing plus the user's top ten tracks.
//! - [`stop`] - Pauses playback on the active device.
//! - [`play`] - Starts playback of a single track.
//!
//! ### Monitoring
//!
//! - [`health`] - Liveness and whether a refresh token is available.
//!
//! Resource handlers answer JSON. Failures are rendered by
//! [`crate::error::ApiError`] as `500 {"error": "..."}`; a failed request never
//! affects the next one.

mod callback;
mod health;
mod player;
mod summary;

pub use callback::callback;
pub use health::health;
pub use player::{play, stop};
pub use summary::{build_summary, summary};

/// Path the summary's `controls.stop_url` points at.
pub const STOP_PATH: &str = "/spotify/stop";

/// Prefix of every `play_url` handed out in the summary.
pub const PLAY_PATH_PREFIX: &str = "/spotify/play";

/// Number of top tracks requested from Spotify.
pub const TOP_TRACKS_LIMIT: u32 = 10;
