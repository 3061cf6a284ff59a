//! Spotify Playback Proxy Library
//!
//! This library backs a small local web service that completes the Spotify
//! authorization-code grant once, keeps the resulting refresh token in an env
//! file, and proxies a handful of playback-control and listening-history
//! queries on behalf of a single user.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the callback, summary and playback endpoints
//! - `bootstrap` - Decides whether the one-time authorization flow must start
//! - `config` - Environment loading and process settings
//! - `error` - Error types and their HTTP representation
//! - `management` - Access token lifecycle
//! - `server` - Router construction and the listener
//! - `spotify` - Spotify Web API and accounts service client
//! - `store` - Key/value view over the env file holding the refresh token
//! - `types` - Wire shapes for remote and client-facing payloads
//!
//! # Example
//!
//! ```
//! use sporlproxy::{config, store::CredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> sporlproxy::Res<()> {
//!     let path = config::default_env_path();
//!     config::load_env(&path).await?;
//!     let store = CredentialStore::open(path).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod store;
pub mod types;

/// Result alias used at the binary boundary.
///
/// Library operations return their own typed errors (see [`error`]); this
/// alias is for glue code that only needs to report a failure and move on.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures, before the listener is accepting
/// requests. Request handlers log with [`warning!`] instead, since a single
/// failed request must never take the service down.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures such as a rejected token exchange or a
/// remote error payload worth showing to the operator.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
