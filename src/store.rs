use std::{
    collections::HashMap,
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tokio::sync::RwLock;

/// Failures reading or rewriting the credential file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read, or could not be written back.
    #[error("credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the file is not valid `.env` syntax.
    #[error("cannot parse credential file: {0}")]
    Parse(String),
}

/// Key/value view over the `.env` file that holds the refresh token.
///
/// Reads go to an in-memory snapshot of the file and, unless disabled with
/// [`CredentialStore::with_env_fallback`], fall back to the process
/// environment. Writes rewrite the file so that exactly one entry exists for
/// the key and then reload the snapshot from disk.
///
/// # Example
///
/// ```
/// let store = CredentialStore::open(config::default_env_path()).await?;
/// store.set("SPOTIFY_REFRESH_TOKEN", "AQD...").await?;
/// assert_eq!(store.get("SPOTIFY_REFRESH_TOKEN").await.as_deref(), Some("AQD..."));
/// ```
pub struct CredentialStore {
    path: PathBuf,
    snapshot: RwLock<HashMap<String, String>>,
    env_fallback: bool,
}

impl CredentialStore {
    /// Opens the store backed by the `.env` file at `path`.
    ///
    /// A missing file yields an empty snapshot; it is created on the first
    /// [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = read_entries(&path).await?;
        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
            env_fallback: true,
        })
    }

    /// Controls whether keys missing from the file are looked up in the
    /// process environment. Enabled by default.
    pub fn with_env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }

    /// Location of the backing `.env` file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored for `key`.
    ///
    /// The file snapshot wins over the process environment. Empty values are
    /// treated as absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        let from_file = self.snapshot.read().await.get(key).cloned();
        from_file
            .or_else(|| {
                self.env_fallback
                    .then(|| env::var(key).ok())
                    .flatten()
            })
            .filter(|v| !v.trim().is_empty())
    }

    /// Writes `key=value`, replacing every previous entry for `key`.
    ///
    /// Other lines are kept as they are. The file and its parent directory
    /// are created when missing, and the snapshot is reloaded afterwards.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, written or parsed back.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Held across the rewrite so concurrent writers cannot interleave.
        let mut snapshot = self.snapshot.write().await;

        let current = match async_fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, upsert_entry(&current, key, value)).await?;

        *snapshot = read_entries(&self.path).await?;
        Ok(())
    }

    /// Re-reads the file into the snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub async fn reload(&self) -> Result<(), StoreError> {
        let entries = read_entries(&self.path).await?;
        *self.snapshot.write().await = entries;
        Ok(())
    }
}

async fn read_entries(path: &Path) -> Result<HashMap<String, String>, StoreError> {
    match async_fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    }

    dotenv::from_path_iter(path)
        .map_err(|e| StoreError::Parse(e.to_string()))?
        .map(|entry| entry.map_err(|e| StoreError::Parse(e.to_string())))
        .collect()
}

/// Returns `contents` with a single `key=value` line for `key`.
///
/// The first existing entry is replaced in place and later duplicates are
/// dropped. Other lines, comments included, are kept verbatim. When no entry
/// exists the line is appended.
pub fn upsert_entry(contents: &str, key: &str, value: &str) -> String {
    let line = format!("{key}={value}");
    let mut replaced = false;
    let mut lines: Vec<&str> = Vec::new();

    for existing in contents.lines() {
        if entry_key(existing) == Some(key) {
            if !replaced {
                lines.push(&line);
                replaced = true;
            }
            continue;
        }
        lines.push(existing);
    }

    if !replaced {
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        lines.push(&line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn entry_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, _) = line.split_once('=')?;
    Some(key.trim())
}
