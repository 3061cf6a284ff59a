//! Build script for the playback proxy.
//!
//! Copies the `.env.example` template next to where the service looks for its
//! `.env` by default, so users can copy it in place and fill in their client
//! id and secret.
//!
//! Destination:
//! - Linux: `~/.local/share/sporlproxy/.env.example`
//! - macOS: `~/Library/Application Support/sporlproxy/.env.example`
//! - Windows: `%LOCALAPPDATA%/sporlproxy/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporlproxy");
    fs::create_dir_all(&out_dir)?;
    fs::copy(&template, out_dir.join(".env.example"))?;

    Ok(())
}
