//! CLI utility functions
//!
//! Connection setup and note lookup shared across commands.

use std::path::Path;

use anyhow::{Context, Result};

use super::ConnectionArgs;
use crate::client::TriliumClient;
use crate::config::Config;
use crate::model::Note;

/// Load config (explicit file or default locations) and apply overrides
pub fn load_config(connection: &ConnectionArgs) -> Result<Config> {
    let config = match &connection.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    Ok(config.with_overrides(connection.url.clone(), connection.token.clone()))
}

/// Connect using flags, env vars and config
pub fn connect(connection: &ConnectionArgs) -> Result<(TriliumClient, Config)> {
    let config = load_config(connection)?;
    let context = config.context()?;
    let client = TriliumClient::connect(&context)
        .with_context(|| format!("Failed to set up client for {}", context.url))?;
    Ok((client, config))
}

/// Fetch a note or fail with a readable message
pub fn require_note(client: &TriliumClient, note_id: &str) -> Result<Note> {
    client
        .get_note(note_id)
        .with_context(|| format!("Failed to fetch note {}", note_id))?
        .ok_or_else(|| anyhow::anyhow!("Note not found: {}", note_id))
}
