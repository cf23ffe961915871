use crate::cursor_types::CursorEvent;
use crate::driver::{DriverConfig, ReleaseDepth};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A completed run: the parameters it used and every event it emitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub count: u32,
    pub delay_secs: f64,
    /// Seed used for the coordinates, if the run was deterministic
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub release_depth: ReleaseDepth,
    pub events: Vec<CursorEvent>,
}

impl Session {
    pub fn new(config: &DriverConfig, seed: Option<u64>, events: Vec<CursorEvent>) -> Self {
        Self {
            id: config.id.clone(),
            count: config.count,
            delay_secs: config.delay.as_secs_f64(),
            seed,
            release_depth: config.release_depth,
            events,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write session to {:?}", path))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {:?}", path))?;
        let session: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid session file {:?}", path))?;
        Ok(session)
    }
}
