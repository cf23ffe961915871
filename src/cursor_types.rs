//! Cursor event types passed from the driver to sinks

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "down")]
    Press,
    #[serde(rename = "up")]
    Release,
}

impl Phase {
    /// Wire name used by the montage engine ("down" / "up")
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Press => "down",
            Phase::Release => "up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorEvent {
    pub id: String,
    pub phase: Phase,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
