//! Scripted input for headless matches
//!
//! A script is a JSON list of segments, each holding both players' buttons
//! for a number of frames:
//!
//! ```json
//! [
//!   { "frames": 30, "p1": { "right": true } },
//!   { "frames": 10, "p1": { "jump": true }, "p2": { "left": true } }
//! ]
//! ```
//!
//! Frames past the end of the script get neutral input.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::sim::{PlayerInput, TickInput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub frames: u32,
    #[serde(default)]
    pub p1: PlayerInput,
    #[serde(default)]
    pub p2: PlayerInput,
}

impl ScriptSegment {
    fn input(&self) -> TickInput {
        TickInput {
            p1: self.p1,
            p2: self.p2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn new(segments: Vec<ScriptSegment>) -> Self {
        Self { segments }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&error::read_to_string(path.as_ref())?)
    }

    /// Number of frames the script covers
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Input for a 0-based frame index
    pub fn input_at(&self, frame: u64) -> TickInput {
        let mut start = 0u64;
        for segment in &self.segments {
            let end = start + u64::from(segment.frames);
            if frame < end {
                return segment.input();
            }
            start = end;
        }
        TickInput::default()
    }
}
