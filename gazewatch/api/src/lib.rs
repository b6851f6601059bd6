mod landmarks;
pub use landmarks::{Landmark, LandmarkSet, FACE_LANDMARK_COUNT, REQUIRED_LANDMARKS};

use anyhow::Result;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeCenters {
    pub left: Vec2,
    pub right: Vec2,
}

impl EyeCenters {
    pub fn mean_y(&self) -> f32 {
        (self.left.y + self.right.y) / 2.0
    }
}

/// Per-frame output of the gaze estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GazeResult {
    pub looking_down: bool,
    /// Seconds the current down-gaze run has lasted, `0.0` when not looking down.
    pub elapsed_seconds: f64,
    pub alarm: bool,
    /// Smoothed eye centers, `None` on frames without a detection.
    pub eye_centers: Option<EyeCenters>,
    pub eye_displacement: f32,
    pub pitch_displacement: f32,
}

/// A captured frame after landmark detection.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_ms: u64,
    pub width: u32,
    pub height: u32,
    /// `None` when the model found no face.
    pub landmarks: Option<LandmarkSet>,
}

impl LandmarkFrame {
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ms as f64 / 1000.0
    }
}

/// Source of landmark frames: the camera plus face model, or a recording of one.
pub trait LandmarkProvider {
    fn initialize(&mut self) -> Result<()>;
    /// Returns `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
    fn unload(&mut self);
}
