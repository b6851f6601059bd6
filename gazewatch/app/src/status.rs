use common::{GazeResult, LandmarkFrame};
use serde::Serialize;

use crate::overlay::OverlayLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    NoFace,
    Monitoring,
    LookingDown,
    Distracted,
}

impl StatusKind {
    pub fn from_result(face_detected: bool, result: &GazeResult) -> Self {
        if result.alarm {
            Self::Distracted
        } else if result.looking_down {
            Self::LookingDown
        } else if face_detected {
            Self::Monitoring
        } else {
            Self::NoFace
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoFace => "No face",
            Self::Monitoring => "Monitoring...",
            Self::LookingDown => "Looking Down",
            Self::Distracted => "Distracted!",
        }
    }
}

/// Everything a front end needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GazeStatus {
    pub timestamp_ms: u64,
    pub status: StatusKind,
    pub face_detected: bool,
    pub looking_down: bool,
    pub elapsed_seconds: f64,
    /// Serialized as `alert`, the field the web page front end reads.
    #[serde(rename = "alert")]
    pub alarm: bool,
    pub overlay: OverlayLayout,
}

impl GazeStatus {
    pub fn new(frame: &LandmarkFrame, result: &GazeResult, overlay: OverlayLayout) -> Self {
        let face_detected = frame.landmarks.is_some();
        Self {
            timestamp_ms: frame.timestamp_ms,
            status: StatusKind::from_result(face_detected, result),
            face_detected,
            looking_down: result.looking_down,
            elapsed_seconds: result.elapsed_seconds,
            alarm: result.alarm,
            overlay,
        }
    }
}
