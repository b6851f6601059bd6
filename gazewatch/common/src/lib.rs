pub use api::{
    EyeCenters, GazeResult, Landmark, LandmarkFrame, LandmarkProvider, LandmarkSet,
    FACE_LANDMARK_COUNT,
};

mod baseline;
pub mod config;
mod dwell;
mod estimator;
mod measurements;
pub mod rules;
mod smoothing;

pub use baseline::AdaptiveBaseline;
pub use config::{AlarmBoundary, GazeConfig, MissPolicy, OutputMode, OverlayConfig};
pub use dwell::DwellTimer;
pub use estimator::{EstimatorState, GazeEstimator};
pub use measurements::{gaze_ratio, FaceMeasurements};
pub use rules::{
    DecisionRule, DisplacementPitchRule, DisplacementRule, GazeRule, GazeSignal, RatioRule,
};
pub use smoothing::ExponentialFilter;
