use common::{GazeConfig, GazeEstimator, LandmarkFrame};

use crate::overlay::OverlayTracker;
use crate::status::GazeStatus;

/// Per-frame processing shared by the binary and the tests.
pub struct GazePipeline {
    estimator: GazeEstimator,
    overlay: OverlayTracker,
}

impl GazePipeline {
    pub fn new(config: GazeConfig) -> Self {
        Self {
            overlay: OverlayTracker::new(config.overlay.clone()),
            estimator: GazeEstimator::new(config),
        }
    }

    pub fn process(&mut self, frame: &LandmarkFrame) -> GazeStatus {
        let result = self
            .estimator
            .update(frame.landmarks.as_ref(), frame.timestamp_secs());
        let layout = self.overlay.update(&result, frame.width, frame.height);
        GazeStatus::new(frame, &result, layout)
    }

    pub fn estimator(&self) -> &GazeEstimator {
        &self.estimator
    }

    pub fn reset(&mut self) {
        self.estimator.reset();
        self.overlay.reset();
    }
}
