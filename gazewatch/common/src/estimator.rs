use api::{EyeCenters, GazeResult, LandmarkSet};
use glam::Vec2;
use log::{debug, info, warn};

use crate::baseline::AdaptiveBaseline;
use crate::config::{GazeConfig, MissPolicy};
use crate::dwell::DwellTimer;
use crate::measurements::FaceMeasurements;
use crate::rules::{DecisionRule, GazeSignal};
use crate::smoothing::ExponentialFilter;

/// Everything the estimator carries from one frame to the next.
/// A default value is the fully unset state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimatorState {
    eye_baseline: AdaptiveBaseline,
    pitch_baseline: AdaptiveBaseline,
    left_center: ExponentialFilter,
    right_center: ExponentialFilter,
    dwell: DwellTimer,
    alarm_active: bool,
}

impl EstimatorState {
    pub fn baseline_eye_y(&self) -> Option<f32> {
        self.eye_baseline.value()
    }

    pub fn baseline_pitch(&self) -> Option<f32> {
        self.pitch_baseline.value()
    }

    pub fn smoothed_left_center(&self) -> Option<Vec2> {
        self.left_center.value()
    }

    pub fn smoothed_right_center(&self) -> Option<Vec2> {
        self.right_center.value()
    }

    pub fn dwell_start(&self) -> Option<f64> {
        self.dwell.started_at()
    }
}

/// Turns per-frame landmarks into a debounced "looking down" signal with a
/// dwell-time alarm.
///
/// Call [`update`](Self::update) once per frame with non-decreasing timestamps.
pub struct GazeEstimator {
    config: GazeConfig,
    state: EstimatorState,
}

impl GazeEstimator {
    pub fn new(config: GazeConfig) -> Self {
        let config = config.sanitized();
        info!(
            "Gaze estimator using {} rule, dwell threshold {:.1}s, miss policy {:?}",
            config.rule.name(),
            config.dwell_threshold_secs,
            config.miss_policy
        );
        Self {
            config,
            state: EstimatorState::default(),
        }
    }

    pub fn config(&self) -> &GazeConfig {
        &self.config
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = EstimatorState::default();
    }

    pub fn update(&mut self, landmarks: Option<&LandmarkSet>, now: f64) -> GazeResult {
        let Some(landmarks) = landmarks else {
            return self.on_missing_face(now);
        };

        let measured = FaceMeasurements::from_landmarks(landmarks);
        let alpha = self.config.smoothing_alpha;
        let smoothed = EyeCenters {
            left: self.state.left_center.filter(measured.eye_centers.left, alpha),
            right: self.state.right_center.filter(measured.eye_centers.right, alpha),
        };

        let eye_center_y = if self.config.rule.uses_smoothed_centers() {
            smoothed.mean_y()
        } else {
            measured.eye_centers.mean_y()
        };

        if !self.state.eye_baseline.is_seeded() {
            debug!(
                "Seeding baselines: eye y {:.1}, pitch {:.1}",
                eye_center_y, measured.pitch
            );
        }

        let dead_zone = self.config.dead_zone;
        let rate = self.config.drift_rate;
        let signal = GazeSignal {
            eye_displacement: self.state.eye_baseline.observe(eye_center_y, dead_zone, rate),
            pitch_displacement: -self.state.pitch_baseline.observe(measured.pitch, dead_zone, rate),
            gaze_ratio: measured.gaze_ratio,
        };

        let looking_down = self.config.rule.is_looking_down(&signal);
        let elapsed = self.state.dwell.update(looking_down, now);
        let alarm = looking_down
            && self
                .config
                .alarm_boundary
                .is_reached(elapsed, self.config.dwell_threshold_secs);
        self.track_alarm(alarm, elapsed);

        #[cfg(feature = "xtralog")]
        log::trace!(
            "t={:.3} eye_disp={:.2} pitch_disp={:.2} ratio={:.3} down={} elapsed={:.2}",
            now,
            signal.eye_displacement,
            signal.pitch_displacement,
            signal.gaze_ratio,
            looking_down,
            elapsed
        );

        GazeResult {
            looking_down,
            elapsed_seconds: elapsed,
            alarm,
            eye_centers: Some(smoothed),
            eye_displacement: signal.eye_displacement,
            pitch_displacement: signal.pitch_displacement,
        }
    }

    fn on_missing_face(&mut self, now: f64) -> GazeResult {
        if self.config.miss_policy == MissPolicy::Clear {
            self.state.dwell.clear(now);
        }
        self.track_alarm(false, 0.0);
        GazeResult::default()
    }

    fn track_alarm(&mut self, alarm: bool, elapsed: f64) {
        if alarm && !self.state.alarm_active {
            warn!("Looking down for {:.1}s, raising alarm", elapsed);
        } else if !alarm && self.state.alarm_active {
            info!("Alarm cleared");
        }
        self.state.alarm_active = alarm;
    }
}
