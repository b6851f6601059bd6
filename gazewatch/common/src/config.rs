use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::rules::GazeRule;

/// Whether the alarm fires once elapsed time reaches the threshold or only after it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AlarmBoundary {
    /// `elapsed > threshold`
    #[default]
    Exclusive,
    /// `elapsed >= threshold`
    Inclusive,
}

impl AlarmBoundary {
    pub fn is_reached(self, elapsed: f64, threshold: f64) -> bool {
        match self {
            Self::Exclusive => elapsed > threshold,
            Self::Inclusive => elapsed >= threshold,
        }
    }
}

/// What a frame without a detected face does to a running dwell timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Keep the dwell start. A down-gaze that resumes after the miss continues
    /// the same run, with the missed time counted.
    #[default]
    #[serde(alias = "pause", alias = "Hold")]
    Pause,
    /// Treat the miss like a frame where the user was not looking down.
    #[serde(alias = "clear", alias = "Reset")]
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum OutputMode {
    #[serde(alias = "JSON", alias = "JsonLines")]
    #[default]
    Json,
    #[serde(alias = "Log")]
    Console,
}

/// Eye crop and overlay placement, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub eye_crop_half_width: u32,
    pub eye_crop_half_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    /// Distance of each overlay from the top edge and its side edge.
    pub margin: u32,
    /// Alert text anchor as a fraction of frame width and height.
    pub alert_anchor: [f32; 2],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            eye_crop_half_width: 80,
            eye_crop_half_height: 60,
            target_width: 200,
            target_height: 120,
            margin: 20,
            alert_anchor: [0.3, 0.5],
        }
    }
}

/// Missing fields take their value from [`GazeConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GazeConfig {
    pub rule: GazeRule,

    /// Displacement band (pixels) inside which baselines may drift.
    pub dead_zone: f32,
    /// Weight of the current value when a baseline drifts.
    pub drift_rate: f32,
    /// Weight of the previous value when smoothing eye centers.
    pub smoothing_alpha: f32,

    #[serde(alias = "gaze_time_threshold")]
    pub dwell_threshold_secs: f64,
    pub alarm_boundary: AlarmBoundary,
    pub miss_policy: MissPolicy,

    pub overlay: OverlayConfig,

    pub output_mode: OutputMode,
    pub max_fps: Option<f32>,
}

fn default_dead_zone() -> f32 {
    8.0
}

fn default_drift_rate() -> f32 {
    0.1
}

fn default_smoothing_alpha() -> f32 {
    0.7
}

fn default_dwell_threshold() -> f64 {
    5.0
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            rule: GazeRule::default(),
            dead_zone: default_dead_zone(),
            drift_rate: default_drift_rate(),
            smoothing_alpha: default_smoothing_alpha(),
            dwell_threshold_secs: default_dwell_threshold(),
            alarm_boundary: AlarmBoundary::default(),
            miss_policy: MissPolicy::default(),
            overlay: OverlayConfig::default(),
            output_mode: OutputMode::default(),
            max_fps: None,
        }
    }
}

impl GazeConfig {
    /// Reads `path`, or writes the defaults there when it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading config from {:?}", path);
            let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
            let config: GazeConfig = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse {:?}", path))?;
            Ok(config.sanitized())
        } else {
            info!("Config not found. Creating default at {:?}", path);
            let config = GazeConfig::default();
            let file =
                File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &config)
                .context("Failed to serialize default config")?;
            Ok(config)
        }
    }

    /// Replaces out-of-range tunables with their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha < 1.0) {
            warn!(
                "smoothing_alpha {} outside (0, 1), using {}",
                self.smoothing_alpha,
                default_smoothing_alpha()
            );
            self.smoothing_alpha = default_smoothing_alpha();
        }
        if !(self.drift_rate > 0.0 && self.drift_rate <= 1.0) {
            warn!(
                "drift_rate {} outside (0, 1], using {}",
                self.drift_rate,
                default_drift_rate()
            );
            self.drift_rate = default_drift_rate();
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            warn!("dead_zone {} invalid, using {}", self.dead_zone, default_dead_zone());
            self.dead_zone = default_dead_zone();
        }
        if !self.dwell_threshold_secs.is_finite() || self.dwell_threshold_secs < 0.0 {
            warn!(
                "dwell_threshold_secs {} invalid, using {}",
                self.dwell_threshold_secs,
                default_dwell_threshold()
            );
            self.dwell_threshold_secs = default_dwell_threshold();
        }
        if let Some(fps) = self.max_fps {
            if !fps.is_finite() || fps <= 0.0 {
                warn!("max_fps {} ignored", fps);
                self.max_fps = None;
            }
        }
        self.rule = self.rule.sanitized();
        self
    }
}
