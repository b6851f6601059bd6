use log::warn;
use serde::{Deserialize, Serialize};

/// Measurements a decision rule sees for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GazeSignal {
    /// Eye center y minus its baseline; positive is further down the frame.
    pub eye_displacement: f32,
    /// Pitch baseline minus the current forehead-to-chin height; positive
    /// when the face foreshortens as the head tips forward.
    pub pitch_displacement: f32,
    /// Iris offset below the lid midpoint relative to eye height.
    pub gaze_ratio: f32,
}

pub trait DecisionRule {
    fn name(&self) -> &str;

    fn is_looking_down(&self, signal: &GazeSignal) -> bool;

    /// Whether the eye displacement should come from smoothed eye centers
    /// rather than this frame's raw corners.
    fn uses_smoothed_centers(&self) -> bool {
        false
    }
}

/// Iris position inside the eye opening.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatioRule {
    pub threshold: f32,
}

impl Default for RatioRule {
    fn default() -> Self {
        Self { threshold: 0.15 }
    }
}

impl DecisionRule for RatioRule {
    fn name(&self) -> &str {
        "Ratio"
    }

    fn is_looking_down(&self, signal: &GazeSignal) -> bool {
        signal.gaze_ratio > self.threshold
    }
}

/// Eye drop relative to the baseline alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplacementRule {
    pub threshold: f32,
}

impl Default for DisplacementRule {
    fn default() -> Self {
        Self { threshold: 20.0 }
    }
}

impl DecisionRule for DisplacementRule {
    fn name(&self) -> &str {
        "Displacement"
    }

    fn is_looking_down(&self, signal: &GazeSignal) -> bool {
        signal.eye_displacement > self.threshold
    }

    fn uses_smoothed_centers(&self) -> bool {
        true
    }
}

/// A large eye drop on its own, or a moderate one backed by head pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplacementPitchRule {
    pub hard_threshold: f32,
    pub soft_threshold: f32,
    pub pitch_threshold: f32,
}

impl Default for DisplacementPitchRule {
    fn default() -> Self {
        Self {
            hard_threshold: 18.0,
            soft_threshold: 10.0,
            pitch_threshold: 4.0,
        }
    }
}

impl DecisionRule for DisplacementPitchRule {
    fn name(&self) -> &str {
        "DisplacementPitch"
    }

    fn is_looking_down(&self, signal: &GazeSignal) -> bool {
        signal.eye_displacement > self.hard_threshold
            || (signal.eye_displacement > self.soft_threshold
                && signal.pitch_displacement > self.pitch_threshold)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum GazeRule {
    Ratio(RatioRule),
    Displacement(DisplacementRule),
    DisplacementPitch(DisplacementPitchRule),
}

impl Default for GazeRule {
    fn default() -> Self {
        Self::DisplacementPitch(DisplacementPitchRule::default())
    }
}

impl GazeRule {
    pub(crate) fn sanitized(self) -> Self {
        match self {
            Self::Ratio(mut r) => {
                r.threshold = non_negative("ratio threshold", r.threshold, 0.15);
                Self::Ratio(r)
            }
            Self::Displacement(mut r) => {
                r.threshold = non_negative("displacement threshold", r.threshold, 20.0);
                Self::Displacement(r)
            }
            Self::DisplacementPitch(mut r) => {
                let defaults = DisplacementPitchRule::default();
                r.hard_threshold =
                    non_negative("hard_threshold", r.hard_threshold, defaults.hard_threshold);
                r.soft_threshold =
                    non_negative("soft_threshold", r.soft_threshold, defaults.soft_threshold);
                r.pitch_threshold =
                    non_negative("pitch_threshold", r.pitch_threshold, defaults.pitch_threshold);
                Self::DisplacementPitch(r)
            }
        }
    }
}

fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{} {} invalid, using {}", name, value, fallback);
        fallback
    }
}

impl DecisionRule for GazeRule {
    fn name(&self) -> &str {
        match self {
            Self::Ratio(r) => r.name(),
            Self::Displacement(r) => r.name(),
            Self::DisplacementPitch(r) => r.name(),
        }
    }

    fn is_looking_down(&self, signal: &GazeSignal) -> bool {
        match self {
            Self::Ratio(r) => r.is_looking_down(signal),
            Self::Displacement(r) => r.is_looking_down(signal),
            Self::DisplacementPitch(r) => r.is_looking_down(signal),
        }
    }

    fn uses_smoothed_centers(&self) -> bool {
        match self {
            Self::Ratio(r) => r.uses_smoothed_centers(),
            Self::Displacement(r) => r.uses_smoothed_centers(),
            Self::DisplacementPitch(r) => r.uses_smoothed_centers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(eye: f32, pitch: f32) -> GazeSignal {
        GazeSignal {
            eye_displacement: eye,
            pitch_displacement: pitch,
            gaze_ratio: 0.0,
        }
    }

    #[test]
    fn soft_threshold_needs_pitch() {
        let rule = DisplacementPitchRule::default();
        assert!(!rule.is_looking_down(&signal(12.0, 0.0)));
        assert!(rule.is_looking_down(&signal(12.0, 5.0)));
        assert!(!rule.is_looking_down(&signal(10.0, 5.0)));
        assert!(rule.is_looking_down(&signal(18.5, -3.0)));
    }

    #[test]
    fn tagged_config_round_trip() {
        let json = r#"{"kind":"Displacement","threshold":25.0}"#;
        let rule: GazeRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, GazeRule::Displacement(DisplacementRule { threshold: 25.0 }));
        assert!(rule.uses_smoothed_centers());

        let partial: GazeRule = serde_json::from_str(r#"{"kind":"Ratio"}"#).unwrap();
        assert_eq!(partial, GazeRule::Ratio(RatioRule { threshold: 0.15 }));
    }

    #[test]
    fn negative_thresholds_fall_back() {
        let rule = GazeRule::Displacement(DisplacementRule { threshold: -1.0 }).sanitized();
        assert_eq!(rule, GazeRule::Displacement(DisplacementRule::default()));
    }
}
