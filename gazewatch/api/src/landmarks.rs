//! Fixed-index face landmark layout.
//!
//! Indices follow the MediaPipe FaceLandmarker topology (468 face mesh points
//! followed by 10 iris points). Only the handful listed in [`Landmark`] are
//! ever consulted.

use anyhow::{bail, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    Forehead = 10,
    LeftEyeOuter = 33,
    LeftEyeInner = 133,
    LowerLid = 145,
    Chin = 152,
    UpperLid = 159,
    RightEyeInner = 263,
    RightEyeOuter = 362,
    IrisCenter = 468,
}

impl Landmark {
    pub const ALL: [Landmark; 9] = [
        Landmark::Forehead,
        Landmark::LeftEyeOuter,
        Landmark::LeftEyeInner,
        Landmark::LowerLid,
        Landmark::Chin,
        Landmark::UpperLid,
        Landmark::RightEyeInner,
        Landmark::RightEyeOuter,
        Landmark::IrisCenter,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Smallest point count that covers every consulted [`Landmark`].
pub const REQUIRED_LANDMARKS: usize = Landmark::IrisCenter as usize + 1;

/// Number of points the face landmarker reports with iris refinement enabled.
pub const FACE_LANDMARK_COUNT: usize = 478;

/// One face worth of landmarks for a single frame.
///
/// Construction checks the point count and that every consulted [`Landmark`]
/// is finite, so indexing by [`Landmark`] never goes out of bounds or yields
/// NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct LandmarkSet {
    points: Vec<Vec2>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        if points.len() < REQUIRED_LANDMARKS {
            bail!(
                "Landmark set has {} points, at least {} required",
                points.len(),
                REQUIRED_LANDMARKS
            );
        }
        for landmark in Landmark::ALL {
            let p = points[landmark.index()];
            if !p.is_finite() {
                bail!("Landmark {:?} is not finite: {}", landmark, p);
            }
        }
        Ok(Self { points })
    }

    pub fn get(&self, landmark: Landmark) -> Vec2 {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scales normalized `[0, 1]` coordinates into pixel space.
    ///
    /// Fails when scaling overflows a consulted landmark.
    pub fn to_pixels(&self, width: u32, height: u32) -> Result<Self> {
        let scale = Vec2::new(width as f32, height as f32);
        Self::new(self.points.iter().map(|p| *p * scale).collect())
    }
}

impl TryFrom<Vec<Vec2>> for LandmarkSet {
    type Error = anyhow::Error;

    fn try_from(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Vec2> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_sets() {
        let err = LandmarkSet::new(vec![Vec2::ZERO; 468]).unwrap_err();
        assert!(err.to_string().contains("469"));
    }

    #[test]
    fn every_landmark_is_covered() {
        for lm in Landmark::ALL {
            assert!(lm.index() < REQUIRED_LANDMARKS);
        }
        assert!(REQUIRED_LANDMARKS <= FACE_LANDMARK_COUNT);
    }

    #[test]
    fn pixel_scaling() {
        let mut points = vec![Vec2::ZERO; FACE_LANDMARK_COUNT];
        points[Landmark::Chin.index()] = Vec2::new(0.5, 0.25);
        let set = LandmarkSet::new(points).unwrap().to_pixels(640, 480).unwrap();
        assert_eq!(set.get(Landmark::Chin), Vec2::new(320.0, 120.0));
    }

    #[test]
    fn rejects_non_finite_consulted_points() {
        let mut points = vec![Vec2::ZERO; FACE_LANDMARK_COUNT];
        points[Landmark::LeftEyeInner.index()] = Vec2::new(0.4, f32::INFINITY);
        let err = LandmarkSet::new(points.clone()).unwrap_err();
        assert!(err.to_string().contains("LeftEyeInner"));

        points[Landmark::LeftEyeInner.index()] = Vec2::new(f32::NAN, 0.4);
        assert!(LandmarkSet::new(points.clone()).is_err());

        // unconsulted points are not checked
        points[Landmark::LeftEyeInner.index()] = Vec2::new(0.4, 0.4);
        points[0] = Vec2::splat(f32::NAN);
        assert!(LandmarkSet::new(points).is_ok());
    }

    #[test]
    fn scaling_overflow_is_rejected() {
        let mut points = vec![Vec2::ZERO; FACE_LANDMARK_COUNT];
        points[Landmark::Chin.index()] = Vec2::new(0.5, f32::MAX);
        let set = LandmarkSet::new(points).unwrap();
        assert!(set.to_pixels(640, 480).is_err());
    }

    #[test]
    fn deserialize_rejects_overflowing_numbers() {
        let mut points = vec![[0.5f64, 0.5f64]; REQUIRED_LANDMARKS];
        points[Landmark::Chin.index()][1] = 1e39;
        let json = serde_json::to_string(&points).unwrap();
        assert!(serde_json::from_str::<LandmarkSet>(&json).is_err());
    }

    #[test]
    fn deserialize_validates_length() {
        let short: Result<LandmarkSet, _> = serde_json::from_str("[[0.1, 0.2]]");
        assert!(short.is_err());

        let json = serde_json::to_string(&vec![[0.5f32, 0.5f32]; REQUIRED_LANDMARKS]).unwrap();
        let set: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.len(), REQUIRED_LANDMARKS);
    }
}
