use api::{EyeCenters, Landmark, LandmarkSet};

/// Raw per-frame geometry read off a landmark set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMeasurements {
    /// Midpoint of each eye's inner and outer corner.
    pub eye_centers: EyeCenters,
    /// Forehead-to-chin vertical distance, used as a head-pitch proxy.
    pub pitch: f32,
    pub gaze_ratio: f32,
}

impl FaceMeasurements {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let left =
            (landmarks.get(Landmark::LeftEyeOuter) + landmarks.get(Landmark::LeftEyeInner)) * 0.5;
        let right =
            (landmarks.get(Landmark::RightEyeOuter) + landmarks.get(Landmark::RightEyeInner)) * 0.5;

        Self {
            eye_centers: EyeCenters { left, right },
            pitch: landmarks.get(Landmark::Chin).y - landmarks.get(Landmark::Forehead).y,
            gaze_ratio: gaze_ratio(landmarks),
        }
    }
}

/// Iris offset below the lid midpoint, as a fraction of the lid gap.
/// A closed or collapsed eye yields `0.0`.
pub fn gaze_ratio(landmarks: &LandmarkSet) -> f32 {
    let top = landmarks.get(Landmark::UpperLid).y;
    let bottom = landmarks.get(Landmark::LowerLid).y;
    let iris = landmarks.get(Landmark::IrisCenter).y;

    let eye_height = bottom - top;
    if eye_height == 0.0 || !eye_height.is_finite() {
        return 0.0;
    }

    (iris - (top + bottom) / 2.0) / eye_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::FACE_LANDMARK_COUNT;
    use glam::Vec2;

    fn face(edit: impl FnOnce(&mut Vec<Vec2>)) -> LandmarkSet {
        let mut points = vec![Vec2::ZERO; FACE_LANDMARK_COUNT];
        edit(&mut points);
        LandmarkSet::new(points).unwrap()
    }

    #[test]
    fn eye_centers_and_pitch() {
        let set = face(|p| {
            p[Landmark::LeftEyeOuter.index()] = Vec2::new(100.0, 200.0);
            p[Landmark::LeftEyeInner.index()] = Vec2::new(140.0, 204.0);
            p[Landmark::RightEyeInner.index()] = Vec2::new(200.0, 198.0);
            p[Landmark::RightEyeOuter.index()] = Vec2::new(240.0, 202.0);
            p[Landmark::Forehead.index()] = Vec2::new(170.0, 120.0);
            p[Landmark::Chin.index()] = Vec2::new(170.0, 330.0);
        });
        let m = FaceMeasurements::from_landmarks(&set);
        assert_eq!(m.eye_centers.left, Vec2::new(120.0, 202.0));
        assert_eq!(m.eye_centers.right, Vec2::new(220.0, 200.0));
        assert_eq!(m.eye_centers.mean_y(), 201.0);
        assert_eq!(m.pitch, 210.0);
    }

    #[test]
    fn ratio_of_lowered_iris() {
        let set = face(|p| {
            p[Landmark::UpperLid.index()] = Vec2::new(0.4, 0.40);
            p[Landmark::LowerLid.index()] = Vec2::new(0.4, 0.44);
            p[Landmark::IrisCenter.index()] = Vec2::new(0.4, 0.428);
        });
        assert!((gaze_ratio(&set) - 0.2).abs() < 1e-3);
    }

    #[test]
    fn zero_eye_height_is_neutral() {
        let set = face(|p| {
            p[Landmark::UpperLid.index()] = Vec2::new(0.4, 0.42);
            p[Landmark::LowerLid.index()] = Vec2::new(0.4, 0.42);
            p[Landmark::IrisCenter.index()] = Vec2::new(0.4, 0.50);
        });
        assert_eq!(gaze_ratio(&set), 0.0);
    }
}
