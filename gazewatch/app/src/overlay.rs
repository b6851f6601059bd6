//! Placement of the eye close-ups and the alert text on the output frame.
//!
//! Only geometry is computed here; the renderer does the cropping, scaling
//! and drawing.

use common::{GazeResult, OverlayConfig};
use glam::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayLayout {
    /// Source regions to cut out of the camera frame.
    pub left_crop: Option<Rect>,
    pub right_crop: Option<Rect>,
    /// Where the scaled crops are pasted.
    pub left_target: Rect,
    pub right_target: Rect,
    /// Alert text origin, present while the alarm is active.
    pub alert_anchor: Option<(u32, u32)>,
}

/// Crop box of `2 * half_width` by `2 * half_height` around `center`,
/// clipped to the frame. `None` when nothing of it lies inside the frame.
pub fn eye_crop(
    center: Vec2,
    half_width: u32,
    half_height: u32,
    frame_width: u32,
    frame_height: u32,
) -> Option<Rect> {
    if !center.is_finite() {
        return None;
    }

    let cx = center.x as i64;
    let cy = center.y as i64;
    let (hw, hh) = (half_width as i64, half_height as i64);
    let (fw, fh) = (frame_width as i64, frame_height as i64);

    let x0 = (cx - hw).clamp(0, fw);
    let x1 = (cx + hw).clamp(0, fw);
    let y0 = (cy - hh).clamp(0, fh);
    let y1 = (cy + hh).clamp(0, fh);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(Rect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Keeps the last usable eye crops so overlays stay up through frames
/// without a face.
pub struct OverlayTracker {
    config: OverlayConfig,
    left_crop: Option<Rect>,
    right_crop: Option<Rect>,
}

impl OverlayTracker {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            left_crop: None,
            right_crop: None,
        }
    }

    pub fn update(&mut self, result: &GazeResult, width: u32, height: u32) -> OverlayLayout {
        let c = &self.config;

        if let Some(centers) = result.eye_centers {
            let crop = |center| {
                eye_crop(
                    center,
                    c.eye_crop_half_width,
                    c.eye_crop_half_height,
                    width,
                    height,
                )
            };
            if let Some(rect) = crop(centers.left) {
                self.left_crop = Some(rect);
            }
            if let Some(rect) = crop(centers.right) {
                self.right_crop = Some(rect);
            }
        }

        let left_target = Rect {
            x: c.margin,
            y: c.margin,
            width: c.target_width,
            height: c.target_height,
        };
        let right_target = Rect {
            x: width.saturating_sub(c.margin + c.target_width),
            ..left_target
        };

        let alert_anchor = result.alarm.then(|| {
            (
                (width as f32 * c.alert_anchor[0]) as u32,
                (height as f32 * c.alert_anchor[1]) as u32,
            )
        });

        OverlayLayout {
            left_crop: self.left_crop,
            right_crop: self.right_crop,
            left_target,
            right_target,
            alert_anchor,
        }
    }

    pub fn reset(&mut self) {
        self.left_crop = None;
        self.right_crop = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_inside_frame() {
        let rect = eye_crop(Vec2::new(200.0, 150.0), 80, 60, 640, 480).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 120,
                y: 90,
                width: 160,
                height: 120
            }
        );
    }

    #[test]
    fn crop_clipped_at_edges() {
        let rect = eye_crop(Vec2::new(30.5, 470.9), 80, 60, 640, 480).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 0,
                y: 410,
                width: 110,
                height: 70
            }
        );
    }

    #[test]
    fn crop_outside_frame_is_none() {
        assert_eq!(eye_crop(Vec2::new(-200.0, 100.0), 80, 60, 640, 480), None);
        assert_eq!(eye_crop(Vec2::new(f32::NAN, 100.0), 80, 60, 640, 480), None);
    }
}
