use glam::Vec2;

/// First-order low-pass over 2D positions.
///
/// `alpha` is the weight kept from the previous output, so values close to 1
/// smooth harder. The first sample passes through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExponentialFilter {
    value: Option<Vec2>,
}

impl ExponentialFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn low_pass(prev: Vec2, x: Vec2, alpha: f32) -> Vec2 {
        alpha * prev + (1.0 - alpha) * x
    }

    pub fn filter(&mut self, x: Vec2, alpha: f32) -> Vec2 {
        if !x.is_finite() {
            return self.value.unwrap_or(Vec2::ZERO);
        }

        let hat_x = match self.value {
            Some(prev) => Self::low_pass(prev, x, alpha),
            None => x,
        };
        self.value = Some(hat_x);
        hat_x
    }

    pub fn value(&self) -> Option<Vec2> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_passes_through() {
        let mut f = ExponentialFilter::new();
        assert_eq!(f.filter(Vec2::new(10.0, 20.0), 0.7), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn keeps_alpha_of_previous() {
        let mut f = ExponentialFilter::new();
        f.filter(Vec2::new(100.0, 100.0), 0.7);
        let out = f.filter(Vec2::new(110.0, 90.0), 0.7);
        assert!((out.x - 103.0).abs() < 1e-4);
        assert!((out.y - 97.0).abs() < 1e-4);
    }

    #[test]
    fn non_finite_input_holds_last_value() {
        let mut f = ExponentialFilter::new();
        assert_eq!(f.filter(Vec2::new(f32::NAN, 0.0), 0.7), Vec2::ZERO);
        assert_eq!(f.value(), None);

        f.filter(Vec2::ONE, 0.7);
        assert_eq!(f.filter(Vec2::new(f32::INFINITY, 1.0), 0.7), Vec2::ONE);
    }
}
