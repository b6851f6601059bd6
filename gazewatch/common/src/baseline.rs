/// Slowly adapting neutral reference for one scalar measurement.
///
/// Seeded by the first observation. Afterwards it drifts toward the current
/// value only while the displacement stays inside the dead zone, so a
/// sustained excursion is never absorbed into the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdaptiveBaseline {
    value: Option<f32>,
}

impl AdaptiveBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(value: f32) -> Self {
        Self { value: Some(value) }
    }

    /// Returns `current - baseline` as measured before any drift is applied.
    ///
    /// A non-finite `current` leaves the baseline untouched and measures 0.
    pub fn observe(&mut self, current: f32, dead_zone: f32, drift_rate: f32) -> f32 {
        if !current.is_finite() {
            return 0.0;
        }
        let baseline = *self.value.get_or_insert(current);
        let displacement = current - baseline;

        if displacement.abs() < dead_zone {
            self.value = Some((1.0 - drift_rate) * baseline + drift_rate * current);
        }

        displacement
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn is_seeded(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_seeds() {
        let mut b = AdaptiveBaseline::new();
        assert_eq!(b.observe(42.0, 8.0, 0.1), 0.0);
        assert_eq!(b.value(), Some(42.0));
    }

    #[test]
    fn drift_only_inside_dead_zone() {
        let mut b = AdaptiveBaseline::seeded(100.0);
        assert_eq!(b.observe(105.0, 8.0, 0.1), 5.0);
        assert!((b.value().unwrap() - 100.5).abs() < 1e-4);

        let before = b.value();
        b.observe(130.0, 8.0, 0.1);
        assert_eq!(b.value(), before);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut b = AdaptiveBaseline::new();
        assert_eq!(b.observe(f32::INFINITY, 8.0, 0.1), 0.0);
        assert!(!b.is_seeded());

        b.observe(100.0, 8.0, 0.1);
        assert_eq!(b.observe(f32::NAN, 8.0, 0.1), 0.0);
        assert_eq!(b.value(), Some(100.0));
        assert_eq!(b.observe(130.0, 8.0, 0.1), 30.0);
    }

    #[test]
    fn dead_zone_edge_is_exclusive() {
        let mut b = AdaptiveBaseline::seeded(100.0);
        b.observe(108.0, 8.0, 0.1);
        assert_eq!(b.value(), Some(100.0));
        b.observe(92.0, 8.0, 0.1);
        assert_eq!(b.value(), Some(100.0));
    }
}
