use log::debug;

/// Tracks how long the down-gaze condition has held without interruption.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DwellTimer {
    started_at: Option<f64>,
}

impl DwellTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the run on the first active frame, clears it on an inactive one.
    /// Returns the elapsed seconds of the current run, `0.0` when inactive.
    pub fn update(&mut self, active: bool, now: f64) -> f64 {
        if !active {
            self.clear(now);
            return 0.0;
        }

        let start = *self.started_at.get_or_insert_with(|| {
            debug!("Down-gaze run started at {:.3}s", now);
            now
        });
        (now - start).max(0.0)
    }

    pub fn clear(&mut self, now: f64) {
        if let Some(start) = self.started_at.take() {
            debug!("Down-gaze run ended after {:.1}s", (now - start).max(0.0));
        }
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
