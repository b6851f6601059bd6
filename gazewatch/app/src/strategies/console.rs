use anyhow::Result;
use log::{debug, info, warn};

use super::StatusSink;
use crate::status::{GazeStatus, StatusKind};

/// Human-readable log output: one line per status change, plus a running
/// timer once per second while the user is looking down.
pub struct ConsoleStrategy {
    last_status: Option<StatusKind>,
    last_reported_second: Option<u64>,
}

impl ConsoleStrategy {
    pub fn new() -> Self {
        Self {
            last_status: None,
            last_reported_second: None,
        }
    }

    pub fn describe(status: &GazeStatus) -> String {
        match status.status {
            StatusKind::LookingDown => format!("Looking Down: {:.1}s", status.elapsed_seconds),
            StatusKind::Distracted => {
                format!("ALERT: looking down for {:.1}s", status.elapsed_seconds)
            }
            other => other.label().to_string(),
        }
    }
}

impl Default for ConsoleStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ConsoleStrategy {
    fn initialize(&mut self) -> Result<()> {
        info!("Reporting gaze status to the log");
        Ok(())
    }

    fn send(&mut self, status: &GazeStatus) -> Result<()> {
        let changed = self.last_status != Some(status.status);
        self.last_status = Some(status.status);

        let second = status.elapsed_seconds as u64;
        let new_second = status.looking_down && self.last_reported_second != Some(second);
        self.last_reported_second = status.looking_down.then_some(second);

        if changed || new_second {
            let line = Self::describe(status);
            if status.alarm {
                warn!("{}", line);
            } else {
                info!("{}", line);
            }
        } else {
            debug!("{}", Self::describe(status));
        }
        Ok(())
    }
}
