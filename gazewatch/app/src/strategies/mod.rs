pub mod console;
pub mod json_lines;

use anyhow::Result;
use common::{GazeConfig, OutputMode};
use console::ConsoleStrategy;
use json_lines::JsonLinesStrategy;

use crate::status::GazeStatus;

/// Destination for the per-frame status record.
pub trait StatusSink {
    fn initialize(&mut self) -> Result<()>;
    fn send(&mut self, status: &GazeStatus) -> Result<()>;
}

pub enum OutputBackend {
    Json(JsonLinesStrategy),
    Console(ConsoleStrategy),
}

impl StatusSink for OutputBackend {
    fn initialize(&mut self) -> Result<()> {
        match self {
            Self::Json(s) => s.initialize(),
            Self::Console(s) => s.initialize(),
        }
    }

    fn send(&mut self, status: &GazeStatus) -> Result<()> {
        match self {
            Self::Json(s) => s.send(status),
            Self::Console(s) => s.send(status),
        }
    }
}

pub fn create_strategy(config: &GazeConfig) -> OutputBackend {
    match config.output_mode {
        OutputMode::Json => OutputBackend::Json(JsonLinesStrategy::stdout()),
        OutputMode::Console => OutputBackend::Console(ConsoleStrategy::new()),
    }
}
