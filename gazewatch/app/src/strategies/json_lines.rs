use anyhow::{Context, Result};
use log::info;
use std::io::{BufWriter, Write};

use super::StatusSink;
use crate::status::GazeStatus;

/// Writes one JSON object per frame, for a front end polling or tailing the stream.
pub struct JsonLinesStrategy {
    writer: Box<dyn Write + Send>,
}

impl JsonLinesStrategy {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(BufWriter::new(std::io::stdout()))
    }
}

impl StatusSink for JsonLinesStrategy {
    fn initialize(&mut self) -> Result<()> {
        info!("Writing gaze status as JSON Lines");
        Ok(())
    }

    fn send(&mut self, status: &GazeStatus) -> Result<()> {
        serde_json::to_writer(&mut self.writer, status).context("Failed to serialize status")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush().context("Failed to flush status")?;
        Ok(())
    }
}
