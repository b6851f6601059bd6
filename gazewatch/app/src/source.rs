//! Landmark frames recorded as JSON Lines, one object per captured frame:
//!
//! ```json
//! {"timestamp_ms": 1712, "width": 640, "height": 480, "landmarks": [[0.41, 0.38], ...]}
//! ```
//!
//! `landmarks` is `null` (or absent) on frames where the model found no face.
//! Coordinates are normalized unless `"normalized": false` is given. Lines
//! whose consulted landmarks are not finite are skipped like malformed ones.

use anyhow::{Context, Result};
use api::{LandmarkFrame, LandmarkProvider, LandmarkSet};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

#[derive(Debug, Deserialize)]
struct FrameRecord {
    timestamp_ms: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    landmarks: Option<LandmarkSet>,
    #[serde(default = "default_normalized")]
    normalized: bool,
}

fn default_normalized() -> bool {
    true
}

pub struct JsonLinesSource {
    reader: Box<dyn BufRead + Send>,
    label: String,
    line_no: usize,
    last_timestamp_ms: Option<u64>,
    skipped: usize,
}

impl JsonLinesSource {
    pub fn new(reader: impl BufRead + Send + 'static, label: impl Into<String>) -> Self {
        Self {
            reader: Box::new(reader),
            label: label.into(),
            line_no: 0,
            last_timestamp_ms: None,
            skipped: 0,
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }

    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()), "stdin")
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn parse(line: &str) -> Result<LandmarkFrame> {
        let record: FrameRecord = serde_json::from_str(line)?;
        let landmarks = match record.landmarks {
            Some(set) if record.normalized => Some(set.to_pixels(record.width, record.height)?),
            other => other,
        };
        Ok(LandmarkFrame {
            timestamp_ms: record.timestamp_ms,
            width: record.width,
            height: record.height,
            landmarks,
        })
    }
}

impl LandmarkProvider for JsonLinesSource {
    fn initialize(&mut self) -> Result<()> {
        info!("Reading landmark frames from {}", self.label);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("Failed to read {}", self.label))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match Self::parse(trimmed) {
                Ok(frame) => {
                    if let Some(last) = self.last_timestamp_ms {
                        if frame.timestamp_ms < last {
                            warn!(
                                "{}:{}: timestamp {} earlier than previous {}",
                                self.label, self.line_no, frame.timestamp_ms, last
                            );
                        }
                    }
                    self.last_timestamp_ms = Some(frame.timestamp_ms);
                    return Ok(Some(frame));
                }
                Err(e) => {
                    self.skipped += 1;
                    warn!("{}:{}: skipping frame: {}", self.label, self.line_no, e);
                }
            }
        }
    }

    fn unload(&mut self) {
        debug!(
            "Closed {} after {} lines ({} skipped)",
            self.label, self.line_no, self.skipped
        );
    }
}

/// Pulls frames from `source` on its own thread.
///
/// Reading stdin blocks until a line or EOF arrives, so the main loop waits
/// on the returned channel with a timeout and stays responsive to Ctrl-C.
/// The channel disconnects once the source ends or fails.
pub fn spawn_reader(
    mut source: Box<dyn LandmarkProvider + Send>,
) -> Result<(Receiver<LandmarkFrame>, JoinHandle<()>)> {
    let (tx, rx) = sync_channel::<LandmarkFrame>(1);
    let handle = thread::Builder::new()
        .name("landmark-reader".into())
        .spawn(move || {
            loop {
                match source.next_frame() {
                    Ok(Some(frame)) => {
                        if tx.send(frame).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("Landmark stream ended");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read landmark frame: {:#}", e);
                        break;
                    }
                }
            }
            source.unload();
        })
        .context("Failed to spawn landmark reader thread")?;
    Ok((rx, handle))
}
