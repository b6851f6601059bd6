use anyhow::Result;
use common::{GazeConfig, LandmarkProvider};
use gazewatch::pipeline::GazePipeline;
use gazewatch::source::{self, JsonLinesSource};
use gazewatch::strategies::{self, StatusSink};
use log::{debug, error, info, trace, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const STATS_INTERVAL: Duration = Duration::from_secs(30);

struct Args {
    config_path: PathBuf,
    input: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: PathBuf::from("config.json"),
        input: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => match iter.next() {
                Some(path) => args.config_path = PathBuf::from(path),
                None => warn!("--config needs a path, keeping {:?}", args.config_path),
            },
            "-" => args.input = None,
            other if other.starts_with("--") => warn!("Ignoring unknown option {}", other),
            other => args.input = Some(PathBuf::from(other)),
        }
    }
    args
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    info!("Starting...");
    debug!("Debug logging is active");
    trace!("Trace logging is active");

    let args = parse_args();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl-C, shutting down...");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let config = GazeConfig::load_or_create(&args.config_path).unwrap_or_else(|e| {
        error!("Failed to load config: {:#}. Using defaults.", e);
        GazeConfig::default()
    });
    info!("Loaded Config: {:?}", config);

    let mut source: Box<dyn LandmarkProvider + Send> = match &args.input {
        Some(path) => Box::new(JsonLinesSource::open(Path::new(path))?),
        None => Box::new(JsonLinesSource::stdin()),
    };
    source.initialize()?;

    let mut output = strategies::create_strategy(&config);
    if let Err(e) = output.initialize() {
        error!("Failed to initialize output: {}", e);
        return Err(e);
    }
    info!("Output initialized with {:?} strategy.", config.output_mode);

    let min_frame_time = config.max_fps.map(|fps| Duration::from_secs_f32(1.0 / fps));
    let mut pipeline = GazePipeline::new(config);

    // The reader thread is not joined on Ctrl-C: it may be parked on stdin.
    let (frames, _reader) = source::spawn_reader(source)?;

    info!("Entering Main Loop...");

    let mut frame_count: u64 = 0;
    let mut window_frames: u64 = 0;
    let mut window_start = Instant::now();
    let mut next_frame_at = Instant::now();

    while running.load(Ordering::SeqCst) {
        let frame = match frames.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let status = pipeline.process(&frame);
        if let Err(e) = output.send(&status) {
            error!("Failed to send gaze status: {:#}", e);
        }

        frame_count += 1;
        window_frames += 1;
        let window = window_start.elapsed();
        if window >= STATS_INTERVAL {
            info!(
                "Processed {} frames so far ({:.1} FPS over the last {}s)",
                frame_count,
                window_frames as f32 / window.as_secs_f32(),
                window.as_secs()
            );
            window_frames = 0;
            window_start = Instant::now();
        }

        if let Some(min_frame_time) = min_frame_time {
            next_frame_at += min_frame_time;
            let now = Instant::now();
            if next_frame_at > now {
                thread::sleep(next_frame_at - now);
            } else {
                next_frame_at = now;
            }
        }
    }

    info!("Shutting down after {} frames", frame_count);
    Ok(())
}
