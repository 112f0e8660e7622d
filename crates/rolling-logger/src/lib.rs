//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to stderr and to a size-capped
//! log file. When the file grows past its limit it is rotated to
//! `<app>.1.log`, `<app>.2.log`, ... and the oldest file is dropped.
//! Records emitted through the `log` facade are bridged into `tracing`.
//!
//! Each writer also keeps its most recent lines in a bounded in-memory ring.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::{self, format, time::FormatTime, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOGGER: OnceLock<RollingFileWriter> = OnceLock::new();

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy)]
pub struct RollingConfig {
    /// Rotate once the active file would exceed this many bytes
    pub max_bytes: u64,
    /// Number of rotated files kept next to the active one
    pub max_files: usize,
    /// Lines kept in the in-memory ring
    pub buffer_lines: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_files: 3,
            buffer_lines: 500,
        }
    }
}

struct RollingState {
    dir: PathBuf,
    app_name: String,
    config: RollingConfig,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    partial: String,
}

/// Shared handle to the active log file.
///
/// Cloning is cheap; every clone appends to the same file.
#[derive(Clone)]
pub struct RollingFileWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingFileWriter {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str, config: RollingConfig) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let path = log_path(&dir, app_name, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir,
                app_name: app_name.to_string(),
                config,
                file,
                written,
                recent: VecDeque::with_capacity(config.buffer_lines),
                partial: String::new(),
            })),
        })
    }

    /// Path of the file currently written to
    pub fn current_path(&self) -> PathBuf {
        match self.state.lock() {
            Ok(state) => log_path(&state.dir, &state.app_name, 0),
            Err(poisoned) => {
                let state = poisoned.into_inner();
                log_path(&state.dir, &state.app_name, 0)
            }
        }
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl RollingState {
    fn append(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.config.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let max = self.config.max_files;
        if max == 0 {
            fs::remove_file(log_path(&self.dir, &self.app_name, 0))?;
        } else {
            let oldest = log_path(&self.dir, &self.app_name, max);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..max).rev() {
                let from = log_path(&self.dir, &self.app_name, index);
                if from.exists() {
                    fs::rename(&from, log_path(&self.dir, &self.app_name, index + 1))?;
                }
            }
            fs::rename(
                log_path(&self.dir, &self.app_name, 0),
                log_path(&self.dir, &self.app_name, 1),
            )?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path(&self.dir, &self.app_name, 0))?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.config.buffer_lines == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(end) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=end).collect();
            self.recent.push_back(line.trim_end().to_string());
            while self.recent.len() > self.config.buffer_lines {
                self.recent.pop_front();
            }
        }
    }
}

fn log_path(dir: &Path, app_name: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", app_name))
    } else {
        dir.join(format!("{}.{}.log", app_name, index))
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut format::Writer<'_>) -> std::fmt::Result {
        use std::fmt::Write as _;
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, config: RollingConfig) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".to_string());
    }

    let writer = RollingFileWriter::new(&log_dir, app_name, config)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(LocalTimer).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_writer(writer.clone()),
        )
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    LOGGER
        .set(writer)
        .map_err(|_| "Logger already initialized".to_string())?;

    log::info!("Logging to {}", log_dir.display());
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "Logger not initialized".to_string())
}

pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}
