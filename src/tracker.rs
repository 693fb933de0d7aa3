/*!
 * Processing tracker: the event log shared across a pipeline run
 *
 * Components never abort a batch because of one bad entry. They record the problem
 * here and carry on. Every call appends to the in-memory log and is forwarded
 * immediately to the enabled sinks (console echo, append-only log file, and the
 * `log` facade). Recording an event never fails.
 */

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use serde::Serialize;
use strum::Display;

use crate::config::Config;

/// Structured context attached to an entry
pub type Context = BTreeMap<String, serde_json::Value>;

/// Severity of a tracker entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error | LogLevel::Critical => log::Level::Error,
        }
    }
}

/// A single recorded event
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
    /// Failure detail, if the event carries one
    pub exception: Option<String>,
    pub context: Context,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp.to_rfc3339(), self.level, self.message)?;
        if let Some(exception) = &self.exception {
            write!(f, "\n  Exception: {}", exception)?;
        }
        Ok(())
    }
}

/// Sinks a tracker forwards entries to
#[derive(Debug, Clone, Default)]
pub struct TrackerOptions {
    /// Print each entry to stderr
    pub echo_console: bool,
    /// Append each entry to this file
    pub log_file: Option<PathBuf>,
}

impl TrackerOptions {
    /// Console echo as requested, log file in the configured output directory
    pub fn from_config(config: &Config, echo_console: bool) -> Self {
        Self {
            echo_console,
            log_file: Some(config.output_dir.join(&config.log_filename)),
        }
    }
}

/// Counts and entries of interest, as serialisable data
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSummary {
    pub total_entries: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<LogEntry>,
    pub warnings: Vec<LogEntry>,
}

#[derive(Default)]
struct TrackerState {
    entries: Vec<LogEntry>,
    errors: Vec<LogEntry>,
    warnings: Vec<LogEntry>,
    log_file: Option<File>,
}

/// Append-only event log, safe to share between threads
pub struct Tracker {
    echo_console: bool,
    state: Mutex<TrackerState>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(TrackerOptions::default())
    }
}

impl Tracker {
    /// Create a tracker with the given sinks
    ///
    /// A log file that cannot be opened is dropped; the failure is recorded as a warning.
    pub fn new(options: TrackerOptions) -> Self {
        let (log_file, open_error) = match &options.log_file {
            Some(path) => match open_log_file(path) {
                Ok(file) => (Some(file), None),
                Err(e) => (None, Some((path.clone(), e))),
            },
            None => (None, None),
        };

        let tracker = Self {
            echo_console: options.echo_console,
            state: Mutex::new(TrackerState {
                log_file,
                ..TrackerState::default()
            }),
        };

        if let Some((path, e)) = open_error {
            tracker.log(
                LogLevel::Warning,
                format!("Could not open log file {}: {}", path.display(), e),
                None,
                Context::new(),
            );
        }

        tracker
    }

    /// A tracker that only keeps entries in memory
    pub fn silent() -> Self {
        Self::default()
    }

    /// Record an event
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<String>,
        context: Context,
    ) {
        let entry = LogEntry {
            timestamp: Local::now(),
            level,
            message: message.into(),
            exception,
            context,
        };

        let mut state = self.lock();
        self.output(&mut state, &entry);

        match level {
            LogLevel::Error | LogLevel::Critical => state.errors.push(entry.clone()),
            LogLevel::Warning => state.warnings.push(entry.clone()),
            _ => {}
        }
        state.entries.push(entry);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message, None, Context::new());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, None, Context::new());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message, None, Context::new());
    }

    /// Record an error with optional failure detail
    pub fn error(&self, message: impl Into<String>, exception: Option<&dyn fmt::Display>) {
        self.log(
            LogLevel::Error,
            message,
            exception.map(|e| e.to_string()),
            Context::new(),
        );
    }

    /// Record a critical error with optional failure detail
    pub fn critical(&self, message: impl Into<String>, exception: Option<&dyn fmt::Display>) {
        self.log(
            LogLevel::Critical,
            message,
            exception.map(|e| e.to_string()),
            Context::new(),
        );
    }

    pub fn error_count(&self) -> usize {
        self.lock().errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.lock().warnings.len()
    }

    /// Snapshot of every entry, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().entries.clone()
    }

    /// Snapshot of error and critical entries
    pub fn errors(&self) -> Vec<LogEntry> {
        self.lock().errors.clone()
    }

    pub fn warnings(&self) -> Vec<LogEntry> {
        self.lock().warnings.clone()
    }

    pub fn summary(&self) -> TrackerSummary {
        let state = self.lock();
        TrackerSummary {
            total_entries: state.entries.len(),
            error_count: state.errors.len(),
            warning_count: state.warnings.len(),
            errors: state.errors.clone(),
            warnings: state.warnings.clone(),
        }
    }

    /// Render all recorded errors for terminal display
    pub fn errors_report(&self) -> String {
        let state = self.lock();
        if state.errors.is_empty() {
            return "No errors recorded.".to_string();
        }

        let rule = "=".repeat(60);
        let mut lines = vec![rule.clone(), "ERROR REPORT".to_string(), rule.clone()];

        for (i, error) in state.errors.iter().enumerate() {
            lines.push(format!("\n{}. [{}]", i + 1, error.timestamp.to_rfc3339()));
            lines.push(format!("   Message: {}", error.message));
            if let Some(exception) = &error.exception {
                lines.push(format!("   Exception: {}", exception));
            }
            if !error.context.is_empty() {
                let context = serde_json::to_string(&error.context).unwrap_or_default();
                lines.push(format!("   Context: {}", context));
            }
        }

        lines.push(format!("\n{}", rule));
        lines.push(format!("Total Errors: {}", state.errors.len()));
        lines.push(rule);

        lines.join("\n")
    }

    /// Forget every recorded entry; sinks stay as configured
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.errors.clear();
        state.warnings.clear();
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn output(&self, state: &mut TrackerState, entry: &LogEntry) {
        let level = log::Level::from(entry.level);
        log::log!(target: "folderaudit::tracker", level, "{}", entry.message);

        if self.echo_console {
            eprintln!("{}", entry);
        }

        if let Some(file) = state.log_file.as_mut() {
            let stamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
            // A failing log file must not take the run down with it
            let _ = writeln!(file, "{} - {} - {}", stamp, entry.level, entry.message);
            if let Some(exception) = &entry.exception {
                let _ = writeln!(file, "{} - ERROR - Exception: {}", stamp, exception);
            }
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
