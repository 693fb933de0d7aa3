//! Errors that can abort a folderaudit run
//!
//! Only a handful of failures ever leave a component: a missing or non-directory scan
//! root, invalid settings, and output sink failures. Per-file and per-folder problems
//! are absorbed by the tracker instead.

use std::error::Error as StdError;
use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// Scan root does not exist
    #[error("Root path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Scan root exists but is not a directory
    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Report serialisation or a malformed report on load
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rejected settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Another error with a description of what was being attempted
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl AuditError {
    /// Whether this error comes from the scan root rather than an output sink
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotADirectory(_))
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

/// Build an `AuditError` variant holding a formatted message
#[macro_export]
macro_rules! error {
    ($kind:ident, $($arg:tt)*) => {
        $crate::error::AuditError::$kind(format!($($arg)*))
    };
}

/// Return early with a formatted `AuditError`
#[macro_export]
macro_rules! bail {
    ($kind:ident, $($arg:tt)*) => {
        return Err($crate::error!($kind, $($arg)*))
    };
}

/// Return early with a formatted `AuditError` unless the condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($kind, $($arg)*)
        }
    };
}

/// Attach a description of the failed operation to any error
pub trait ResultExt<T> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|source| AuditError::Context {
            context: f().to_string(),
            source: Box::new(source),
        })
    }
}

impl From<AuditError> for io::Error {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
