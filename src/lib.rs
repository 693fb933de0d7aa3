/*!
 * folderaudit - Scan folder trees and report on the files they contain
 *
 * The pipeline runs in three stages: the scanner finds every folder holding
 * files of a supported type, the processor produces one outcome per file, and the
 * writer turns the combined report into JSON and CSV. A shared tracker records
 * everything that goes wrong without stopping the batch.
 */

pub mod config;
pub mod error;
pub mod processor;
pub mod report;
pub mod scanner;
pub mod tracker;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{AuditError, Result};
pub use processor::{Extraction, FsMetadataExtractor, MetadataExtractor, ProcessingSummary, Processor};
pub use report::{flatten, CsvRow, Report, ReportEnvelope, ReportFormat, Reporter};
pub use scanner::{ScanSummary, Scanner};
pub use tracker::{LogEntry, LogLevel, Tracker, TrackerOptions};
pub use types::{FileResult, Folder, FolderResult, Metadata, ProcessingStatus};
pub use writer::{OutputWriter, ReportPaths};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
