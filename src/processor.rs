/*!
 * File processing: one outcome per discovered file, aggregated per folder
 */

use std::any::Any;
use std::fs::{self, File};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::Config;
use crate::tracker::Tracker;
use crate::types::{display_name, FileResult, Folder, FolderResult, Metadata};
use crate::utils::{file_type, success_rate};

/// Outcome of a metadata extraction
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Metadata gathered from the file
    Success(Metadata),
    /// The file could not be processed, with the reason
    Failure(String),
}

/// Extracts metadata from one file
///
/// Implementations may enrich the metadata per file type; the shape of the
/// resulting `FileResult` does not change.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, path: &Path, file_type: &str) -> Extraction;
}

/// Default extractor: file system timestamps only
///
/// The file is opened for reading, so an unreadable file is a failure. For the
/// primary type, `page_count` and `format_version` are reserved and left null.
#[derive(Debug, Clone)]
pub struct FsMetadataExtractor {
    primary_type: String,
}

impl FsMetadataExtractor {
    pub fn new(config: &Config) -> Self {
        Self {
            primary_type: config.primary_type().to_lowercase(),
        }
    }
}

impl MetadataExtractor for FsMetadataExtractor {
    fn extract(&self, path: &Path, file_type: &str) -> Extraction {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return Extraction::Failure(e.to_string()),
        };

        let mut metadata = Metadata::new();
        metadata.insert(
            "extracted_at".to_string(),
            Value::String(Local::now().to_rfc3339()),
        );

        if let Ok(stat) = file.metadata() {
            let times = [
                ("created", stat.created()),
                ("modified", stat.modified()),
                ("accessed", stat.accessed()),
            ];
            for (key, time) in times {
                if let Ok(time) = time {
                    let time = DateTime::<Local>::from(time).to_rfc3339();
                    metadata.insert(key.to_string(), Value::String(time));
                }
            }
        }

        if file_type == self.primary_type {
            metadata.insert("page_count".to_string(), Value::Null);
            metadata.insert("format_version".to_string(), Value::Null);
        }

        Extraction::Success(metadata)
    }
}

/// Totals over a processing run, with the full per-folder detail
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
    pub total_folders: usize,
    pub total_files: usize,
    pub total_processed: usize,
    pub total_errors: usize,
    pub total_skipped: usize,
    /// Percentage of files processed, 0 when there were none
    pub success_rate: f64,
    pub folder_results: Vec<FolderResult>,
}

impl ProcessingSummary {
    pub fn from_results(results: &[FolderResult]) -> Self {
        let total_files: usize = results.iter().map(|r| r.total_files).sum();
        let total_processed: usize = results.iter().map(|r| r.processed_files).sum();

        Self {
            total_folders: results.len(),
            total_files,
            total_processed,
            total_errors: results.iter().map(|r| r.error_files).sum(),
            total_skipped: results.iter().map(|r| r.skipped_files).sum(),
            success_rate: success_rate(total_processed, total_files),
            folder_results: results.to_vec(),
        }
    }
}

/// Processes the files of scanned folders
pub struct Processor {
    /// Event log
    tracker: Arc<Tracker>,
    /// Metadata extraction step
    extractor: Box<dyn MetadataExtractor>,
    /// Progress bar, advanced once per file
    progress: Arc<ProgressBar>,
    /// Results of the last run
    results: Vec<FolderResult>,
}

impl Processor {
    /// Create a processor using the file system extractor
    pub fn new(config: &Config, tracker: Arc<Tracker>, progress: Arc<ProgressBar>) -> Self {
        Self {
            tracker,
            extractor: Box::new(FsMetadataExtractor::new(config)),
            progress,
            results: Vec::new(),
        }
    }

    /// Replace the extraction step
    pub fn with_extractor(mut self, extractor: Box<dyn MetadataExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Process every folder, replacing the results of any earlier run
    ///
    /// Each input folder yields exactly one `FolderResult`, in input order.
    pub fn process_folders(&mut self, folders: &[Folder]) -> &[FolderResult] {
        let results: Vec<FolderResult> = folders.iter().map(|f| self.process_folder(f)).collect();
        self.results = results;
        &self.results
    }

    /// Process all files of one folder
    pub fn process_folder(&self, folder: &Folder) -> FolderResult {
        self.tracker
            .info(format!("Processing folder: {} ({})", folder.name, folder.guid));
        let started_at = Local::now();

        // Collecting a parallel iterator keeps the folder's file order
        let file_results: Vec<FileResult> = folder
            .paths
            .par_iter()
            .map(|path| {
                let result = self.process_file(path, folder.guid);
                self.progress.inc(1);
                result
            })
            .collect();

        let result = FolderResult::from_results(folder, file_results, started_at);
        self.tracker.info(format!(
            "Folder complete: {} processed, {} errors, {} skipped",
            result.processed_files, result.error_files, result.skipped_files
        ));

        result
    }

    /// Process a single file; always produces a result
    pub fn process_file(&self, path: &Path, folder_guid: Uuid) -> FileResult {
        let name = display_name(path);
        let file_type = file_type(path);
        let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        self.progress.set_message(format!("Current file: {}", name));
        self.tracker.info(format!("Processing file: {}", name));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.extractor.extract(path, &file_type)
        }));

        match outcome {
            Ok(Extraction::Success(metadata)) => {
                FileResult::completed(path, folder_guid, file_type, file_size, metadata)
            }
            Ok(Extraction::Failure(reason)) => {
                self.tracker
                    .error(format!("Error processing {}: {}", name, reason), Some(&reason));
                FileResult::failed(path, folder_guid, file_type, file_size, reason)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                self.tracker
                    .error(format!("Exception processing file: {}", name), Some(&reason));
                FileResult::failed(path, folder_guid, file_type, 0, reason)
            }
        }
    }

    /// Results of the last run
    pub fn results(&self) -> &[FolderResult] {
        &self.results
    }

    /// Totals over the last run
    pub fn summary(&self) -> ProcessingSummary {
        ProcessingSummary::from_results(&self.results)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "metadata extraction panicked".to_string()
    }
}
