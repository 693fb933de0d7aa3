/*!
 * Core types and data structures for folderaudit
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Metadata extracted from a file, keyed by attribute name
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Status of file processing
///
/// Only `Completed` and `Error` are produced today; the others are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Error,
    Skipped,
}

/// A directory holding at least one processable file
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    /// Identifier, unique per scan
    pub guid: Uuid,
    /// Absolute path
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    /// Directory name
    pub name: String,
    /// Number of processable files
    pub file_count: usize,
    /// Processable file names, in listing order
    pub files: Vec<String>,
    /// Full paths of the processable files, parallel to `files`
    ///
    /// Names in `files` are lossy for non-UTF-8 entries; these paths are not.
    #[serde(skip)]
    pub paths: Vec<PathBuf>,
    /// Parent directory path
    #[serde(serialize_with = "lossy_path")]
    pub parent_path: PathBuf,
    /// Depth below the scan root (root = 0)
    pub depth: usize,
    /// When the scanner recorded this folder
    pub discovered_at: DateTime<Local>,
}

impl Folder {
    /// Record a folder and its processable file paths with a fresh identifier
    pub fn new(path: &Path, depth: usize, paths: Vec<PathBuf>) -> Self {
        let files: Vec<String> = paths.iter().map(|p| display_name(p)).collect();

        Self {
            guid: Uuid::new_v4(),
            path: path.to_path_buf(),
            name: display_name(path),
            file_count: files.len(),
            files,
            paths,
            parent_path: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            depth,
            discovered_at: Local::now(),
        }
    }
}

/// Outcome of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    /// Identifier of this processing attempt
    pub file_guid: Uuid,
    pub filename: String,
    #[serde(serialize_with = "lossy_path")]
    pub filepath: PathBuf,
    /// Owning folder
    pub folder_guid: Uuid,
    pub status: ProcessingStatus,
    /// Lowercase extension without the dot
    pub file_type: String,
    /// Size in bytes, 0 when the file could not be stat'ed
    pub file_size: u64,
    pub processed_at: DateTime<Local>,
    /// Present iff `status` is `Error`
    pub error_message: Option<String>,
    pub metadata: Metadata,
}

impl FileResult {
    /// A successfully processed file
    pub fn completed(
        filepath: &Path,
        folder_guid: Uuid,
        file_type: String,
        file_size: u64,
        metadata: Metadata,
    ) -> Self {
        Self {
            file_guid: Uuid::new_v4(),
            filename: display_name(filepath),
            filepath: filepath.to_path_buf(),
            folder_guid,
            status: ProcessingStatus::Completed,
            file_type,
            file_size,
            processed_at: Local::now(),
            error_message: None,
            metadata,
        }
    }

    /// A file whose processing failed
    pub fn failed(
        filepath: &Path,
        folder_guid: Uuid,
        file_type: String,
        file_size: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            file_guid: Uuid::new_v4(),
            filename: display_name(filepath),
            filepath: filepath.to_path_buf(),
            folder_guid,
            status: ProcessingStatus::Error,
            file_type,
            file_size,
            processed_at: Local::now(),
            error_message: Some(error_message.into()),
            metadata: Metadata::new(),
        }
    }
}

/// Aggregate outcome for one folder
#[derive(Debug, Clone, Serialize)]
pub struct FolderResult {
    pub folder_guid: Uuid,
    #[serde(serialize_with = "lossy_path")]
    pub folder_path: PathBuf,
    pub folder_name: String,
    pub total_files: usize,
    pub processed_files: usize,
    pub error_files: usize,
    pub skipped_files: usize,
    /// One entry per file, in the folder's file order
    pub file_results: Vec<FileResult>,
    pub started_at: DateTime<Local>,
    pub completed_at: DateTime<Local>,
}

impl FolderResult {
    /// Build the aggregate for a folder from its file outcomes
    pub fn from_results(
        folder: &Folder,
        file_results: Vec<FileResult>,
        started_at: DateTime<Local>,
    ) -> Self {
        let count = |status: ProcessingStatus| file_results.iter().filter(|r| r.status == status).count();
        let processed_files = count(ProcessingStatus::Completed);
        let skipped_files = count(ProcessingStatus::Skipped);
        // Anything that neither completed nor was skipped counts against the folder
        let error_files = file_results.len() - processed_files - skipped_files;

        Self {
            folder_guid: folder.guid,
            folder_path: folder.path.clone(),
            folder_name: folder.name.clone(),
            total_files: folder.files.len(),
            processed_files,
            error_files,
            skipped_files,
            file_results,
            started_at,
            completed_at: Local::now(),
        }
    }
}

/// Last path component as a string, or the whole path when it has none
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn lossy_path<P: AsRef<Path>, S: Serializer>(path: &P, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}
