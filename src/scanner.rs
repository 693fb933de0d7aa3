/*!
 * Directory scanning: find the folders that hold processable files
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{AuditError, Result};
use crate::tracker::{Context, LogLevel, Tracker};
use crate::types::{display_name, Folder};
use crate::utils::is_hidden;

/// Totals over a scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total_folders: usize,
    pub total_files: usize,
}

impl ScanSummary {
    pub fn from_folders(folders: &[Folder]) -> Self {
        Self {
            total_folders: folders.len(),
            total_files: folders.iter().map(|f| f.file_count).sum(),
        }
    }
}

/// Direct contents of one directory
#[derive(Debug, Default)]
struct DirectoryListing {
    /// Processable files, full entry paths as listed
    files: Vec<PathBuf>,
    /// Subdirectories to descend into
    subdirs: Vec<PathBuf>,
}

/// Depth-bounded scanner for directory trees
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Event log
    tracker: Arc<Tracker>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, tracker: Arc<Tracker>) -> Self {
        Self { config, tracker }
    }

    /// Scan the tree below `root` and return every folder holding processable files
    ///
    /// Folders come back in depth-first pre-order, siblings sorted by name. Only a
    /// missing or non-directory root fails; problems below the root are recorded in
    /// the tracker and the affected subtree is skipped.
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<Vec<Folder>> {
        let root = root.as_ref();

        if !root.exists() {
            let err = AuditError::NotFound(root.to_path_buf());
            self.tracker.error(err.to_string(), None);
            return Err(err);
        }

        if !root.is_dir() {
            let err = AuditError::NotADirectory(root.to_path_buf());
            self.tracker.error(err.to_string(), None);
            return Err(err);
        }

        let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        self.tracker.info(format!("Starting scan of: {}", root.display()));

        let mut folders = Vec::new();
        self.scan_directory(&root, 0, &mut folders);

        self.tracker.info(format!(
            "Scan complete. Found {} folders with processable files.",
            folders.len()
        ));

        Ok(folders)
    }

    /// Summarise a scan result
    pub fn summary(folders: &[Folder]) -> ScanSummary {
        ScanSummary::from_folders(folders)
    }

    /// Check whether a file name is processable under the current configuration
    pub fn is_processable(&self, name: &str) -> bool {
        if self.config.skip_hidden_files && is_hidden(name, &self.config.hidden_prefix) {
            return false;
        }
        self.config.is_supported_file(Path::new(name))
    }

    fn scan_directory(&self, dir: &Path, depth: usize, folders: &mut Vec<Folder>) {
        if depth > self.config.max_depth {
            self.tracker.warning(format!(
                "Max depth ({}) reached at: {}",
                self.config.max_depth,
                dir.display()
            ));
            return;
        }

        // Applies to the root as well
        let name = display_name(dir);
        if self.config.skip_hidden_folders && is_hidden(&name, &self.config.hidden_prefix) {
            self.tracker.debug(format!("Skipping hidden folder: {}", dir.display()));
            return;
        }

        let listing = match self.list_directory(dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.record_scan_error(dir, e);
                return;
            }
        };

        if !listing.files.is_empty() {
            let folder = Folder::new(dir, depth, listing.files);
            self.tracker.info(format!(
                "Found folder: {} with {} files",
                folder.name, folder.file_count
            ));
            folders.push(folder);
        }

        for subdir in &listing.subdirs {
            self.scan_directory(subdir, depth + 1, folders);
        }
    }

    /// List the direct entries of a directory, sorted by name
    fn list_directory(&self, dir: &Path) -> walkdir::Result<DirectoryListing> {
        let mut listing = DirectoryListing::default();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                listing.subdirs.push(entry.into_path());
                continue;
            }

            // Links count as files when they point at one; linked directories are not followed
            let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if is_file && self.is_processable(&entry.file_name().to_string_lossy()) {
                listing.files.push(entry.into_path());
            }
        }

        Ok(listing)
    }

    fn record_scan_error(&self, dir: &Path, err: walkdir::Error) {
        let permission_denied = err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied);

        let message = if permission_denied {
            format!("Permission denied accessing: {}", dir.display())
        } else {
            format!("Error scanning folder: {}", dir.display())
        };

        let mut context = Context::new();
        context.insert(
            "path".to_string(),
            serde_json::Value::String(dir.to_string_lossy().to_string()),
        );
        self.tracker
            .log(LogLevel::Error, message, Some(err.to_string()), context);
    }
}
