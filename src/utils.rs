/*!
 * Utility functions for folderaudit
 */

use std::path::Path;

/// Lowercase extension of a path without the leading dot, if it has a non-empty one
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// File type of a path: lowercase extension without the dot, empty when absent
pub fn file_type(path: &Path) -> String {
    extension_of(path).unwrap_or_default()
}

/// Check whether an entry name is hidden under the given marker
pub fn is_hidden(name: &str, prefix: &str) -> bool {
    !prefix.is_empty() && name.starts_with(prefix)
}

/// Percentage of processed files, 0 when there is nothing to process
pub fn success_rate(processed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        processed as f64 / total as f64 * 100.0
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
