/*!
 * Configuration handling for folderaudit
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::utils::extension_of;

/// Extensions processed when none are given explicitly
pub const DEFAULT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".xls", ".xlsx", ".txt", ".csv"];

/// Command-line arguments for folderaudit
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "folderaudit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scan a folder tree and report on the processable files it contains",
    long_about = "Recursively walks a directory tree, records every folder holding files of a supported type, runs a per-file metadata pass and writes the outcome as JSON and CSV reports."
)]
pub struct Args {
    /// Parent folder to scan (prompted for when omitted)
    pub path: Option<String>,

    /// Output directory for reports and the log file
    #[clap(long, default_value = "output")]
    pub output: String,

    /// Maximum folder depth to traverse (root is depth 0)
    #[clap(long, default_value = "10")]
    pub max_depth: usize,

    /// Comma-separated list of supported extensions
    #[clap(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Primary file type eligible for type-specific metadata
    #[clap(long, default_value = ".pdf")]
    pub primary: String,

    /// Descend into folders whose name starts with a dot
    #[clap(long)]
    pub include_hidden_folders: bool,

    /// Process files whose name starts with a dot
    #[clap(long)]
    pub include_hidden_files: bool,

    /// Number of threads to use for processing
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Process without asking for confirmation
    #[clap(short, long)]
    pub yes: bool,

    /// Echo every tracker event to the console
    #[clap(short, long)]
    pub verbose: bool,

    /// Do not write the processing log file
    #[clap(long)]
    pub no_log_file: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Supported extensions, lowercase and dot-prefixed
    pub supported_extensions: Vec<String>,

    /// Primary extension, lowercase and dot-prefixed
    pub primary_extension: String,

    /// Maximum traversal depth (root = 0)
    pub max_depth: usize,

    /// Skip folders whose name starts with `hidden_prefix`
    pub skip_hidden_folders: bool,

    /// Skip files whose name starts with `hidden_prefix`
    pub skip_hidden_files: bool,

    /// Name prefix marking hidden entries
    pub hidden_prefix: String,

    /// Output directory
    pub output_dir: PathBuf,

    /// JSON report file name
    pub json_filename: String,

    /// CSV report file name
    pub csv_filename: String,

    /// Log file name
    pub log_filename: String,

    /// Number of threads to use for processing
    pub num_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supported_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            primary_extension: ".pdf".to_string(),
            max_depth: 10,
            skip_hidden_folders: true,
            skip_hidden_files: true,
            hidden_prefix: ".".to_string(),
            output_dir: PathBuf::from("output"),
            json_filename: "processing_results.json".to_string(),
            csv_filename: "processing_results.csv".to_string(),
            log_filename: "processing.log".to_string(),
            num_threads: 4,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        let defaults = Self::default();
        let supported_extensions = if args.extensions.is_empty() {
            defaults.supported_extensions
        } else {
            args.extensions
                .iter()
                .filter(|e| !e.trim().is_empty())
                .map(|e| normalize_extension(e))
                .collect()
        };

        Self {
            supported_extensions,
            primary_extension: normalize_extension(&args.primary),
            max_depth: args.max_depth,
            skip_hidden_folders: !args.include_hidden_folders,
            skip_hidden_files: !args.include_hidden_files,
            output_dir: PathBuf::from(&args.output),
            num_threads: args.threads,
            ..defaults
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.supported_extensions.is_empty(),
            Config,
            "at least one supported extension is required"
        );

        for ext in &self.supported_extensions {
            ensure!(
                ext.starts_with('.') && ext.len() > 1,
                Config,
                "extension must start with a dot: {:?}",
                ext
            );
        }

        ensure!(
            self.primary_extension.starts_with('.'),
            Config,
            "primary extension must start with a dot: {:?}",
            self.primary_extension
        );
        ensure!(self.num_threads > 0, Config, "thread count must be at least 1");
        ensure!(!self.hidden_prefix.is_empty(), Config, "hidden prefix must not be empty");

        Ok(())
    }

    /// Check if a file has a supported extension (case-insensitive)
    pub fn is_supported_file(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self
                .supported_extensions
                .iter()
                .any(|s| s.trim_start_matches('.').eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }

    /// Check if a file has the primary extension
    pub fn is_primary_file(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.primary_type().eq_ignore_ascii_case(&ext))
    }

    /// The primary type as produced by `utils::file_type`: lowercase, no dot
    pub fn primary_type(&self) -> &str {
        self.primary_extension.trim_start_matches('.')
    }

    /// Full path for an output file, creating the output directory if needed
    pub fn output_path(&self, filename: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(filename))
    }
}

/// Lowercase an extension and make sure it carries a leading dot
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
