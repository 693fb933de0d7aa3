/*!
 * Reporting functionality for folderaudit
 *
 * Assembles the combined report handed to the output writer, flattens processing
 * results into CSV rows, and renders console tables with the tabled library.
 */

use chrono::{DateTime, Local};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::processor::ProcessingSummary;
use crate::scanner::ScanSummary;
use crate::types::{Folder, FolderResult};
use crate::utils::format_file_size;

/// Version tag written into every JSON report
pub const REPORT_VERSION: &str = "1.0";

/// Number of file names listed per folder before eliding the rest
const FILES_PREVIEW: usize = 5;

/// Scan totals as they appear in the report
#[derive(Debug, Clone, Serialize)]
pub struct ScanTotals {
    pub total_folders_found: usize,
    pub total_files_found: usize,
}

/// Processing totals as they appear in the report
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingTotals {
    pub total_folders_processed: usize,
    pub total_files_processed: usize,
    pub total_errors: usize,
    pub total_skipped: usize,
    pub success_rate: f64,
}

/// Combined scan and processing report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub report_generated: DateTime<Local>,
    pub scan_summary: ScanTotals,
    pub processing_summary: ProcessingTotals,
    pub detailed_results: Vec<FolderResult>,
}

impl Report {
    /// Combine a scan summary and a processing summary
    pub fn assemble(scan: &ScanSummary, processing: &ProcessingSummary) -> Self {
        Self {
            report_generated: Local::now(),
            scan_summary: ScanTotals {
                total_folders_found: scan.total_folders,
                total_files_found: scan.total_files,
            },
            processing_summary: ProcessingTotals {
                total_folders_processed: processing.total_folders,
                total_files_processed: processing.total_processed,
                total_errors: processing.total_errors,
                total_skipped: processing.total_skipped,
                success_rate: processing.success_rate,
            },
            detailed_results: processing.folder_results.clone(),
        }
    }
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: DateTime<Local>,
    pub version: &'static str,
    pub data: &'a Report,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(data: &'a Report) -> Self {
        Self {
            generated_at: Local::now(),
            version: REPORT_VERSION,
            data,
        }
    }
}

/// One CSV row: a file result prefixed with its folder
///
/// Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvRow {
    pub folder_guid: String,
    pub folder_name: String,
    pub folder_path: String,
    pub filename: String,
    pub filepath: String,
    pub status: String,
    pub file_type: String,
    pub file_size: String,
    pub processed_at: String,
    pub error_message: String,
}

/// Flatten processing results into CSV rows
///
/// Every file result becomes one row. A folder without file results still gets a
/// single row with empty file columns.
pub fn flatten(summary: &ProcessingSummary) -> Vec<CsvRow> {
    let mut rows = Vec::new();

    for folder in &summary.folder_results {
        let folder_row = CsvRow {
            folder_guid: folder.folder_guid.to_string(),
            folder_name: folder.folder_name.clone(),
            folder_path: folder.folder_path.to_string_lossy().to_string(),
            ..CsvRow::default()
        };

        if folder.file_results.is_empty() {
            rows.push(folder_row);
            continue;
        }

        for file in &folder.file_results {
            rows.push(CsvRow {
                filename: file.filename.clone(),
                filepath: file.filepath.to_string_lossy().to_string(),
                status: file.status.to_string(),
                file_type: file.file_type.clone(),
                file_size: file.file_size.to_string(),
                processed_at: file.processed_at.to_rfc3339(),
                error_message: file.error_message.clone().unwrap_or_default(),
                ..folder_row.clone()
            });
        }
    }

    rows
}

/// Format of the console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Rounded tables
    ConsoleTable,
    /// Plain ruled text, for logs and non-terminal output
    Plain,
}

/// Console renderer for scan and processing results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render the folders found by a scan
    pub fn folders_report(&self, folders: &[Folder]) -> String {
        if folders.is_empty() {
            return "No folders with processable files found.".to_string();
        }

        match self.format {
            ReportFormat::ConsoleTable => self.folders_table(folders),
            ReportFormat::Plain => self.folders_plain(folders),
        }
    }

    /// Render the totals of a processing run
    pub fn results_report(&self, summary: &ProcessingSummary, report_path: &str) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.results_table(summary, report_path),
            ReportFormat::Plain => self.results_plain(summary, report_path),
        }
    }

    /// Print the results of a processing run to stdout
    pub fn print_results(&self, summary: &ProcessingSummary, report_path: &str) {
        println!("\n{}", self.results_report(summary, report_path));
    }

    fn file_preview(folder: &Folder) -> String {
        let mut preview = folder
            .files
            .iter()
            .take(FILES_PREVIEW)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if folder.files.len() > FILES_PREVIEW {
            preview.push_str(&format!(" ... and {} more", folder.files.len() - FILES_PREVIEW));
        }
        preview
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn folders_table(&self, folders: &[Folder]) -> String {
        #[derive(Tabled)]
        struct FolderRow {
            #[tabled(rename = "#")]
            index: usize,

            #[tabled(rename = "Folder")]
            name: String,

            #[tabled(rename = "Path")]
            path: String,

            #[tabled(rename = "GUID")]
            guid: String,

            #[tabled(rename = "Files")]
            count: usize,

            #[tabled(rename = "File List")]
            files: String,
        }

        let rows: Vec<FolderRow> = folders
            .iter()
            .enumerate()
            .map(|(i, folder)| FolderRow {
                index: i + 1,
                name: folder.name.clone(),
                path: folder.path.display().to_string(),
                guid: folder.guid.to_string(),
                count: folder.file_count,
                files: Self::file_preview(folder),
            })
            .collect();

        format!(
            "📂  FOLDERS FOR PROCESSING\n{}\nTotal: {} folders",
            Self::styled(Table::new(rows)),
            folders.len()
        )
    }

    fn folders_plain(&self, folders: &[Folder]) -> String {
        let rule = "=".repeat(60);
        let mut lines = vec![rule.clone(), "FOLDERS FOR PROCESSING".to_string(), rule.clone()];

        for (i, folder) in folders.iter().enumerate() {
            lines.push(format!("\n{}. {}", i + 1, folder.name));
            lines.push(format!("   Path: {}", folder.path.display()));
            lines.push(format!("   GUID: {}", folder.guid));
            lines.push(format!("   Files: {}", folder.file_count));
            lines.push(format!("   File list: {}", Self::file_preview(folder)));
        }

        lines.push(format!("\n{}", rule));
        lines.push(format!("Total: {} folders", folders.len()));
        lines.push(rule);
        lines.join("\n")
    }

    fn results_table(&self, summary: &ProcessingSummary, report_path: &str) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        #[derive(Tabled)]
        struct OutcomeRow {
            #[tabled(rename = "Folder")]
            name: String,

            #[tabled(rename = "Files")]
            total: usize,

            #[tabled(rename = "Processed")]
            processed: usize,

            #[tabled(rename = "Errors")]
            errors: usize,

            #[tabled(rename = "Skipped")]
            skipped: usize,

            #[tabled(rename = "Size")]
            size: String,
        }

        let summary_rows = vec![
            SummaryRow {
                key: "📁 Folders Processed".to_string(),
                value: summary.total_folders.to_string(),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: summary.total_processed.to_string(),
            },
            SummaryRow {
                key: "❌ Errors".to_string(),
                value: summary.total_errors.to_string(),
            },
            SummaryRow {
                key: "⏭️ Skipped".to_string(),
                value: summary.total_skipped.to_string(),
            },
            SummaryRow {
                key: "✅ Success Rate".to_string(),
                value: format!("{:.1}%", summary.success_rate),
            },
            SummaryRow {
                key: "💾 Results".to_string(),
                value: report_path.to_string(),
            },
        ];

        let outcome_rows: Vec<OutcomeRow> = summary
            .folder_results
            .iter()
            .map(|folder| OutcomeRow {
                name: folder.folder_name.clone(),
                total: folder.total_files,
                processed: folder.processed_files,
                errors: folder.error_files,
                skipped: folder.skipped_files,
                size: format_file_size(folder.file_results.iter().map(|f| f.file_size).sum()),
            })
            .collect();

        format!(
            "📋  FOLDER OUTCOMES\n{}\n\n✅  PROCESSING RESULTS\n{}",
            Self::styled(Table::new(outcome_rows)),
            Self::styled(Table::new(summary_rows))
        )
    }

    fn results_plain(&self, summary: &ProcessingSummary, report_path: &str) -> String {
        let rule = "=".repeat(60);
        [
            rule.clone(),
            "PROCESSING RESULTS".to_string(),
            rule.clone(),
            format!("Total folders processed: {}", summary.total_folders),
            format!("Total files processed:   {}", summary.total_processed),
            format!("Total errors:            {}", summary.total_errors),
            format!("Total skipped:           {}", summary.total_skipped),
            format!("Success rate:            {:.1}%", summary.success_rate),
            "-".repeat(60),
            format!("Results saved to: {}", report_path),
            rule,
        ]
        .join("\n")
    }
}
