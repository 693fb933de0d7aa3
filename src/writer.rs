/*!
 * Report writer: JSON and CSV output files
 */

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AuditError, Result, ResultExt};
use crate::processor::ProcessingSummary;
use crate::report::{flatten, Report, ReportEnvelope};
use crate::scanner::ScanSummary;
use crate::tracker::Tracker;

/// Locations of a written report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Writes reports into an output directory
pub struct OutputWriter {
    /// Output directory
    output_dir: PathBuf,
    /// Default JSON file name
    json_filename: String,
    /// Default CSV file name
    csv_filename: String,
    /// Event log
    tracker: Arc<Tracker>,
}

impl OutputWriter {
    /// Create a writer for the configured output directory, creating it if needed
    pub fn new(config: &Config, tracker: Arc<Tracker>) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

        Ok(Self {
            output_dir: config.output_dir.clone(),
            json_filename: config.json_filename.clone(),
            csv_filename: config.csv_filename.clone(),
            tracker,
        })
    }

    /// Output directory in use
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a report as pretty JSON, wrapped with a generation timestamp and version
    pub fn save_json(&self, report: &Report, filename: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(filename);

        let written = File::create(&path).map_err(AuditError::from).and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &ReportEnvelope::new(report))?;
            writer.flush()?;
            Ok(())
        });

        self.finish(written, "JSON", path)
    }

    /// Write processing results as CSV, one row per file
    pub fn save_csv(&self, summary: &ProcessingSummary, filename: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(filename);
        let rows = flatten(summary);

        if rows.is_empty() {
            self.tracker.warning("No data to write to CSV");
        }

        let written = csv::Writer::from_path(&path)
            .map_err(AuditError::from)
            .and_then(|mut writer| {
                // serialize() only emits headers with the first row
                if rows.is_empty() {
                    writer.write_record(CSV_COLUMNS)?;
                }
                for row in &rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                Ok(())
            });

        self.finish(written, "CSV", path)
    }

    /// Assemble the combined report and write both formats under the default names
    pub fn write_report(
        &self,
        scan: &ScanSummary,
        processing: &ProcessingSummary,
    ) -> Result<ReportPaths> {
        let report = Report::assemble(scan, processing);
        let json = self.save_json(&report, &self.json_filename)?;
        let csv = self.save_csv(processing, &self.csv_filename)?;

        self.tracker.info(format!(
            "Report generated: JSON={}, CSV={}",
            json.display(),
            csv.display()
        ));

        Ok(ReportPaths { json, csv })
    }

    /// Load a previously written JSON document
    pub fn load_json(&self, filename: &str) -> Result<serde_json::Value> {
        let path = self.output_dir.join(filename);

        let loaded = File::open(&path)
            .map_err(AuditError::from)
            .and_then(|file| Ok(serde_json::from_reader(BufReader::new(file))?));

        if let Err(e) = &loaded {
            self.tracker
                .error(format!("Failed to load JSON: {}", path.display()), Some(e));
        }
        loaded
    }

    fn finish(&self, written: Result<()>, kind: &str, path: PathBuf) -> Result<PathBuf> {
        match written {
            Ok(()) => {
                self.tracker
                    .info(format!("{} saved to: {}", kind, path.display()));
                Ok(path)
            }
            Err(e) => {
                self.tracker.error(
                    format!("Failed to save {}: {}", kind, path.display()),
                    Some(&e),
                );
                Err(e)
            }
        }
    }
}

/// CSV header, matching the field order of `CsvRow`
pub const CSV_COLUMNS: [&str; 10] = [
    "folder_guid",
    "folder_name",
    "folder_path",
    "filename",
    "filepath",
    "status",
    "file_type",
    "file_size",
    "processed_at",
    "error_message",
];
