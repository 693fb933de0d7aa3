/*!
 * Tests for folderaudit functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::DateTime;
use filetime::FileTime;
use indicatif::ProgressBar;
use tempfile::TempDir;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AuditError;
use crate::processor::{Extraction, MetadataExtractor, ProcessingSummary, Processor};
use crate::report::{flatten, ReportFormat, Reporter};
use crate::scanner::{ScanSummary, Scanner};
use crate::tracker::{LogLevel, Tracker};
use crate::types::{Folder, ProcessingStatus};
use crate::writer::{OutputWriter, CSV_COLUMNS};

// Scan roots must not look hidden, and tempfile's default names start with a dot
fn tempdir() -> io::Result<TempDir> {
    tempfile::Builder::new().prefix("folderaudit-").tempdir()
}

// Helper function to create a file with some content
fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    write!(file, "{}", content)?;
    Ok(())
}

// Root with /docs (two supported files, one unsupported), /.git and /empty
fn setup_test_directory() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(&root.join("docs").join("a.pdf"), "%PDF-1.4 fake")?;
    write_file(&root.join("docs").join("b.txt"), "plain text")?;
    write_file(&root.join("docs").join("notes.tmp"), "scratch")?;
    write_file(&root.join(".git").join("config.txt"), "[core]")?;
    fs::create_dir(root.join("empty"))?;

    Ok(temp_dir)
}

// A chain root/l1/l2/l3/l4, one text file per level
fn setup_deep_directory() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;
    let mut dir = temp_dir.path().to_path_buf();

    for level in 0..5 {
        write_file(&dir.join(format!("level{}.txt", level)), "x")?;
        dir = dir.join(format!("l{}", level + 1));
    }

    Ok(temp_dir)
}

fn scan(config: &Config, root: &Path) -> (Vec<Folder>, Arc<Tracker>) {
    let tracker = Arc::new(Tracker::silent());
    let scanner = Scanner::new(config.clone(), Arc::clone(&tracker));
    let folders = scanner.scan(root).expect("scan should succeed");
    (folders, tracker)
}

fn processor(tracker: &Arc<Tracker>) -> Processor {
    Processor::new(
        &Config::default(),
        Arc::clone(tracker),
        Arc::new(ProgressBar::hidden()),
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

// Fails every file whose name contains "bad"
struct PickyExtractor;

impl MetadataExtractor for PickyExtractor {
    fn extract(&self, path: &Path, _file_type: &str) -> Extraction {
        if file_name(path).contains("bad") {
            Extraction::Failure("unsupported layout".to_string())
        } else {
            Extraction::Success(Default::default())
        }
    }
}

struct PanickingExtractor;

impl MetadataExtractor for PanickingExtractor {
    fn extract(&self, path: &Path, _file_type: &str) -> Extraction {
        if file_name(path).contains("boom") {
            panic!("extractor blew up");
        }
        Extraction::Success(Default::default())
    }
}

#[test]
fn test_scan_finds_only_folders_with_processable_files() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (folders, _) = scan(&Config::default(), temp_dir.path());

    assert_eq!(folders.len(), 1);
    let docs = &folders[0];
    assert_eq!(docs.name, "docs");
    assert_eq!(docs.file_count, 2);
    assert_eq!(docs.files, vec!["a.pdf", "b.txt"]);
    assert_eq!(docs.depth, 1);
    assert!(docs.path.is_absolute());
    assert_eq!(docs.parent_path, fs::canonicalize(temp_dir.path())?);
    assert_eq!(
        Scanner::summary(&folders),
        ScanSummary {
            total_folders: 1,
            total_files: 2
        }
    );

    Ok(())
}

#[test]
fn test_scanned_folders_hold_supported_files_only() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    write_file(&temp_dir.path().join("mixed").join("sheet.XLSX"), "x")?;
    write_file(&temp_dir.path().join("mixed").join("image.png"), "x")?;
    write_file(&temp_dir.path().join("unsupported").join("image.png"), "x")?;

    let config = Config::default();
    let (folders, _) = scan(&config, temp_dir.path());

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "mixed"]);

    for folder in &folders {
        assert!(folder.file_count >= 1);
        assert_eq!(folder.file_count, folder.files.len());
        for file in &folder.files {
            assert!(config.is_supported_file(Path::new(file)), "{} slipped through", file);
        }
    }

    Ok(())
}

#[test]
fn test_hidden_entries_when_not_skipped() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    write_file(&temp_dir.path().join("docs").join(".draft.txt"), "x")?;

    let config = Config {
        skip_hidden_folders: false,
        skip_hidden_files: false,
        ..Config::default()
    };
    let (folders, _) = scan(&config, temp_dir.path());

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![".git", "docs"]);
    assert_eq!(folders[1].files, vec![".draft.txt", "a.pdf", "b.txt"]);

    Ok(())
}

#[test]
fn test_hidden_files_skipped_by_default() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    write_file(&temp_dir.path().join("docs").join(".draft.txt"), "x")?;

    let (folders, _) = scan(&Config::default(), temp_dir.path());
    assert_eq!(folders[0].files, vec!["a.pdf", "b.txt"]);

    Ok(())
}

#[test]
fn test_hidden_root_is_skipped() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path().join(".archive");
    write_file(&root.join("a.pdf"), "x")?;
    write_file(&root.join("inner").join("b.pdf"), "x")?;

    let (folders, tracker) = scan(&Config::default(), &root);
    assert!(folders.is_empty());
    assert_eq!(tracker.error_count(), 0);

    let config = Config {
        skip_hidden_folders: false,
        ..Config::default()
    };
    let (folders, _) = scan(&config, &root);
    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![".archive", "inner"]);
    assert_eq!(folders[0].depth, 0);

    Ok(())
}

#[test]
fn test_max_depth_limits_traversal() -> io::Result<()> {
    let temp_dir = setup_deep_directory()?;
    let config = Config {
        max_depth: 2,
        ..Config::default()
    };
    let (folders, tracker) = scan(&config, temp_dir.path());

    let depths: Vec<usize> = folders.iter().map(|f| f.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);
    assert!(folders.iter().all(|f| f.depth <= config.max_depth));

    // l3 is visited, warned about, and not listed
    assert_eq!(tracker.warning_count(), 1);
    assert!(tracker.warnings()[0].message.contains("Max depth (2)"));

    Ok(())
}

#[test]
fn test_max_depth_zero_scans_root_only() -> io::Result<()> {
    let temp_dir = setup_deep_directory()?;
    let config = Config {
        max_depth: 0,
        ..Config::default()
    };
    let (folders, _) = scan(&config, temp_dir.path());

    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].files, vec!["level0.txt"]);

    Ok(())
}

#[test]
fn test_scan_is_idempotent() -> io::Result<()> {
    let temp_dir = setup_deep_directory()?;
    write_file(&temp_dir.path().join("side").join("b.pdf"), "x")?;
    write_file(&temp_dir.path().join("side").join("a.doc"), "x")?;

    let config = Config::default();
    let (first, _) = scan(&config, temp_dir.path());
    let (second, _) = scan(&config, temp_dir.path());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.files, b.files);
        assert_eq!(a.file_count, b.file_count);
        assert_ne!(a.guid, b.guid);
    }

    Ok(())
}

#[test]
fn test_missing_root_is_fatal() {
    let tracker = Arc::new(Tracker::silent());
    let scanner = Scanner::new(Config::default(), Arc::clone(&tracker));

    let result = scanner.scan("/definitely/not/here/folderaudit");
    assert!(matches!(result, Err(AuditError::NotFound(_))));
    assert!(result.unwrap_err().is_fatal());
    assert_eq!(tracker.error_count(), 1);
}

#[test]
fn test_file_root_is_fatal() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let file = temp_dir.path().join("a.pdf");
    write_file(&file, "x")?;

    let scanner = Scanner::new(Config::default(), Arc::new(Tracker::silent()));
    assert!(matches!(scanner.scan(&file), Err(AuditError::NotADirectory(_))));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_subtree_is_skipped() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = setup_test_directory()?;
    let locked = temp_dir.path().join("locked");
    write_file(&locked.join("secret.pdf"), "x")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Permission bits do not stop a privileged user
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["docs"]);
    assert_eq!(tracker.error_count(), 1);
    assert!(tracker.errors()[0].message.contains("Permission denied"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    std::os::unix::fs::symlink(root, root.join("docs").join("loop"))?;
    std::os::unix::fs::symlink(root.join("docs").join("a.pdf"), root.join("link.pdf"))?;

    let (folders, _) = scan(&Config::default(), root);

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(folders.len(), 2, "found {:?}", names);
    assert_eq!(folders[0].files, vec!["link.pdf"]);
    assert_eq!(folders[1].files, vec!["a.pdf", "b.txt"]);

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_is_processed() -> io::Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = tempdir()?;
    let name = OsStr::from_bytes(b"caf\xff.txt");
    fs::write(temp_dir.path().join(name), "latin-1 name")?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].files, vec!["caf\u{FFFD}.txt"]);
    assert_eq!(folders[0].paths[0].file_name(), Some(name));

    let mut processor = processor(&tracker);
    let result = &processor.process_folders(&folders)[0];

    let file = &result.file_results[0];
    assert_eq!(file.status, ProcessingStatus::Completed);
    assert_eq!(file.file_size, 12);
    assert!(file.error_message.is_none());
    assert_eq!(tracker.error_count(), 0);

    Ok(())
}

#[test]
fn test_every_file_gets_one_result() -> io::Result<()> {
    let temp_dir = setup_deep_directory()?;
    write_file(&temp_dir.path().join("l1").join("extra.pdf"), "x")?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    let mut processor = processor(&tracker);
    let results = processor.process_folders(&folders);

    assert_eq!(results.len(), folders.len());
    for (folder, result) in folders.iter().zip(results) {
        assert_eq!(result.folder_guid, folder.guid);
        assert_eq!(result.total_files, folder.file_count);
        assert_eq!(result.file_results.len(), result.total_files);
        assert_eq!(
            result.processed_files + result.error_files + result.skipped_files,
            result.total_files
        );

        let filenames: Vec<&str> = result.file_results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, folder.files);
        assert!(result.file_results.iter().all(|r| r.folder_guid == folder.guid));
    }

    let per_file = tracker
        .entries()
        .into_iter()
        .filter(|e| e.level == LogLevel::Info && e.message.starts_with("Processing file: "))
        .count();
    assert_eq!(per_file, 6);

    let summary = processor.summary();
    assert_eq!(summary.total_files, 6);
    assert_eq!(summary.total_processed, 6);
    assert_eq!(summary.success_rate, 100.0);

    Ok(())
}

#[test]
fn test_file_vanishing_before_processing() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (folders, tracker) = scan(&Config::default(), temp_dir.path());

    fs::remove_file(temp_dir.path().join("docs").join("b.txt"))?;

    let mut processor = processor(&tracker);
    let result = processor.process_folders(&folders)[0].clone();

    assert_eq!(result.processed_files, 1);
    assert_eq!(result.error_files, 1);

    let ok = &result.file_results[0];
    assert_eq!(ok.status, ProcessingStatus::Completed);
    assert!(ok.error_message.is_none());
    assert!(ok.file_size > 0);

    let failed = &result.file_results[1];
    assert_eq!(failed.filename, "b.txt");
    assert_eq!(failed.status, ProcessingStatus::Error);
    assert_eq!(failed.file_size, 0);
    assert!(!failed.error_message.as_deref().unwrap_or_default().is_empty());
    assert!(failed.metadata.is_empty());
    assert!(tracker.error_count() >= 1);

    Ok(())
}

#[test]
fn test_extraction_failure_keeps_file_size() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("bad.pdf"), "12345")?;
    write_file(&temp_dir.path().join("good.pdf"), "x")?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    let mut processor = processor(&tracker).with_extractor(Box::new(PickyExtractor));
    let result = &processor.process_folders(&folders)[0];

    let bad = &result.file_results[0];
    assert_eq!(bad.status, ProcessingStatus::Error);
    assert_eq!(bad.file_size, 5);
    assert_eq!(bad.error_message.as_deref(), Some("unsupported layout"));
    assert_eq!(result.file_results[1].status, ProcessingStatus::Completed);

    assert_eq!(tracker.error_count(), 1);
    assert!(tracker.errors()[0].message.contains("bad.pdf"));

    Ok(())
}

#[test]
fn test_panicking_extractor_is_contained() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "x")?;
    write_file(&temp_dir.path().join("boom.txt"), "xyz")?;
    write_file(&temp_dir.path().join("c.txt"), "x")?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    let mut processor = processor(&tracker).with_extractor(Box::new(PanickingExtractor));
    let result = &processor.process_folders(&folders)[0];

    let statuses: Vec<ProcessingStatus> = result.file_results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            ProcessingStatus::Completed,
            ProcessingStatus::Error,
            ProcessingStatus::Completed
        ]
    );

    let boom = &result.file_results[1];
    assert_eq!(boom.file_size, 0);
    assert_eq!(boom.error_message.as_deref(), Some("extractor blew up"));

    Ok(())
}

#[test]
fn test_filesystem_metadata() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let pdf = temp_dir.path().join("a.PDF");
    write_file(&pdf, "x")?;
    write_file(&temp_dir.path().join("b.txt"), "x")?;
    filetime::set_file_mtime(&pdf, FileTime::from_unix_time(1_600_000_000, 0))?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    let mut processor = processor(&tracker);
    let result = &processor.process_folders(&folders)[0];

    let pdf_result = &result.file_results[0];
    assert_eq!(pdf_result.file_type, "pdf");
    assert!(pdf_result.metadata.contains_key("extracted_at"));
    assert!(pdf_result.metadata["page_count"].is_null());
    assert!(pdf_result.metadata["format_version"].is_null());

    let modified = pdf_result.metadata["modified"].as_str().unwrap_or_default();
    let modified = DateTime::parse_from_rfc3339(modified).expect("RFC 3339 timestamp");
    assert_eq!(modified.timestamp(), 1_600_000_000);

    let txt_result = &result.file_results[1];
    assert_eq!(txt_result.file_type, "txt");
    assert!(!txt_result.metadata.contains_key("page_count"));

    Ok(())
}

#[test]
fn test_retried_file_gets_new_identifier() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let file = temp_dir.path().join("a.txt");
    write_file(&file, "x")?;

    let processor = processor(&Arc::new(Tracker::silent()));
    let folder_guid = Uuid::new_v4();
    let first = processor.process_file(&file, folder_guid);
    let second = processor.process_file(&file, folder_guid);

    assert_ne!(first.file_guid, second.file_guid);
    assert_eq!(first.folder_guid, second.folder_guid);

    Ok(())
}

#[test]
fn test_summary_totals() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("bad.txt"), "x")?;
    write_file(&temp_dir.path().join("good.txt"), "x")?;
    write_file(&temp_dir.path().join("sub").join("fine.txt"), "x")?;

    let (folders, tracker) = scan(&Config::default(), temp_dir.path());
    let mut processor = processor(&tracker).with_extractor(Box::new(PickyExtractor));
    processor.process_folders(&folders);

    let summary = processor.summary();
    assert_eq!(summary.total_folders, 2);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.total_processed, 2);
    assert_eq!(summary.total_errors, 1);
    assert_eq!(summary.total_skipped, 0);
    assert!((summary.success_rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.folder_results.len(), 2);

    let empty = ProcessingSummary::from_results(&[]);
    assert_eq!(empty.total_files, 0);
    assert_eq!(empty.success_rate, 0.0);

    Ok(())
}

#[test]
fn test_processing_replaces_previous_run() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (folders, tracker) = scan(&Config::default(), temp_dir.path());

    let mut processor = processor(&tracker);
    processor.process_folders(&folders);
    processor.process_folders(&folders);
    assert_eq!(processor.results().len(), 1);

    processor.process_folders(&[]);
    assert!(processor.results().is_empty());
    assert_eq!(processor.summary().total_folders, 0);

    Ok(())
}

#[test]
fn test_flatten_emits_one_row_per_file_and_empty_folder() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (mut folders, tracker) = scan(&Config::default(), temp_dir.path());
    folders.push(Folder::new(temp_dir.path(), 0, vec![]));

    let mut processor = processor(&tracker);
    processor.process_folders(&folders);
    let summary = processor.summary();
    let rows = flatten(&summary);

    assert_eq!(rows.len(), 3);

    let docs_guid = folders[0].guid.to_string();
    assert_eq!(rows[0].folder_guid, docs_guid);
    assert_eq!(rows[0].filename, "a.pdf");
    assert_eq!(rows[0].status, "completed");
    assert_eq!(rows[1].filename, "b.txt");

    let empty_row = &rows[2];
    assert_eq!(empty_row.folder_guid, folders[1].guid.to_string());
    assert!(empty_row.filename.is_empty());
    assert!(empty_row.status.is_empty());
    assert!(empty_row.file_size.is_empty());

    Ok(())
}

#[test]
fn test_write_report() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let out_dir = tempdir()?;
    let config = Config {
        output_dir: out_dir.path().join("output"),
        ..Config::default()
    };

    let (folders, tracker) = scan(&config, temp_dir.path());
    fs::remove_file(temp_dir.path().join("docs").join("b.txt"))?;

    let mut processor = processor(&tracker);
    processor.process_folders(&folders);
    let summary = processor.summary();

    let writer = OutputWriter::new(&config, Arc::clone(&tracker))?;
    let paths = writer.write_report(&Scanner::summary(&folders), &summary)?;
    assert_eq!(paths.json, config.output_dir.join("processing_results.json"));
    assert_eq!(paths.csv, config.output_dir.join("processing_results.csv"));

    let json = writer.load_json("processing_results.json")?;
    assert_eq!(json["version"], "1.0");
    assert!(json["generated_at"].is_string());

    let data = &json["data"];
    assert!(data["report_generated"].is_string());
    assert_eq!(data["scan_summary"]["total_folders_found"], 1);
    assert_eq!(data["scan_summary"]["total_files_found"], 2);
    assert_eq!(data["processing_summary"]["total_folders_processed"], 1);
    assert_eq!(data["processing_summary"]["total_files_processed"], 1);
    assert_eq!(data["processing_summary"]["total_errors"], 1);
    assert_eq!(data["processing_summary"]["total_skipped"], 0);
    assert_eq!(data["processing_summary"]["success_rate"], 50.0);

    let folder = &data["detailed_results"][0];
    assert_eq!(folder["folder_name"], "docs");
    assert_eq!(folder["file_results"][1]["status"], "error");
    assert!(folder["file_results"][1]["error_message"].is_string());
    assert!(folder["file_results"][0]["error_message"].is_null());

    let mut reader = csv::Reader::from_path(&paths.csv)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    assert_eq!(headers, CSV_COLUMNS);

    let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][3], "b.txt");
    assert_eq!(&records[1][5], "error");
    assert_eq!(&records[1][7], "0");

    Ok(())
}

#[test]
fn test_empty_csv_still_has_header() -> io::Result<()> {
    let out_dir = tempdir()?;
    let config = Config {
        output_dir: out_dir.path().to_path_buf(),
        ..Config::default()
    };
    let tracker = Arc::new(Tracker::silent());
    let writer = OutputWriter::new(&config, Arc::clone(&tracker))?;

    let path = writer.save_csv(&ProcessingSummary::from_results(&[]), "empty.csv")?;
    let content = fs::read_to_string(path)?;

    assert_eq!(content.trim_end(), CSV_COLUMNS.join(","));
    assert_eq!(tracker.warning_count(), 1);

    Ok(())
}

#[test]
fn test_missing_json_is_reported() -> io::Result<()> {
    let out_dir = tempdir()?;
    let config = Config {
        output_dir: out_dir.path().to_path_buf(),
        ..Config::default()
    };
    let tracker = Arc::new(Tracker::silent());
    let writer = OutputWriter::new(&config, Arc::clone(&tracker))?;

    assert!(matches!(writer.load_json("nope.json"), Err(AuditError::Io(_))));
    assert_eq!(tracker.error_count(), 1);

    Ok(())
}

#[test]
fn test_folders_report() -> io::Result<()> {
    let temp_dir = tempdir()?;
    for i in 0..7 {
        write_file(&temp_dir.path().join(format!("f{}.txt", i)), "x")?;
    }
    let (folders, _) = scan(&Config::default(), temp_dir.path());

    for format in [ReportFormat::Plain, ReportFormat::ConsoleTable] {
        let report = Reporter::new(format).folders_report(&folders);
        assert!(report.contains("FOLDERS FOR PROCESSING"));
        assert!(report.contains("f0.txt, f1.txt, f2.txt, f3.txt, f4.txt ... and 2 more"));
        assert!(report.contains(&folders[0].guid.to_string()));
        assert!(report.contains("Total: 1 folders"));
    }

    let report = Reporter::new(ReportFormat::Plain).folders_report(&[]);
    assert_eq!(report, "No folders with processable files found.");

    Ok(())
}

#[test]
fn test_results_report() {
    let summary = ProcessingSummary::from_results(&[]);
    let report = Reporter::new(ReportFormat::Plain).results_report(&summary, "out/r.json");

    assert!(report.contains("Success rate:            0.0%"));
    assert!(report.contains("Results saved to: out/r.json"));
}
