/*!
 * Command-line interface for folderaudit
 */

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use folderaudit::config::{Args, Config};
use folderaudit::error::Result;
use folderaudit::processor::Processor;
use folderaudit::report::{ReportFormat, Reporter};
use folderaudit::scanner::Scanner;
use folderaudit::tracker::{Tracker, TrackerOptions};
use folderaudit::writer::OutputWriter;

fn main() -> ExitCode {
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "folderaudit", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Create and validate configuration
    let config = Config::from_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let options = if args.no_log_file {
        TrackerOptions {
            echo_console: args.verbose,
            log_file: None,
        }
    } else {
        TrackerOptions::from_config(&config, args.verbose)
    };
    let tracker = Arc::new(Tracker::new(options));

    match run(&args, &config, &tracker) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\nFatal error: {}", e);
            tracker.critical("Fatal error", Some(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config, tracker: &Arc<Tracker>) -> Result<()> {
    let format = if io::stdout().is_terminal() {
        ReportFormat::ConsoleTable
    } else {
        ReportFormat::Plain
    };
    let reporter = Reporter::new(format);

    print_header(config);

    let path = match &args.path {
        Some(path) => path.clone(),
        None => match prompt_for_path()? {
            Some(path) => path,
            None => {
                println!("No path provided. Exiting.");
                return Ok(());
            }
        },
    };

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        tracker.warning(format!("Failed to set thread pool size: {}", e));
    }

    println!("\nScanning: {}", path);
    println!("{}", "-".repeat(60));

    let scanner = Scanner::new(config.clone(), Arc::clone(tracker));
    let folders = scanner.scan(&path)?;

    if folders.is_empty() {
        println!("No folders with processable files found.");
        return Ok(());
    }

    println!("{}", reporter.folders_report(&folders));

    if !args.yes && !confirm_processing(folders.len())? {
        println!("Processing cancelled.");
        return Ok(());
    }

    let scan_summary = Scanner::summary(&folders);

    // Create progress bar
    let progress = ProgressBar::new(scan_summary.total_files as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) Elapsed: {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Processing");

    let mut processor = Processor::new(config, Arc::clone(tracker), Arc::new(progress.clone()));
    processor.process_folders(&folders);
    progress.finish_and_clear();

    let summary = processor.summary();
    let writer = OutputWriter::new(config, Arc::clone(tracker))?;
    let paths = writer.write_report(&scan_summary, &summary)?;

    reporter.print_results(&summary, &paths.json.display().to_string());

    if tracker.error_count() > 0 {
        println!("\n{}", tracker.errors_report());
    }

    Ok(())
}

fn print_header(config: &Config) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("FOLDER AUDIT v{}", folderaudit::VERSION);
    println!("{}", rule);
    println!("Supported file types: {}", config.supported_extensions.join(", "));
    println!("Output directory: {}", config.output_dir.display());
    println!("{}", rule);
}

fn read_line() -> io::Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_for_path() -> io::Result<Option<String>> {
    println!("\nEnter the parent folder path to process ('q' to quit):");
    let input = read_line()?;

    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        Ok(None)
    } else {
        Ok(Some(input))
    }
}

fn confirm_processing(folder_count: usize) -> io::Result<bool> {
    println!("\nReady to process {} folder(s).", folder_count);
    println!("Continue? (y/n):");
    let response = read_line()?.to_lowercase();
    Ok(response == "y" || response == "yes")
}
