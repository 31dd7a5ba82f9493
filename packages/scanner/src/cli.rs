//! Command-line interface for the scanner.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::load_collection;
use crate::config::{default_namespaces, CollectionConfig, ScanConfig, DEFAULT_TERMS};
use crate::dialect::{Dialect, SchemaDialect};
use crate::error::{Result, ScannerError};
use crate::extract::extract_document;
use crate::reader::SourceDocument;
use crate::report::{save_reports, write_records_csv};
use crate::scanner::{CollectionScan, Scanner};
use crate::types::Record;

/// Finding Aid Scanner - Find harmful terminology in EAD finding aids.
#[derive(Parser)]
#[command(name = "findingaid-scanner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, match and report every collection in a scan file.
    Scan {
        /// Scan file (YAML) listing terms and collections
        config: PathBuf,

        /// Output directory (default: output_dir from the scan file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only scan the collection with this name
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Extract records from one finding aid or a directory of them.
    Extract {
        /// XML file or directory of XML files
        path: PathBuf,

        /// Schema dialect of the documents
        #[arg(short, long, value_enum, default_value_t = Dialect::Plain)]
        dialect: Dialect,

        /// Write the extracted fields to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default term list.
    Terms,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            output,
            collection,
        } => scan_command(&config, output, collection.as_deref()),
        Commands::Extract {
            path,
            dialect,
            output,
        } => extract_command(&path, dialect, output.as_deref()),
        Commands::Terms => {
            for term in DEFAULT_TERMS {
                println!("{term}");
            }
            Ok(())
        }
    }
}

/// Execute the scan command.
fn scan_command(config_path: &Path, output: Option<PathBuf>, only: Option<&str>) -> Result<()> {
    let mut config = ScanConfig::from_file(config_path)?;
    if let Some(output_dir) = output {
        config.output_dir = output_dir;
    }
    if config.output_dir.exists() && !config.output_dir.is_dir() {
        return Err(ScannerError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", config.output_dir.display()),
        )));
    }

    let scanner = Scanner::from_config(&config)?;
    let collections: Vec<&CollectionConfig> = match only {
        Some(name) => vec![config.collection(name)?],
        None => config.collections.iter().collect(),
    };

    let mut failed = Vec::new();
    for collection in collections {
        println!(
            "{} {} ({})",
            style("Scanning").bold(),
            style(&collection.name).cyan(),
            collection.dialect
        );

        let pb = spinner();
        pb.set_message(format!("Reading {}", collection.path.display()));
        let scanned = scanner.scan_with_progress(collection, |path| {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            pb.set_message(format!("Extracted {name}"));
        });

        let scan = match scanned {
            Ok(scan) => scan,
            Err(e) => {
                pb.finish_and_clear();
                tracing::error!(collection = %collection.name, error = %e, "Collection failed");
                println!("  {} {e}", style("Failed:").red().bold());
                println!();
                failed.push(collection.name.clone());
                continue;
            }
        };

        pb.set_message("Saving reports...");
        let saved = save_reports(&scan, collection.chart_color(), &config.output_dir);
        pb.finish_and_clear();

        print_scan_summary(&scan);
        match saved {
            Ok(paths) => {
                println!("  {} {}", style("Saved to:").green().bold(), paths.extracted.display());
                println!("            {}", paths.matches.display());
                println!("            {}", paths.frequencies.display());
                println!("            {}", paths.chart.display());
            }
            Err(e) => {
                println!("  {} {e}", style("Failed:").red().bold());
                failed.push(collection.name.clone());
            }
        }
        println!();
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(ScannerError::CollectionsFailed(failed))
    }
}

/// Execute the extract command.
fn extract_command(path: &Path, dialect: Dialect, output: Option<&Path>) -> Result<()> {
    let schema = SchemaDialect::from_config(dialect, &default_namespaces())?;

    let records = if path.is_dir() {
        let report = load_collection(path, &schema)?;
        println!("  Documents: {} ({} failed)", report.documents, report.failures.len());
        for failure in &report.failures {
            println!("  {} {failure}", style("Skipped:").yellow());
        }
        report.records
    } else {
        let source = SourceDocument::open(path)?;
        extract_document(&source, &schema)?
    };

    println!("  Records: {}", style(records.len()).green());

    match output {
        Some(file) => {
            write_records_csv(BufWriter::new(File::create(file)?), &records)?;
            println!("{} {}", style("Saved to:").green().bold(), file.display());
        }
        None => print_records(&records),
    }

    Ok(())
}

fn print_scan_summary(scan: &CollectionScan) {
    let batch = &scan.batch;
    println!("  Documents: {}", batch.documents);
    if !batch.failures.is_empty() {
        println!("  Skipped: {}", style(batch.failures.len()).yellow().bold());
        for failure in &batch.failures {
            println!("    {failure}");
        }
    }
    println!("  Records: {}", batch.records.len());
    println!("  Matches: {}", style(scan.matches.len()).green());
    for entry in &scan.frequencies {
        println!("    {:<28} {}", entry.term, entry.total_frequency);
    }
}

fn print_records(records: &[Record]) {
    for (index, record) in records.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            style(format!("[{index}]")).bold(),
            style(record.ead_id().unwrap_or("(no ead_id)")).cyan()
        );
        for (field, value) in record.iter() {
            println!("  {:<13} {}", field.as_str(), preview(value));
        }
    }
}

/// Shorten a value to one line for terminal output.
fn preview(value: &str) -> String {
    const MAX_CHARS: usize = 100;
    let line = value.lines().next().unwrap_or_default();
    if line.chars().count() > MAX_CHARS || line.len() < value.len() {
        let cut: String = line.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["findingaid-scanner", "scan", "scan.yaml"]);

        let Commands::Scan {
            config,
            output,
            collection,
        } = cli.command
        else {
            panic!("expected scan command");
        };
        assert_eq!(config, PathBuf::from("scan.yaml"));
        assert!(output.is_none());
        assert!(collection.is_none());
    }

    #[test]
    fn test_cli_parse_scan_with_options() {
        let cli = Cli::parse_from([
            "findingaid-scanner",
            "scan",
            "scan.yaml",
            "--output",
            "reports",
            "--collection",
            "SCRC",
        ]);

        let Commands::Scan {
            output, collection, ..
        } = cli.command
        else {
            panic!("expected scan command");
        };
        assert_eq!(output, Some(PathBuf::from("reports")));
        assert_eq!(collection, Some("SCRC".to_string()));
    }

    #[test]
    fn test_cli_parse_extract_defaults_to_plain() {
        let cli = Cli::parse_from(["findingaid-scanner", "extract", "umich-bhl-0052.xml"]);

        let Commands::Extract { dialect, output, .. } = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(dialect, Dialect::Plain);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_extract_namespaced() {
        let cli = Cli::parse_from([
            "findingaid-scanner",
            "extract",
            "SCRC_XML",
            "--dialect",
            "namespaced",
        ]);

        let Commands::Extract { dialect, .. } = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(dialect, Dialect::Namespaced);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first...");
        assert_eq!(preview(&"x".repeat(120)), format!("{}...", "x".repeat(100)));
    }
}
