//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Settings, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH};
use crate::converter::{convert_file, upload_file};
use crate::error::Result;

/// Gherkin to JUnit - Convert feature files to JUnit XML reports.
#[derive(Parser)]
#[command(name = "gherkin-junit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a feature file to a JUnit XML report.
    Convert {
        /// Gherkin feature file
        feature: PathBuf,

        /// Report path (default: junit_output.xml)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// TOML configuration file (default: zephyr_config.toml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Upload the report even if `behavior.upload` is disabled
        #[arg(long)]
        upload: bool,
    },

    /// Upload an existing JUnit XML report.
    Upload {
        /// JUnit XML report
        report: PathBuf,

        /// TOML configuration file (default: zephyr_config.toml)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            feature,
            output,
            config,
            upload,
        } => convert_command(&feature, &output, &config, upload),
        Commands::Upload { report, config } => {
            let settings = Settings::load_or_default(&config);
            upload_with_spinner(&report, &settings)
        }
    }
}

/// Execute the convert command.
fn convert_command(feature: &Path, output: &Path, config: &Path, force_upload: bool) -> Result<()> {
    let settings = Settings::load_or_default(config);

    println!(
        "{} {}",
        style("Converting").bold(),
        style(feature.display()).cyan()
    );

    let conversion = convert_file(feature, output, &settings.behavior)?;
    let suite = &conversion.suite;

    println!("  Feature: {}", style(&suite.name).green());
    println!("  Test cases: {}", suite.cases.len());
    let failures = suite.failure_count();
    if failures > 0 {
        println!("  Failures: {}", style(failures).red().bold());
    }
    if !suite.warnings.is_empty() {
        println!("  Warnings: {}", style(suite.warnings.len()).yellow().bold());
        for warning in &suite.warnings {
            println!("    {}", style(warning).yellow());
        }
    }
    println!(
        "{} {}",
        style("JUnit XML generated:").green().bold(),
        conversion.output.display()
    );

    if settings.behavior.upload || force_upload {
        // The report is already on disk; a failed upload does not undo it.
        if let Err(e) = upload_with_spinner(&conversion.output, &settings) {
            eprintln!("{} {e}", style("Warning:").yellow().bold());
        }
    }

    Ok(())
}

/// Upload a report while showing a spinner.
fn upload_with_spinner(report: &Path, settings: &Settings) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Uploading report...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = upload_file(report, settings);
    pb.finish_and_clear();

    let receipt = result?;
    println!(
        "{} server returned status {}",
        style("Upload successful:").green().bold(),
        receipt.status
    );
    if !receipt.body.is_empty() {
        println!("  Response: {}", receipt.body);
    }
    Ok(())
}
