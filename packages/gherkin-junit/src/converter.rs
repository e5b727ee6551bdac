//! Main conversion service that ties all components together.

use std::path::{Path, PathBuf};

use crate::config::{ConversionConfig, Settings};
use crate::error::Result;
use crate::http::create_client;
use crate::parser::{parse_feature, read_feature};
use crate::report::{build_report, save_report, ReportSuite};
use crate::upload::{upload_report, UploadReceipt};

/// Result of converting one feature file.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The report tree that was written.
    pub suite: ReportSuite,

    /// Where the report was written.
    pub output: PathBuf,
}

/// Parse feature text and build its report tree.
pub fn convert_feature(content: &str, config: &ConversionConfig) -> Result<ReportSuite> {
    let feature = parse_feature(content)?;
    Ok(build_report(&feature, config))
}

/// Convert a feature file into a JUnit XML report on disk.
///
/// # Arguments
/// * `feature_path` - The Gherkin feature file
/// * `output` - Path of the report to write
/// * `config` - Conversion toggles
///
/// # Returns
/// The built report and the path it was written to
pub fn convert_file(
    feature_path: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<Conversion> {
    let feature = read_feature(feature_path)?;
    let suite = build_report(&feature, config);
    let output = save_report(&suite, output)?;

    tracing::info!(
        feature = %feature_path.display(),
        report = %output.display(),
        cases = suite.cases.len(),
        "JUnit XML generated"
    );

    Ok(Conversion { suite, output })
}

/// Upload an existing report using the endpoint from `settings`.
pub fn upload_file(report: &Path, settings: &Settings) -> Result<UploadReceipt> {
    let upload = settings.upload_settings()?;
    let client = create_client()?;
    upload_report(&client, report, &upload)
}
