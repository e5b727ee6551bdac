//! Configuration constants and TOML-backed settings for the converter.
//!
//! The constants describe the fixed text format of a report; the
//! [`Settings`] type carries the options a run reads from its configuration
//! file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConverterError, Result};

/// Separator written between a step and its status.
///
/// Constant width, independent of the step length. Downstream tooling
/// parses this padding, so it must stay byte-for-byte identical.
pub const DOT_PADDING: &str = ".......................................";

/// Status written after every rendered step.
pub const STEP_STATUS: &str = "passed";

/// Header line preceding a step's data table in the narration.
pub const DATA_TABLE_HEADER: &str = "DataTable:";

/// Header line preceding a step's doc string in the narration.
pub const DOC_STRING_HEADER: &str = "DocString:";

/// Separator between data table cells in the narration.
pub const DATA_TABLE_CELL_SEPARATOR: &str = " | ";

/// Prefix of the suite-level description block.
pub const FEATURE_DESCRIPTION_PREFIX: &str = "Feature Description:\n";

/// Message of the failure element attached by the heuristic classifier.
pub const SIMULATED_FAILURE_MESSAGE: &str = "Simulated failure";

/// Detail text of the failure element attached by the heuristic classifier.
pub const SIMULATED_FAILURE_DETAIL: &str =
    "Step output contains a failure keyword. No steps were executed; this status is a text heuristic.";

/// Lower-case substrings that mark a case as failed when heuristics are enabled.
pub const FAILURE_KEYWORDS: [&str; 2] = ["fail", "invalid"];

/// Classname used when `feature_name_as_classname` is disabled.
pub const DEFAULT_CLASSNAME: &str = "gherkin.Feature";

/// Format of the per-case `timestamp` attribute.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default report path.
pub const DEFAULT_OUTPUT_PATH: &str = "junit_output.xml";

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "zephyr_config.toml";

/// HTTP timeout in seconds for the upload request.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides `zephyr.auth_token`.
pub const AUTH_TOKEN_ENV: &str = "ZEPHYR_AUTH_TOKEN";

/// Conversion toggles from the `[behavior]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Skip heuristic failure classification and pass every case.
    pub mark_all_passed: bool,

    /// Tag appended to every case's tag set.
    pub extra_tag: Option<String>,

    /// Attach a construction-time `timestamp` attribute to every case.
    pub include_timestamp: bool,

    /// Use the feature name as classname instead of [`DEFAULT_CLASSNAME`].
    pub feature_name_as_classname: bool,

    /// Upload the report after writing it.
    pub upload: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            mark_all_passed: true,
            extra_tag: None,
            include_timestamp: false,
            feature_name_as_classname: true,
            upload: false,
        }
    }
}

impl ConversionConfig {
    /// The configured extra tag, if present and non-blank.
    #[must_use]
    pub fn extra_tag(&self) -> Option<&str> {
        self.extra_tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Endpoint details from the `[zephyr]` table.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZephyrConfig {
    pub upload_url: Option<String>,
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for ZephyrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZephyrConfig")
            .field("upload_url", &self.upload_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything a run reads from its configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub behavior: ConversionConfig,

    #[serde(default)]
    pub zephyr: ZephyrConfig,

    /// Job metadata forwarded verbatim to the upload endpoint.
    #[serde(default, rename = "automationJobDetail")]
    pub job_detail: toml::Table,
}

/// Resolved upload target, ready for the transport.
///
/// NOTE: Do NOT derive `Debug` on this struct, `auth_token` would be exposed.
#[derive(Clone)]
pub struct UploadSettings {
    pub url: String,
    pub auth_token: String,
    pub job_detail: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a file, failing on any problem.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConverterError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings from a file, falling back to defaults.
    ///
    /// A missing or malformed configuration never aborts a run.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "Loaded configuration");
                settings
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Using default configuration"
                );
                Self::default()
            }
        }
    }

    /// Resolve the upload target, honouring the [`AUTH_TOKEN_ENV`] override.
    pub fn upload_settings(&self) -> Result<UploadSettings> {
        self.resolve_upload(std::env::var(AUTH_TOKEN_ENV).ok())
    }

    fn resolve_upload(&self, token_override: Option<String>) -> Result<UploadSettings> {
        let url = self
            .zephyr
            .upload_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ConverterError::UploadNotConfigured("zephyr.upload_url is not set".to_string())
            })?;

        let auth_token = token_override
            .filter(|token| !token.is_empty())
            .or_else(|| self.zephyr.auth_token.clone())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ConverterError::UploadNotConfigured(format!(
                    "zephyr.auth_token is not set and {AUTH_TOKEN_ENV} is empty"
                ))
            })?;

        let job_detail = self
            .job_detail
            .iter()
            .map(|(key, value)| (key.clone(), toml_to_json(value)))
            .collect();

        Ok(UploadSettings {
            url: url.to_string(),
            auth_token,
            job_detail,
        })
    }
}

/// Convert a TOML value to JSON, keeping its type.
///
/// Datetimes have no JSON counterpart and become strings.
fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const FULL_CONFIG: &str = r#"
[behavior]
mark_all_passed = false
extra_tag = "nightly"
include_timestamp = true
feature_name_as_classname = false
upload = true

[zephyr]
upload_url = "https://zephyr.example.com/upload"
auth_token = "secret"

[automationJobDetail]
name = "Nightly run"
cycleId = 42
automated = true
"#;

    #[test]
    fn test_dot_padding_width() {
        assert_eq!(DOT_PADDING.len(), 39);
        assert!(DOT_PADDING.chars().all(|c| c == '.'));
    }

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::default();
        assert!(config.mark_all_passed);
        assert!(config.extra_tag.is_none());
        assert!(!config.include_timestamp);
        assert!(config.feature_name_as_classname);
        assert!(!config.upload);
    }

    #[test]
    fn test_parse_full_config() {
        let settings = Settings::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(
            settings.behavior,
            ConversionConfig {
                mark_all_passed: false,
                extra_tag: Some("nightly".to_string()),
                include_timestamp: true,
                feature_name_as_classname: false,
                upload: true,
            }
        );
        assert_eq!(
            settings.zephyr.upload_url.as_deref(),
            Some("https://zephyr.example.com/upload")
        );
        assert_eq!(settings.job_detail.len(), 3);
    }

    #[test]
    fn test_example_config_parses() {
        let settings =
            Settings::from_toml_str(include_str!("../zephyr_config.example.toml")).unwrap();
        assert_eq!(settings.behavior, ConversionConfig::default());
        assert!(settings.zephyr.upload_url.is_some());
        assert!(settings.job_detail.contains_key("name"));
    }

    #[test]
    fn test_partial_behavior_keeps_defaults() {
        let settings = Settings::from_toml_str("[behavior]\nextra_tag = \"smoke\"\n").unwrap();
        assert!(settings.behavior.mark_all_passed);
        assert!(settings.behavior.feature_name_as_classname);
        assert_eq!(settings.behavior.extra_tag(), Some("smoke"));
    }

    #[test]
    fn test_blank_extra_tag_is_ignored() {
        let config = ConversionConfig {
            extra_tag: Some("   ".to_string()),
            ..ConversionConfig::default()
        };
        assert_eq!(config.extra_tag(), None);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result = Settings::from_toml_str("[behavior]\nmark_all_passed = \"yes\"\n");
        assert!(matches!(result, Err(ConverterError::ConfigParse(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/zephyr_config.toml"));
        assert_eq!(settings.behavior, ConversionConfig::default());
        assert!(settings.job_detail.is_empty());
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[behavior\nmark_all_passed = ").unwrap();
        let settings = Settings::load_or_default(file.path());
        assert_eq!(settings.behavior, ConversionConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{FULL_CONFIG}").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert!(!settings.behavior.mark_all_passed);
    }

    #[test]
    fn test_resolve_upload() {
        let settings = Settings::from_toml_str(FULL_CONFIG).unwrap();
        let upload = settings.resolve_upload(None).unwrap();
        assert_eq!(upload.url, "https://zephyr.example.com/upload");
        assert_eq!(upload.auth_token, "secret");
        assert_eq!(upload.job_detail["name"], serde_json::json!("Nightly run"));
        assert_eq!(upload.job_detail["cycleId"], serde_json::json!(42));
        assert_eq!(upload.job_detail["automated"], serde_json::json!(true));
    }

    #[test]
    fn test_resolve_upload_token_override() {
        let settings = Settings::from_toml_str(FULL_CONFIG).unwrap();
        let upload = settings
            .resolve_upload(Some("from-env".to_string()))
            .unwrap();
        assert_eq!(upload.auth_token, "from-env");
    }

    #[test]
    fn test_resolve_upload_missing_url() {
        let settings = Settings::default();
        let result = settings.resolve_upload(Some("token".to_string()));
        assert!(matches!(result, Err(ConverterError::UploadNotConfigured(_))));
    }

    #[test]
    fn test_resolve_upload_missing_token() {
        let settings =
            Settings::from_toml_str("[zephyr]\nupload_url = \"https://example.com\"\n").unwrap();
        let result = settings.resolve_upload(None);
        assert!(matches!(result, Err(ConverterError::UploadNotConfigured(_))));
    }

    #[test]
    fn test_toml_to_json_nested() {
        let table: toml::Table = toml::from_str(
            "tags = [\"a\", \"b\"]\nratio = 0.5\n[inner]\nkey = \"value\"\n",
        )
        .unwrap();
        let json = toml_to_json(&toml::Value::Table(table));
        assert_eq!(
            json,
            serde_json::json!({
                "tags": ["a", "b"],
                "ratio": 0.5,
                "inner": { "key": "value" }
            })
        );
    }
}
