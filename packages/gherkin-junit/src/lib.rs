//! Gherkin to JUnit - Convert feature files to JUnit XML reports.
//!
//! This crate reads Gherkin feature files, expands scenario outlines against
//! their examples tables and writes a JUnit XML report that CI dashboards and
//! test-management tools can ingest. Reports can optionally be uploaded to a
//! Zephyr-style endpoint.
//!
//! No test logic is executed. Every step is reported as passed, and a case
//! is only marked failed by a keyword heuristic when
//! `behavior.mark_all_passed` is disabled.
//!
//! # Example
//!
//! ```
//! use gherkin_junit::config::ConversionConfig;
//! use gherkin_junit::converter::convert_feature;
//!
//! let feature = "Feature: Login\n  Scenario: Valid login\n    Given a user\n";
//! let suite = convert_feature(feature, &ConversionConfig::default()).unwrap();
//! assert_eq!(suite.cases[0].name, "Valid login");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Format constants and TOML settings
//! - [`types`]: Feature model (scenarios, outlines, steps)
//! - [`error`]: Error types and Result alias
//! - [`parser`]: Feature file parsing
//! - [`tags`]: Tag resolution across nesting levels
//! - [`substitution`]: Outline placeholder substitution
//! - [`render`]: Step narration
//! - [`outcome`]: Pass/fail classification
//! - [`report`]: Report tree building and XML output
//! - [`http`]: HTTP client with retries
//! - [`upload`]: Multipart report upload
//! - [`converter`]: Main conversion service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod http;
pub mod outcome;
pub mod parser;
pub mod render;
pub mod report;
pub mod substitution;
pub mod tags;
pub mod types;
pub mod upload;

// Re-export main functions
pub use converter::{convert_feature, convert_file, upload_file};

// Re-export commonly used items
pub use config::{ConversionConfig, Settings};
pub use error::{ConverterError, Result};
pub use report::{ReportCase, ReportSuite};
pub use types::{Feature, ScenarioDefinition};
