//! Builds the report tree from a parsed feature.

use chrono::{DateTime, Utc};

use super::{ReportCase, ReportSuite};
use crate::config::{ConversionConfig, DEFAULT_CLASSNAME, FEATURE_DESCRIPTION_PREFIX, TIMESTAMP_FORMAT};
use crate::outcome::ClassificationPolicy;
use crate::render::render_steps;
use crate::substitution::RowBinding;
use crate::tags::{resolve_tags, TagSet, TagSources};
use crate::types::{Feature, Scenario, ScenarioDefinition, ScenarioOutline};

/// Folds a [`Feature`] into a [`ReportSuite`].
///
/// The construction time is captured once, when the builder is created, and
/// shared by every case.
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    config: &'a ConversionConfig,
    policy: ClassificationPolicy,
    timestamp: Option<String>,
}

impl<'a> ReportBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self {
            config,
            policy: ClassificationPolicy::from(config),
            timestamp: None,
        }
        .at(Utc::now())
    }

    /// Use `time` as the construction time.
    #[must_use]
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.timestamp = self
            .config
            .include_timestamp
            .then(|| time.format(TIMESTAMP_FORMAT).to_string());
        self
    }

    /// Build the report for `feature`.
    ///
    /// Cases appear in source order. Outline rows that do not match their
    /// header are skipped and recorded in [`ReportSuite::warnings`].
    #[must_use]
    pub fn build(&self, feature: &Feature) -> ReportSuite {
        let mut suite = ReportSuite {
            name: feature.name.clone(),
            description: feature
                .trimmed_description()
                .map(|d| format!("{FEATURE_DESCRIPTION_PREFIX}{d}")),
            ..ReportSuite::default()
        };

        for child in &feature.children {
            match child {
                ScenarioDefinition::Scenario(scenario) => {
                    suite.cases.push(self.scenario_case(feature, scenario));
                }
                ScenarioDefinition::Outline(outline) => {
                    self.outline_cases(feature, outline, &mut suite);
                }
            }
        }

        tracing::info!(
            feature = %feature.name,
            cases = suite.cases.len(),
            failures = suite.failure_count(),
            warnings = suite.warnings.len(),
            "Built report"
        );

        suite
    }

    fn scenario_case(&self, feature: &Feature, scenario: &Scenario) -> ReportCase {
        let tags = resolve_tags(TagSources {
            feature: &feature.tags,
            rule: &scenario.rule_tags,
            scenario: &scenario.tags,
            examples: &[],
            extra: self.config.extra_tag(),
        });
        let output = render_steps(&scenario.steps);
        self.case(feature, scenario.name.clone(), tags, output)
    }

    fn outline_cases(&self, feature: &Feature, outline: &ScenarioOutline, suite: &mut ReportSuite) {
        for (block_index, examples) in outline.examples.iter().enumerate() {
            let tags = resolve_tags(TagSources {
                feature: &feature.tags,
                rule: &outline.rule_tags,
                scenario: &outline.tags,
                examples: &examples.tags,
                extra: self.config.extra_tag(),
            });

            for (row_index, row) in examples.rows.iter().enumerate() {
                let binding = match RowBinding::new(&examples.header, row, row_index + 1) {
                    Ok(binding) => binding,
                    Err(e) => {
                        tracing::warn!(
                            outline = %outline.name,
                            examples = block_index + 1,
                            error = %e,
                            "Skipping examples row"
                        );
                        suite.warnings.push(format!(
                            "Outline '{}', examples block {}: {e}",
                            outline.name,
                            block_index + 1
                        ));
                        continue;
                    }
                };

                let steps: Vec<_> = outline
                    .steps
                    .iter()
                    .map(|step| binding.substitute_step(step))
                    .collect();
                let name = format!("{} [{}]", outline.name, binding.first_value());
                let output = render_steps(&steps);
                suite.cases.push(self.case(feature, name, tags.clone(), output));
            }
        }
    }

    fn case(&self, feature: &Feature, name: String, tags: TagSet, output: String) -> ReportCase {
        let classname = if self.config.feature_name_as_classname {
            feature.name.clone()
        } else {
            DEFAULT_CLASSNAME.to_string()
        };
        let failure = self.policy.classify(&output).into_failure();
        if failure.is_some() {
            tracing::debug!(case = %name, "Case classified as failed");
        }

        ReportCase {
            classname,
            name,
            timestamp: self.timestamp.clone(),
            tags,
            output,
            failure,
        }
    }
}

/// Build the report for `feature` with the current time as construction time.
#[must_use]
pub fn build_report(feature: &Feature, config: &ConversionConfig) -> ReportSuite {
    ReportBuilder::new(config).build(feature)
}
