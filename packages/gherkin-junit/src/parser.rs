//! Feature file parsing.
//!
//! Wraps the `gherkin` crate and converts its syntax tree into the
//! converter's own [`Feature`] model: outlines become a separate variant,
//! examples tables are split into header and rows, and scenarios inside
//! `Rule:` blocks are flattened into the feature in source order.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use gherkin::GherkinEnv;

use crate::error::{ConverterError, Result};
use crate::types::{
    DataTable, Examples, Feature, Scenario, ScenarioDefinition, ScenarioOutline, Step,
};

/// Parse feature text.
///
/// # Examples
/// ```
/// use gherkin_junit::parser::parse_feature;
///
/// let feature = parse_feature("Feature: Login\n  Scenario: Valid login\n    Given a user\n").unwrap();
/// assert_eq!(feature.name, "Login");
/// assert_eq!(feature.children.len(), 1);
/// ```
pub fn parse_feature(content: &str) -> Result<Feature> {
    // The grammar expects every line, including the last, to be terminated.
    let input = if content.ends_with('\n') {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(format!("{content}\n"))
    };

    let parsed = gherkin::Feature::parse(input.as_ref(), GherkinEnv::default())?;
    Ok(convert_feature(&parsed))
}

/// Read and parse a feature file.
pub fn read_feature(path: &Path) -> Result<Feature> {
    let content = fs::read_to_string(path).map_err(|source| ConverterError::FeatureRead {
        path: path.to_path_buf(),
        source,
    })?;
    let feature = parse_feature(&content)?;
    tracing::debug!(
        path = %path.display(),
        feature = %feature.name,
        children = feature.children.len(),
        "Parsed feature"
    );
    Ok(feature)
}

fn convert_feature(feature: &gherkin::Feature) -> Feature {
    if feature.background.is_some() {
        tracing::debug!(feature = %feature.name, "Background steps are not narrated");
    }

    let mut children: Vec<(usize, ScenarioDefinition)> = feature
        .scenarios
        .iter()
        .map(|scenario| (scenario.position.line, convert_scenario(scenario, &[])))
        .collect();

    for rule in &feature.rules {
        for scenario in &rule.scenarios {
            children.push((scenario.position.line, convert_scenario(scenario, &rule.tags)));
        }
    }

    // Stable sort keeps declaration order for equal lines
    children.sort_by_key(|(line, _)| *line);

    Feature {
        name: feature.name.clone(),
        description: feature.description.clone(),
        tags: feature.tags.clone(),
        children: children.into_iter().map(|(_, child)| child).collect(),
    }
}

fn convert_scenario(scenario: &gherkin::Scenario, rule_tags: &[String]) -> ScenarioDefinition {
    let steps = scenario.steps.iter().map(convert_step).collect();

    if scenario.examples.is_empty() {
        ScenarioDefinition::Scenario(Scenario {
            name: scenario.name.clone(),
            tags: scenario.tags.clone(),
            rule_tags: rule_tags.to_vec(),
            steps,
        })
    } else {
        ScenarioDefinition::Outline(ScenarioOutline {
            name: scenario.name.clone(),
            tags: scenario.tags.clone(),
            rule_tags: rule_tags.to_vec(),
            steps,
            examples: scenario.examples.iter().map(convert_examples).collect(),
        })
    }
}

fn convert_examples(examples: &gherkin::Examples) -> Examples {
    let mut rows = examples
        .table
        .as_ref()
        .map(|table| table.rows.clone())
        .unwrap_or_default()
        .into_iter();
    let header = rows.next().unwrap_or_default();

    Examples {
        tags: examples.tags.clone(),
        header,
        rows: rows.collect(),
    }
}

fn convert_step(step: &gherkin::Step) -> Step {
    Step {
        keyword: format!("{} ", step.keyword.trim_end()),
        text: step.value.clone(),
        table: step.table.as_ref().map(|table| DataTable {
            rows: table.rows.clone(),
        }),
        doc_string: step.docstring.clone(),
    }
}
