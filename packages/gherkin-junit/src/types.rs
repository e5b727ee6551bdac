//! Feature document types.
//!
//! These types are the converter's view of a parsed Gherkin feature. They
//! are produced by [`crate::parser`] and never mutated afterwards.

/// A data table attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// Rows of cells, in source order.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a table from rows of cells.
    #[must_use]
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// A single step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keyword including its trailing space (e.g., "Given ").
    pub keyword: String,

    /// Step text, possibly containing `<column>` placeholders.
    pub text: String,

    /// Optional data table.
    pub table: Option<DataTable>,

    /// Optional doc string.
    pub doc_string: Option<String>,
}

impl Step {
    /// Create a step without table or doc string.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            table: None,
            doc_string: None,
        }
    }

    /// Attach a data table.
    #[must_use]
    pub fn with_table(mut self, table: DataTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Attach a doc string.
    #[must_use]
    pub fn with_doc_string(mut self, doc_string: impl Into<String>) -> Self {
        self.doc_string = Some(doc_string.into());
        self
    }
}

/// One `Examples:` block of a scenario outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Examples {
    /// Tags declared on the examples block.
    pub tags: Vec<String>,

    /// Column names.
    pub header: Vec<String>,

    /// Data rows, aligned positionally to `header`.
    pub rows: Vec<Vec<String>>,
}

impl Examples {
    /// Create an examples block from a header and rows.
    #[must_use]
    pub fn new<H, R, C>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            tags: Vec::new(),
            header: header.into_iter().map(Into::into).collect(),
            rows: DataTable::new(rows).rows,
        }
    }

    /// Set the block's tags.
    #[must_use]
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A plain scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub tags: Vec<String>,

    /// Tags of the enclosing `Rule:` block, if any.
    pub rule_tags: Vec<String>,

    pub steps: Vec<Step>,
}

impl Scenario {
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A scenario outline, expanded once per examples row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutline {
    pub name: String,
    pub tags: Vec<String>,

    /// Tags of the enclosing `Rule:` block, if any.
    pub rule_tags: Vec<String>,

    pub steps: Vec<Step>,
    pub examples: Vec<Examples>,
}

impl ScenarioOutline {
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>, examples: Vec<Examples>) -> Self {
        Self {
            name: name.into(),
            steps,
            examples,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A child of a feature: either a scenario or a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioDefinition {
    Scenario(Scenario),
    Outline(ScenarioOutline),
}

impl ScenarioDefinition {
    /// Name of the scenario or outline.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(scenario) => &scenario.name,
            Self::Outline(outline) => &outline.name,
        }
    }
}

impl From<Scenario> for ScenarioDefinition {
    fn from(scenario: Scenario) -> Self {
        Self::Scenario(scenario)
    }
}

impl From<ScenarioOutline> for ScenarioDefinition {
    fn from(outline: ScenarioOutline) -> Self {
        Self::Outline(outline)
    }
}

/// A parsed feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub children: Vec<ScenarioDefinition>,
}

impl Feature {
    /// Create an empty feature.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Append a scenario or outline.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<ScenarioDefinition>) -> Self {
        self.children.push(child.into());
        self
    }

    /// The description, if it holds more than whitespace.
    #[must_use]
    pub fn trimmed_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let step = Step::new("Given ", "a table")
            .with_table(DataTable::new([["a", "b"]]))
            .with_doc_string("text");
        assert_eq!(step.keyword, "Given ");
        assert_eq!(step.table.unwrap().rows, vec![vec!["a", "b"]]);
        assert_eq!(step.doc_string.as_deref(), Some("text"));
    }

    #[test]
    fn test_examples_new() {
        let examples = Examples::new(["query", "result"], [["cat", "found"]]).with_tags(["@fast"]);
        assert_eq!(examples.header, vec!["query", "result"]);
        assert_eq!(examples.rows, vec![vec!["cat", "found"]]);
        assert_eq!(examples.tags, vec!["@fast"]);
    }

    #[test]
    fn test_definition_name() {
        let scenario: ScenarioDefinition = Scenario::new("Valid login", vec![]).into();
        let outline: ScenarioDefinition = ScenarioOutline::new("Search", vec![], vec![]).into();
        assert_eq!(scenario.name(), "Valid login");
        assert_eq!(outline.name(), "Search");
    }

    #[test]
    fn test_trimmed_description() {
        assert_eq!(Feature::new("F").trimmed_description(), None);
        assert_eq!(
            Feature::new("F").with_description("  \n ").trimmed_description(),
            None
        );
        assert_eq!(
            Feature::new("F")
                .with_description("  As a user\n  I log in  ")
                .trimmed_description(),
            Some("As a user\n  I log in")
        );
    }
}
