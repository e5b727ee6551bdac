//! Placeholder substitution for scenario outline steps.
//!
//! Each `<column>` token is replaced by the value of that column in the
//! current examples row. Replacement is sequential in header order: a value
//! inserted for an earlier column is visible to later columns.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConverterError, Result};
use crate::types::{DataTable, Step};

/// Matches any `<...>` token left in substituted text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>\s][^<>]*)>").expect("valid regex"));

/// One examples row bound to its header.
#[derive(Debug, Clone, Copy)]
pub struct RowBinding<'a> {
    header: &'a [String],
    row: &'a [String],
}

impl<'a> RowBinding<'a> {
    /// Bind a row to its header.
    ///
    /// # Arguments
    /// * `header` - Column names of the examples block
    /// * `row` - Cell values
    /// * `row_number` - 1-based position of the row, used in the error
    ///
    /// # Returns
    /// * `Err(ConverterError::MalformedTable)` if the lengths differ
    pub fn new(header: &'a [String], row: &'a [String], row_number: usize) -> Result<Self> {
        if header.len() != row.len() {
            return Err(ConverterError::MalformedTable {
                row: row_number,
                expected: header.len(),
                actual: row.len(),
            });
        }
        Ok(Self { header, row })
    }

    /// Value of the first column, used to name the generated case.
    #[must_use]
    pub fn first_value(&self) -> &'a str {
        self.row.first().map(String::as_str).unwrap_or_default()
    }

    /// Replace every `<column>` in `text` with its value.
    ///
    /// # Examples
    /// ```
    /// use gherkin_junit::substitution::RowBinding;
    ///
    /// let header = vec!["query".to_string(), "result".to_string()];
    /// let row = vec!["cat".to_string(), "found".to_string()];
    /// let binding = RowBinding::new(&header, &row, 1).unwrap();
    /// assert_eq!(
    ///     binding.substitute("When I search for <query> the result is <result>"),
    ///     "When I search for cat the result is found"
    /// );
    /// ```
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (column, value) in self.header.iter().zip(self.row) {
            let token = format!("<{column}>");
            if result.contains(&token) {
                result = result.replace(&token, value);
            }
        }
        result
    }

    /// Substitute the step text, table cells and doc string of a step.
    #[must_use]
    pub fn substitute_step(&self, step: &Step) -> Step {
        let substituted = Step {
            keyword: step.keyword.clone(),
            text: self.substitute(&step.text),
            table: step.table.as_ref().map(|table| DataTable {
                rows: table
                    .rows
                    .iter()
                    .map(|row| row.iter().map(|cell| self.substitute(cell)).collect())
                    .collect(),
            }),
            doc_string: step.doc_string.as_deref().map(|doc| self.substitute(doc)),
        };

        let leftover = unresolved_placeholders(&substituted.text);
        if !leftover.is_empty() {
            tracing::debug!(
                step = %substituted.text,
                placeholders = ?leftover,
                "Step text still contains placeholders"
            );
        }

        substituted
    }
}

/// Names of `<...>` tokens still present in `text`.
#[must_use]
pub fn unresolved_placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
