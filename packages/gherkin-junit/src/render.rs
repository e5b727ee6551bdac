//! Step narration in the fixed console-style format of the report.

use crate::config::{
    DATA_TABLE_CELL_SEPARATOR, DATA_TABLE_HEADER, DOC_STRING_HEADER, DOT_PADDING, STEP_STATUS,
};
use crate::types::Step;

/// Render one step.
///
/// Produces `<keyword><text><padding>passed\n`, followed by a `DataTable:`
/// block and a `DocString:` block when the step carries them.
///
/// # Examples
/// ```
/// use gherkin_junit::render::render_step;
/// use gherkin_junit::types::Step;
///
/// let line = render_step(&Step::new("Given ", "a user"));
/// assert_eq!(line, "Given a user.......................................passed\n");
/// ```
#[must_use]
pub fn render_step(step: &Step) -> String {
    let mut out = String::new();
    push_step(&mut out, step);
    out
}

/// Render a sequence of steps into one narration block.
#[must_use]
pub fn render_steps<'a>(steps: impl IntoIterator<Item = &'a Step>) -> String {
    let mut out = String::new();
    for step in steps {
        push_step(&mut out, step);
    }
    out
}

fn push_step(out: &mut String, step: &Step) {
    out.push_str(&step.keyword);
    out.push_str(&step.text);
    out.push_str(DOT_PADDING);
    out.push_str(STEP_STATUS);
    out.push('\n');

    if let Some(table) = &step.table {
        out.push_str(DATA_TABLE_HEADER);
        out.push('\n');
        for row in &table.rows {
            out.push_str(&row.join(DATA_TABLE_CELL_SEPARATOR));
            out.push('\n');
        }
    }

    if let Some(doc) = &step.doc_string {
        out.push_str(DOC_STRING_HEADER);
        out.push('\n');
        out.push_str(doc);
        if !doc.ends_with('\n') {
            out.push('\n');
        }
    }
}
