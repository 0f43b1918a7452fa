//! Locating the task section owned by the configured heading.

use crate::types::{Heading, TaskSection};
use unicode_normalization::UnicodeNormalization;

/// Find the section under the first heading named `name` at exactly `level`.
///
/// The section starts on the line after that heading and ends on the line
/// before the next heading of the same level; with no such heading it runs
/// to the end of the note. Deeper headings belong to the section.
pub fn locate_task_section(headings: &[Heading], name: &str, level: u8) -> Option<TaskSection> {
    let wanted: String = name.trim().nfc().collect();

    let target = headings
        .iter()
        .find(|h| h.level == level && h.text.nfc().eq(wanted.chars()))?;

    let next = headings
        .iter()
        .find(|h| h.level == level && h.line > target.line);

    Some(TaskSection {
        heading_line: target.line,
        start_line: target.line + 1,
        end_line: next.map(|h| h.line - 1),
    })
}
