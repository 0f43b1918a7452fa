//! Splicing carried lines into a destination section.

use crate::types::{ListItemRecord, TaskSection};

/// Insert `new_lines` after the last non-blank line of `section`.
///
/// Trailing blank padding stays below the inserted block. The heading line
/// bounds the search, so nothing is ever placed above it. Returns the new
/// buffer and the line the block starts on.
pub fn insert_at_section_end<S: AsRef<str>>(
    lines: &[S],
    section: &TaskSection,
    new_lines: &[String],
) -> (Vec<String>, usize) {
    let last = section.last_line(lines.len());

    let at = (section.heading_line..=last)
        .rev()
        .find(|&i| lines.get(i).is_some_and(|l| !l.as_ref().trim().is_empty()))
        .map_or(section.start_line, |i| i + 1);

    (splice(lines, at, new_lines), at)
}

/// Insert `new_lines` right after the list item with the greatest line in
/// `section`, or at the start of the section when it holds none.
pub fn insert_after_last_task<S: AsRef<str>>(
    lines: &[S],
    section: &TaskSection,
    list_items: &[ListItemRecord],
    new_lines: &[String],
) -> (Vec<String>, usize) {
    let at = list_items
        .iter()
        .filter(|item| section.contains(item.line) && item.line < lines.len())
        .map(|item| item.line + 1)
        .max()
        .unwrap_or(section.start_line);

    (splice(lines, at, new_lines), at)
}

fn splice<S: AsRef<str>>(lines: &[S], at: usize, new_lines: &[String]) -> Vec<String> {
    let at = at.min(lines.len());
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + new_lines.len());
    out.extend(lines[..at].iter().map(|l| l.as_ref().to_string()));
    out.extend(new_lines.iter().cloned());
    out.extend(lines[at..].iter().map(|l| l.as_ref().to_string()));
    out
}
