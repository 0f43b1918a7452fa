//! List item parsing: every bullet line with its structural parent and task marker.

use crate::parser::code_block::{find_code_block_ranges, is_line_in_code_block};
use crate::parser::frontmatter::split_frontmatter;
use crate::parser::heading::parse_heading_line;
use crate::types::ListItemRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Any list item: optional indent, then `-`, `*`, `+`, `1.` or `1)`.
static LIST_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(?:[-*+]|\d{1,9}[.)])(?:[ \t]|$)").unwrap()
});

/// Regex for task lines.
/// Matches: optional indent, "- [marker] ", then the rest.
static TASK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)- \[(.)\] (.*)$").unwrap()
});

/// Columns a tab advances the indentation by.
const TAB_WIDTH: usize = 4;

/// Parse all list items from content.
///
/// The parent of an item is the nearest preceding item with a smaller
/// indentation that is still open. Blank lines keep items open and a heading
/// closes all of them. A text line directly under an item continues that
/// item; after a blank line it closes every item indented at or beyond its
/// own indentation.
pub fn parse_list_items(content: &str) -> Vec<ListItemRecord> {
    let code_ranges = find_code_block_ranges(content);
    let body_start = split_frontmatter(content).body_start_line;
    let mut items = Vec::new();
    let mut parent_stack: Vec<(usize, usize)> = Vec::new(); // (indent, line)
    let mut continues_item = false;

    for (line_idx, line) in content.lines().enumerate().skip(body_start) {
        if is_line_in_code_block(line_idx, &code_ranges) {
            continue;
        }

        if parse_heading_line(line, line_idx).is_some() {
            parent_stack.clear();
            continues_item = false;
            continue;
        }

        if let Some(indent) = list_item_indent(line) {
            while parent_stack.last().is_some_and(|&(open, _)| open >= indent) {
                parent_stack.pop();
            }

            items.push(ListItemRecord {
                line: line_idx,
                parent_line: parent_stack.last().map(|&(_, parent)| parent),
                task: task_marker(line),
            });
            parent_stack.push((indent, line_idx));
            continues_item = true;
        } else if line.trim().is_empty() {
            continues_item = false;
        } else if !continues_item {
            let indent = indent_width(line);
            while parent_stack.last().is_some_and(|&(open, _)| open >= indent) {
                parent_stack.pop();
            }
        }
    }

    items
}

/// Indentation of a list item line, or `None` when the line is not a list item.
pub fn list_item_indent(line: &str) -> Option<usize> {
    let caps = LIST_ITEM_REGEX.captures(line)?;
    Some(indent_width(caps.get(1).map_or("", |m| m.as_str())))
}

/// The marker inside `- [marker] `, if the line is a task.
pub fn task_marker(line: &str) -> Option<char> {
    let caps = TASK_REGEX.captures(line)?;
    caps.get(2)?.as_str().chars().next()
}

/// Replace the task marker of a task line, keeping everything else intact.
///
/// Returns `None` when the line is not a task.
pub fn with_task_marker(line: &str, marker: char) -> Option<String> {
    let caps = TASK_REGEX.captures(line)?;
    let old = caps.get(2)?;
    let mut updated = String::with_capacity(line.len());
    updated.push_str(&line[..old.start()]);
    updated.push(marker);
    updated.push_str(&line[old.end()..]);
    Some(updated)
}

/// Count leading indentation in columns.
fn indent_width(s: &str) -> usize {
    let mut width = 0;
    for c in s.chars() {
        match c {
            '\t' => width += TAB_WIDTH,
            ' ' => width += 1,
            _ => break,
        }
    }
    width
}
