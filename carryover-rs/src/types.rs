//! Shared types for carryover.

use serde::{Deserialize, Serialize};

/// Marker of an open checklist item (`- [ ]`).
pub const OPEN_MARKER: char = ' ';

/// Marker of a checklist item that has been carried elsewhere (`- [>]`).
pub const MIGRATED_MARKER: char = '>';

/// A heading found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// The heading text (without the # prefix).
    pub text: String,

    /// The heading level (1-6).
    pub level: u8,

    /// Line number where this heading appears (0-indexed).
    pub line: usize,
}

/// A single list item line, as reported by the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemRecord {
    /// Line number of the item (0-indexed, unique within a note).
    pub line: usize,

    /// Line number of the enclosing list item, `None` for top-level items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_line: Option<usize>,

    /// The character between the checkbox brackets, `None` for plain bullets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<char>,
}

impl ListItemRecord {
    /// Whether the item carries one of the given open markers.
    pub fn is_open(&self, open_markers: &[char]) -> bool {
        self.task.is_some_and(|marker| open_markers.contains(&marker))
    }

    /// Whether the item has already been migrated.
    pub fn is_migrated(&self) -> bool {
        self.task == Some(MIGRATED_MARKER)
    }
}

/// Headings and list items of a note, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub list_items: Vec<ListItemRecord>,
}

impl Outline {
    /// List items whose line falls inside `section`.
    pub fn list_items_in(&self, section: &TaskSection) -> Vec<ListItemRecord> {
        self.list_items
            .iter()
            .filter(|item| section.contains(item.line))
            .copied()
            .collect()
    }
}

/// The line range owned by the task heading.
///
/// `end_line` is `None` when no heading of the same level follows, meaning
/// the section runs to the end of the note. A section whose `end_line` is
/// smaller than `start_line` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSection {
    /// Line of the heading itself.
    pub heading_line: usize,

    /// First line after the heading.
    pub start_line: usize,

    /// Last line before the next same-level heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

impl TaskSection {
    /// Whether `line` lies inside the section (inclusive bounds).
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start_line && self.end_line.is_none_or(|end| line <= end)
    }

    /// Whether the section spans no lines at all.
    pub fn is_empty(&self) -> bool {
        self.end_line.is_some_and(|end| end < self.start_line)
    }

    /// Last line of the section, clamped to a note of `line_count` lines.
    pub fn last_line(&self, line_count: usize) -> usize {
        let last_in_note = line_count.saturating_sub(1);
        self.end_line.map_or(last_in_note, |end| end.min(last_in_note))
    }
}
