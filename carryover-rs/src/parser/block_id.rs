//! Block ID parsing (^block-id).

use crate::parser::code_block::{find_code_block_ranges, is_line_in_code_block};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Block ID pattern: ^id at the end of a line
// ID can contain letters, numbers, underscores, and hyphens
static BLOCK_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+\^([a-zA-Z0-9_-]+)\s*$").unwrap()
});

/// All block IDs declared in content (outside fenced code).
pub fn parse_block_ids(content: &str) -> HashSet<String> {
    let code_ranges = find_code_block_ranges(content);

    content
        .lines()
        .enumerate()
        .filter(|(line_idx, _)| !is_line_in_code_block(*line_idx, &code_ranges))
        .filter_map(|(_, line)| trailing_block_id(line))
        .map(str::to_string)
        .collect()
}

/// The block ID a line ends with, if any.
pub fn trailing_block_id(line: &str) -> Option<&str> {
    BLOCK_ID
        .captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// The line with its trailing block ID (and the whitespace before it) removed.
pub fn strip_trailing_block_id(line: &str) -> &str {
    match BLOCK_ID.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    }
}
