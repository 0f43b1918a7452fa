//! Heading parsing.

use crate::parser::code_block::{find_code_block_ranges, is_line_in_code_block};
use crate::parser::frontmatter::split_frontmatter;
use crate::types::Heading;
use regex::Regex;
use std::sync::LazyLock;

// ATX-style heading: # Heading, ## Heading, etc.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+\^[a-zA-Z0-9_-]+)?\s*$").unwrap()
});

/// Parse all headings from content, in document order.
pub fn parse_headings(content: &str) -> Vec<Heading> {
    let code_ranges = find_code_block_ranges(content);
    let body_start = split_frontmatter(content).body_start_line;

    content
        .lines()
        .enumerate()
        .skip(body_start)
        .filter(|(line_idx, _)| !is_line_in_code_block(*line_idx, &code_ranges))
        .filter_map(|(line_idx, line)| parse_heading_line(line, line_idx))
        .collect()
}

/// Parse a single line as a heading.
pub fn parse_heading_line(line: &str, line_idx: usize) -> Option<Heading> {
    let cap = HEADING.captures(line)?;
    let level = cap.get(1)?.as_str().len() as u8;
    let text = cap.get(2)?.as_str().trim().to_string();

    Some(Heading {
        text,
        level,
        line: line_idx,
    })
}
