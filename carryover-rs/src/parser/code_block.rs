//! Fenced code block detection, so headings and list items inside code are skipped.

use regex::Regex;
use std::sync::LazyLock;

/// Lines covered by a fenced code block, delimiters included (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlockRange {
    pub start_line: usize,
    pub end_line: usize,
}

// Opening or closing fence: ``` or ~~~ (3 or more), optionally indented up to 3 spaces
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(`{3,}|~{3,})").unwrap()
});

/// Find all fenced code blocks in content.
///
/// An unclosed fence runs to the end of the content, as in CommonMark.
pub fn find_code_block_ranges(content: &str) -> Vec<CodeBlockRange> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char, usize)> = None; // (start line, fence char, fence len)
    let mut last_line = 0;

    for (line_idx, line) in content.lines().enumerate() {
        last_line = line_idx;
        let Some(fence) = FENCE.captures(line).and_then(|cap| cap.get(1)) else {
            continue;
        };
        let fence = fence.as_str();
        let fence_char = fence.chars().next().unwrap_or('`');

        match open {
            None => open = Some((line_idx, fence_char, fence.len())),
            Some((start_line, open_char, open_len)) => {
                let closes = fence_char == open_char
                    && fence.len() >= open_len
                    && line.trim().chars().all(|c| c == open_char);
                if closes {
                    ranges.push(CodeBlockRange {
                        start_line,
                        end_line: line_idx,
                    });
                    open = None;
                }
            }
        }
    }

    if let Some((start_line, _, _)) = open {
        ranges.push(CodeBlockRange {
            start_line,
            end_line: last_line,
        });
    }

    ranges
}

/// Check if a line is inside any fenced code block.
pub fn is_line_in_code_block(line: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges
        .iter()
        .any(|range| line >= range.start_line && line <= range.end_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let content = "text\n```rust\n- [ ] not a task\n```\nafter";
        let ranges = find_code_block_ranges(content);
        assert_eq!(ranges, vec![CodeBlockRange { start_line: 1, end_line: 3 }]);
        assert!(is_line_in_code_block(2, &ranges));
        assert!(!is_line_in_code_block(4, &ranges));
    }

    #[test]
    fn test_tilde_fence_ignores_backticks_inside() {
        let content = "~~~\n```\n~~~\n";
        let ranges = find_code_block_ranges(content);
        assert_eq!(ranges, vec![CodeBlockRange { start_line: 0, end_line: 2 }]);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let content = "a\n```\nb\nc";
        let ranges = find_code_block_ranges(content);
        assert_eq!(ranges, vec![CodeBlockRange { start_line: 1, end_line: 3 }]);
    }

    #[test]
    fn test_closing_fence_must_be_long_enough() {
        let content = "````\n```\n````";
        let ranges = find_code_block_ranges(content);
        assert_eq!(ranges, vec![CodeBlockRange { start_line: 0, end_line: 2 }]);
    }
}
