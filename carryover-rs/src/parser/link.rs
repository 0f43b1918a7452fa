//! Links that point at a block anchor: `[[Note#^id]]` and `[text](Note.md#^id)`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Wikilink to a block at end of line
// \[\[                     - Opening [[
// ([^\]\|#]+)              - Target path (group 1)
// #\^([a-zA-Z0-9_-]+)      - Block reference (group 2)
// (?:\|([^\]]+))?          - Alias (group 3)
// \]\]                     - Closing ]]
static TRAILING_WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[\[([^\]\|#]+)#\^([a-zA-Z0-9_-]+)(?:\|([^\]]+))?\]\]\s*$").unwrap()
});

// Markdown link to a block at end of line: [text](path#^id)
static TRAILING_MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[([^\]]*)\]\(([^)\s#]*)#\^([a-zA-Z0-9_-]+)\)\s*$").unwrap()
});

/// How links back to an origin block are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    #[default]
    Wikilink,
    Markdown,
}

/// A link to a block anchor found at the end of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLink {
    /// Link target as written (note name or encoded path).
    pub target: String,
    /// The anchor without the `^`.
    pub block_id: String,
    /// Display text, if any.
    pub alias: Option<String>,
    /// Byte offset where the link (with its leading whitespace) starts.
    pub start: usize,
}

/// The block link a line ends with, if any.
pub fn trailing_block_link(line: &str) -> Option<BlockLink> {
    if let Some(cap) = TRAILING_WIKILINK.captures(line) {
        return Some(BlockLink {
            target: cap.get(1)?.as_str().trim().to_string(),
            block_id: cap.get(2)?.as_str().to_string(),
            alias: cap.get(3).map(|m| m.as_str().to_string()),
            start: cap.get(0)?.start(),
        });
    }

    let cap = TRAILING_MARKDOWN_LINK.captures(line)?;
    let text = cap.get(1)?.as_str();
    Some(BlockLink {
        target: cap.get(2)?.as_str().to_string(),
        block_id: cap.get(3)?.as_str().to_string(),
        alias: (!text.is_empty()).then(|| text.to_string()),
        start: cap.get(0)?.start(),
    })
}

/// The line with its trailing block link removed.
pub fn strip_trailing_block_link(line: &str) -> &str {
    match trailing_block_link(line) {
        Some(link) => &line[..link.start],
        None => line,
    }
}

/// Format a wikilink to a block.
pub fn format_block_wikilink(link_text: &str, block_id: &str, alias: Option<&str>) -> String {
    let mut result = String::new();
    result.push_str("[[");
    result.push_str(link_text);
    result.push_str("#^");
    result.push_str(block_id);

    if let Some(alias) = alias {
        result.push('|');
        result.push_str(alias);
    }

    result.push_str("]]");
    result
}

/// Format a markdown link to a block, percent-encoding the path.
pub fn format_block_markdown_link(text: &str, path: &str, block_id: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("[{}]({}#^{})", text, encoded.join("/"), block_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_wikilink() {
        let link = trailing_block_link("- [ ] buy milk [[2024-01-02#^abc123]]").unwrap();
        assert_eq!(link.target, "2024-01-02");
        assert_eq!(link.block_id, "abc123");
        assert_eq!(link.alias, None);
        assert_eq!(link.start, 14);
    }

    #[test]
    fn test_trailing_wikilink_with_alias() {
        let link = trailing_block_link("- [ ] x [[Daily/2024-01-02#^ff00aa|origin]] ").unwrap();
        assert_eq!(link.target, "Daily/2024-01-02");
        assert_eq!(link.alias, Some("origin".to_string()));
    }

    #[test]
    fn test_trailing_markdown_link() {
        let link = trailing_block_link("- [ ] x [origin](Daily/2024%2001.md#^0a1b2c)").unwrap();
        assert_eq!(link.target, "Daily/2024%2001.md");
        assert_eq!(link.block_id, "0a1b2c");
        assert_eq!(link.alias, Some("origin".to_string()));
    }

    #[test]
    fn test_link_not_at_end_or_not_to_block() {
        assert!(trailing_block_link("- [ ] see [[Note#^abc]] later").is_none());
        assert!(trailing_block_link("- [ ] see [[Note#Heading]]").is_none());
        assert!(trailing_block_link("- [ ] see [[Note]]").is_none());
    }

    #[test]
    fn test_strip_trailing_block_link() {
        assert_eq!(
            strip_trailing_block_link("- [ ] buy milk [[Note#^abc123]]"),
            "- [ ] buy milk"
        );
        assert_eq!(strip_trailing_block_link("- [ ] buy milk"), "- [ ] buy milk");
    }

    #[test]
    fn test_format_links() {
        assert_eq!(format_block_wikilink("Note", "abc123", None), "[[Note#^abc123]]");
        assert_eq!(
            format_block_wikilink("Note", "abc123", Some("from")),
            "[[Note#^abc123|from]]"
        );
        assert_eq!(
            format_block_markdown_link("from", "Daily/Jan 2.md", "abc123"),
            "[from](Daily/Jan%202.md#^abc123)"
        );
    }
}
