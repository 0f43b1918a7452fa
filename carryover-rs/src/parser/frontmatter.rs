//! YAML frontmatter detection.

use crate::error::{MigrationError, Result};
use serde_yaml::Value;
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// Line number where the body starts (0-indexed).
    pub body_start_line: usize,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with `---` on the very first line and close with a
/// line holding only `---`.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body_start_line: 0,
    };

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == "---" && first.ends_with('\n') => {}
        _ => return no_frontmatter,
    }

    let yaml_start = content.find('\n').map_or(content.len(), |pos| pos + 1);
    let mut offset = yaml_start;
    for (idx, line) in lines.enumerate() {
        if line.trim_end() == "---" {
            let yaml = content[yaml_start..offset].trim_end_matches(['\n', '\r']);
            return FrontmatterSplit {
                yaml: Some(yaml),
                // opening delimiter + yaml lines + closing delimiter
                body_start_line: idx + 2,
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse frontmatter into a serde_yaml::Value, naming `path` in errors.
pub fn parse_frontmatter_with_path(content: &str, path: &Path) -> Result<Option<Value>> {
    match split_frontmatter(content).yaml {
        Some(yaml) => {
            let value: Value =
                serde_yaml::from_str(yaml).map_err(|e| MigrationError::InvalidFrontmatter {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Aliases declared in the `aliases` frontmatter key (list or scalar).
pub fn frontmatter_aliases(frontmatter: &Value) -> Vec<String> {
    match frontmatter.get("aliases") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(alias)) => vec![alias.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let split = split_frontmatter("# Title\n\nBody");
        assert!(split.yaml.is_none());
        assert_eq!(split.body_start_line, 0);
    }

    #[test]
    fn test_frontmatter_body_start() {
        let content = "---\ntitle: Test\ntags: [a]\n---\n## Tasks\n";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test\ntags: [a]"));
        assert_eq!(split.body_start_line, 4);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let split = split_frontmatter("---\ntitle: Test\n");
        assert!(split.yaml.is_none());
        assert_eq!(split.body_start_line, 0);
    }

    #[test]
    fn test_aliases() {
        let content = "---\naliases:\n  - inbox\n  - triage\n---\nBody";
        let fm = parse_frontmatter_with_path(content, Path::new("Inbox.md"))
            .unwrap()
            .unwrap();
        assert_eq!(frontmatter_aliases(&fm), vec!["inbox", "triage"]);

        let scalar = parse_frontmatter_with_path("---\naliases: solo\n---\n", Path::new("a.md"))
            .unwrap()
            .unwrap();
        assert_eq!(frontmatter_aliases(&scalar), vec!["solo"]);
    }

    #[test]
    fn test_invalid_frontmatter_names_path() {
        let content = "---\nkey: [unclosed\n---\nBody";
        let err = parse_frontmatter_with_path(content, Path::new("Broken.md")).unwrap_err();
        assert!(err.to_string().contains("Broken.md"));
    }
}
