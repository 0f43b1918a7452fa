//! Back-reference anchors on the lines left behind and links on the lines carried.

use crate::parser::{strip_trailing_block_id, strip_trailing_block_link, trailing_block_id, trailing_block_link};
use crate::store::LinkResolver;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// Length of a minted anchor, in hex characters.
pub const ANCHOR_LEN: usize = 6;

const MAX_ANCHOR_ATTEMPTS: usize = 32;

/// Draw a fresh anchor that is not in `existing`.
///
/// After a bounded number of collisions the last draw is returned anyway.
pub fn mint_anchor(existing: &HashSet<String>) -> String {
    let mut anchor = draw_anchor();
    for _ in 1..MAX_ANCHOR_ATTEMPTS {
        if !existing.contains(&anchor) {
            break;
        }
        anchor = draw_anchor();
    }
    anchor
}

fn draw_anchor() -> String {
    Uuid::new_v4().simple().to_string()[..ANCHOR_LEN].to_string()
}

/// A line after linking: the version kept in the source note and the
/// version carried to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedLine {
    pub source: String,
    pub carried: String,
}

/// Links migrated lines of one source note back to their origin.
pub struct Linker<'a, R: LinkResolver + ?Sized> {
    source: &'a Path,
    destination: &'a Path,
    resolver: &'a R,
    alias: Option<&'a str>,
    tag: Option<&'a str>,
    anchors: HashSet<String>,
}

impl<'a, R: LinkResolver + ?Sized> Linker<'a, R> {
    /// `anchors` are the block ids the source note already declares.
    pub fn new(source: &'a Path, destination: &'a Path, resolver: &'a R, anchors: HashSet<String>) -> Self {
        Self {
            source,
            destination,
            resolver,
            alias: None,
            tag: None,
            anchors,
        }
    }

    pub fn with_alias(mut self, alias: Option<&'a str>) -> Self {
        self.alias = alias.filter(|a| !a.trim().is_empty());
        self
    }

    pub fn with_tag(mut self, tag: Option<&'a str>) -> Self {
        self.tag = tag.map(str::trim).filter(|t| !t.is_empty());
        self
    }

    /// Anchor `line` in the source and link the carried copy back to it.
    ///
    /// A line that already ends with a block link keeps that link and gets no
    /// anchor. A line that already ends with an anchor reuses it.
    pub fn link(&mut self, line: &str) -> LinkedLine {
        if let Some(existing) = trailing_block_link(line) {
            let body = strip_trailing_block_link(line);
            let link = line[existing.start..].trim();
            return LinkedLine {
                source: line.to_string(),
                carried: format!("{} {}", self.tagged(body), link),
            };
        }

        let (source, body, anchor) = match trailing_block_id(line) {
            Some(id) => (line.to_string(), strip_trailing_block_id(line), id.to_string()),
            None => {
                let anchor = mint_anchor(&self.anchors);
                self.anchors.insert(anchor.clone());
                let body = line.trim_end();
                (format!("{} ^{}", body, anchor), body, anchor)
            }
        };

        let link = self
            .resolver
            .resolve_link(self.destination, self.source, &anchor, self.alias);

        LinkedLine {
            source,
            carried: format!("{} {}", self.tagged(body), link),
        }
    }

    /// `body` with the tag appended unless it already carries it.
    fn tagged(&self, body: &str) -> String {
        let body = body.trim_end();
        match self.tag {
            Some(tag) if !body.split_whitespace().any(|word| word == tag) => {
                format!("{} {}", body, tag)
            }
            _ => body.to_string(),
        }
    }
}
