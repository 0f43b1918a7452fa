//! Building a forest of list items from flat parent-pointer records.

use crate::types::ListItemRecord;
use std::collections::HashMap;

/// A list item with the arena indices of its children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemNode {
    pub record: ListItemRecord,
    pub children: Vec<usize>,
}

/// Arena of list item nodes plus the indices of the root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItemForest {
    nodes: Vec<ListItemNode>,
    roots: Vec<usize>,
}

impl ListItemForest {
    /// Build the forest for one section's records.
    ///
    /// Records are taken in line order, so every child list is ascending. A
    /// record whose parent is not among `records` (for example because the
    /// parent sits above the section) becomes a root instead of being lost.
    pub fn build(records: &[ListItemRecord]) -> Self {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.line);
        sorted.dedup_by_key(|r| r.line);

        let index_by_line: HashMap<usize, usize> = sorted
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.line, idx))
            .collect();

        let mut nodes: Vec<ListItemNode> = sorted
            .iter()
            .map(|&record| ListItemNode {
                record,
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();

        for idx in 0..nodes.len() {
            let parent = nodes[idx]
                .record
                .parent_line
                .and_then(|line| index_by_line.get(&line).copied())
                // a parent must precede its child, which also rules out cycles
                .filter(|&parent_idx| parent_idx < idx);

            match parent {
                Some(parent_idx) => nodes[parent_idx].children.push(idx),
                None => roots.push(idx),
            }
        }

        Self { nodes, roots }
    }

    pub fn node(&self, idx: usize) -> &ListItemNode {
        &self.nodes[idx]
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, parent_line: Option<usize>) -> ListItemRecord {
        ListItemRecord { line, parent_line, task: Some(' ') }
    }

    fn lines_of(forest: &ListItemForest, indices: &[usize]) -> Vec<usize> {
        indices.iter().map(|&i| forest.node(i).record.line).collect()
    }

    #[test]
    fn test_build_nested() {
        let records = vec![
            record(2, None),
            record(3, Some(2)),
            record(4, Some(3)),
            record(5, Some(2)),
            record(6, None),
        ];
        let forest = ListItemForest::build(&records);

        assert_eq!(lines_of(&forest, forest.roots()), vec![2, 6]);
        let first = forest.roots()[0];
        assert_eq!(lines_of(&forest, &forest.node(first).children), vec![3, 5]);
    }

    #[test]
    fn test_unordered_input_gives_ordered_children() {
        let records = vec![record(5, Some(1)), record(1, None), record(3, Some(1))];
        let forest = ListItemForest::build(&records);

        let root = forest.roots()[0];
        assert_eq!(lines_of(&forest, &forest.node(root).children), vec![3, 5]);
    }

    #[test]
    fn test_orphan_becomes_root() {
        // parent on line 1 lies outside the section
        let records = vec![record(4, Some(1)), record(5, Some(4))];
        let forest = ListItemForest::build(&records);

        assert_eq!(lines_of(&forest, forest.roots()), vec![4]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_forward_parent_is_ignored() {
        let records = vec![record(1, Some(2)), record(2, Some(1))];
        let forest = ListItemForest::build(&records);

        assert_eq!(lines_of(&forest, forest.roots()), vec![1]);
        assert_eq!(lines_of(&forest, &forest.node(forest.roots()[0]).children), vec![2]);
    }

    #[test]
    fn test_empty() {
        let forest = ListItemForest::build(&[]);
        assert!(forest.is_empty());
        assert!(forest.roots().is_empty());
    }
}
