//! Selecting the open tasks of a forest together with their structural context.

use crate::migrate::tree::ListItemForest;
use crate::types::ListItemRecord;

/// A node kept by [`prune`], with only its kept children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratableNode {
    /// Index into the forest arena.
    pub index: usize,
    pub children: Vec<MigratableNode>,
}

/// Decide whether the subtree at `index` qualifies and prune its children.
///
/// A node qualifies when its own marker is open or when any child subtree
/// qualifies. The returned children are exactly the qualifying ones.
pub fn prune(forest: &ListItemForest, index: usize, open_markers: &[char]) -> (bool, Vec<MigratableNode>) {
    let node = forest.node(index);

    let kept: Vec<MigratableNode> = node
        .children
        .iter()
        .filter_map(|&child| {
            let (qualifies, children) = prune(forest, child, open_markers);
            qualifies.then_some(MigratableNode { index: child, children })
        })
        .collect();

    let qualifies = node.record.is_open(open_markers) || !kept.is_empty();
    (qualifies, kept)
}

/// The pruned forest: every qualifying root with its pruned subtree.
pub fn migratable_forest(forest: &ListItemForest, open_markers: &[char]) -> Vec<MigratableNode> {
    forest
        .roots()
        .iter()
        .filter_map(|&root| {
            let (qualifies, children) = prune(forest, root, open_markers);
            qualifies.then_some(MigratableNode { index: root, children })
        })
        .collect()
}

/// Flatten a pruned forest into records in ascending line order, each once.
pub fn flatten(forest: &ListItemForest, pruned: &[MigratableNode]) -> Vec<ListItemRecord> {
    fn walk(forest: &ListItemForest, node: &MigratableNode, out: &mut Vec<ListItemRecord>) {
        out.push(forest.node(node.index).record);
        for child in &node.children {
            walk(forest, child, out);
        }
    }

    let mut out = Vec::new();
    for node in pruned {
        walk(forest, node, &mut out);
    }
    out.sort_by_key(|record| record.line);
    out.dedup_by_key(|record| record.line);
    out
}

/// Records of `records` that should be carried: open tasks and their ancestors.
pub fn select_migratable(records: &[ListItemRecord], open_markers: &[char]) -> Vec<ListItemRecord> {
    let forest = ListItemForest::build(records);
    let pruned = migratable_forest(&forest, open_markers);
    flatten(&forest, &pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_list_items;
    use crate::types::OPEN_MARKER;

    fn selected_lines(content: &str) -> Vec<usize> {
        select_migratable(&parse_list_items(content), &[OPEN_MARKER])
            .iter()
            .map(|r| r.line)
            .collect()
    }

    #[test]
    fn test_closed_sibling_not_selected() {
        let content = "- [ ] open\n- [x] done\n- [ ] also open";
        assert_eq!(selected_lines(content), vec![0, 2]);
    }

    #[test]
    fn test_open_child_keeps_closed_ancestors() {
        let content = "- [x] project\n  - [x] phase\n    - [ ] step\n  - [x] other phase\n- [x] unrelated";
        assert_eq!(selected_lines(content), vec![0, 1, 2]);
    }

    #[test]
    fn test_plain_bullets_as_context() {
        let content = "- Groceries\n  - [ ] milk\n  - [x] eggs\n  - a note\n- Other\n  - [x] done";
        assert_eq!(selected_lines(content), vec![0, 1]);
    }

    #[test]
    fn test_continuation_text_keeps_context() {
        let content = "- [x] project\nmore about the project\n  - [ ] step";
        assert_eq!(selected_lines(content), vec![0, 2]);
    }

    #[test]
    fn test_open_parent_takes_no_closed_children() {
        let content = "- [ ] parent\n  - [x] done child\n  - plain child";
        assert_eq!(selected_lines(content), vec![0]);
    }

    #[test]
    fn test_deep_hierarchy_preserved() {
        let content = "- a\n  - b\n    - c\n      - d\n        - [ ] e\n- f";
        assert_eq!(selected_lines(content), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_migrated_tasks_not_selected() {
        let content = "- [>] moved\n  - [>] moved child\n- [-] cancelled";
        assert!(selected_lines(content).is_empty());
    }

    #[test]
    fn test_custom_open_markers() {
        let records = parse_list_items("- [/] in progress\n- [ ] open\n- [x] done");
        let lines: Vec<usize> = select_migratable(&records, &[' ', '/'])
            .iter()
            .map(|r| r.line)
            .collect();
        assert_eq!(lines, vec![0, 1]);
    }

    #[test]
    fn test_prune_is_pure() {
        let records = parse_list_items("- [x] a\n  - [ ] b\n  - [x] c");
        let forest = ListItemForest::build(&records);
        let first = migratable_forest(&forest, &[OPEN_MARKER]);
        let second = migratable_forest(&forest, &[OPEN_MARKER]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].children.len(), 1);
        assert_eq!(forest.node(first[0].children[0].index).record.line, 1);
    }
}
