//! Inclusion tree of level lines.
//!
//! Two level lines of distinct levels never cross, so on any data row
//! their crossings nest like parentheses. Scanning each row left to right
//! with a stack of currently-open lines recovers the hierarchy: a
//! crossing of the line on top of the stack closes it, any other crossing
//! opens a line whose innermost enclosing line is the stack top at that
//! moment. Every row crossing a line reports the same innermost encloser,
//! which is the line's parent.

use crate::types::{LevelLine, RowIntersections};
use serde::Serialize;

/// One node of the level-line tree; indices address the line array.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LLTreeNode {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Level lines with their inclusion forest, indexed in extraction order.
#[derive(Clone, Debug, Default)]
pub struct LLTree {
    lines: Vec<LevelLine>,
    nodes: Vec<LLTreeNode>,
    roots: Vec<usize>,
}

impl LLTree {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[LevelLine] {
        &self.lines
    }

    pub fn line(&self, i: usize) -> &LevelLine {
        &self.lines[i]
    }

    pub fn parent(&self, i: usize) -> Option<usize> {
        self.nodes[i].parent
    }

    pub fn children(&self, i: usize) -> &[usize] {
        &self.nodes[i].children
    }

    /// Lines enclosed by no other line.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Iterate lines with their indices, in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LevelLine)> {
        self.lines.iter().enumerate()
    }
}

/// Build the inclusion tree of `lines` from the row-crossing log
/// produced by [`crate::extract::extract_level_lines`].
pub fn build_tree(lines: Vec<LevelLine>, mut row_intersections: RowIntersections) -> LLTree {
    let n = lines.len();
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut assigned = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();

    for row in &mut row_intersections {
        row.sort_by(|a, b| a.0.total_cmp(&b.0));
        stack.clear();
        for &(_, idx) in row.iter() {
            if stack.last() == Some(&idx) {
                stack.pop();
            } else {
                if !assigned[idx] {
                    assigned[idx] = true;
                    parent[idx] = stack.last().copied();
                }
                stack.push(idx);
            }
        }
    }

    let mut nodes: Vec<LLTreeNode> = vec![LLTreeNode::default(); n];
    let mut roots = Vec::new();
    for (i, &p) in parent.iter().enumerate() {
        nodes[i].parent = p;
        match p {
            Some(p) => nodes[p].children.push(i),
            None => roots.push(i),
        }
    }

    LLTree {
        lines,
        nodes,
        roots,
    }
}

#[cfg(test)]
mod tests {
    use super::build_tree;
    use crate::types::{LevelLine, LineType};

    fn line(level: f32) -> LevelLine {
        LevelLine::new(level, LineType::Regular)
    }

    #[test]
    fn nested_lines_chain() {
        // Line 1 nested inside line 0, seen on two rows.
        let lines = vec![line(1.0), line(2.0)];
        let rows = vec![
            vec![(0.5, 0), (1.5, 1), (2.5, 1), (3.5, 0)],
            vec![(0.4, 0), (1.6, 1), (2.4, 1), (3.6, 0)],
        ];
        let tree = build_tree(lines, rows);
        assert_eq!(tree.roots(), &[0]);
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.children(0), &[1]);
    }

    #[test]
    fn siblings_share_a_parent() {
        let lines = vec![line(1.0), line(2.0), line(2.0)];
        let rows = vec![vec![
            (0.0, 0),
            (1.0, 1),
            (2.0, 1),
            (3.0, 2),
            (4.0, 2),
            (5.0, 0),
        ]];
        let tree = build_tree(lines, rows);
        assert_eq!(tree.roots(), &[0]);
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.parent(2), Some(0));
        assert_eq!(tree.children(0), &[1, 2]);
    }

    #[test]
    fn wavy_line_reopens_without_nesting() {
        // A single line crossing one row four times stays a root.
        let lines = vec![line(1.0)];
        let rows = vec![vec![(0.0, 0), (1.0, 0), (2.0, 0), (3.0, 0)]];
        let tree = build_tree(lines, rows);
        assert_eq!(tree.roots(), &[0]);
        assert_eq!(tree.parent(0), None);
    }

    #[test]
    fn disjoint_lines_are_roots() {
        let lines = vec![line(1.0), line(2.0)];
        let rows = vec![
            vec![(0.0, 0), (1.0, 0)],
            vec![(4.0, 1), (5.0, 1)],
        ];
        let tree = build_tree(lines, rows);
        assert_eq!(tree.roots(), &[0, 1]);
    }
}
