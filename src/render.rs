//! Plain-text drawing of a tree, one line per level.
//!
//! The renderer only uses the read-only [`NodeRef`](crate::NodeRef) surface. Every level is laid
//! out as if the tree were complete: the bottom level gets cells of `widest key + 3` columns and
//! each level above doubles the cell width, so a key sits centred over its two child cells.
//! Widths grow as `2^height`, so trees taller than [`MAX_DRAWN_HEIGHT`] levels draw as a banner
//! instead.
//!
//! ```
//! use linked_bst::{render, Tree};
//!
//! let tree: Tree<i32> = [5, 3, 8].into_iter().collect();
//! assert_eq!(
//!     render::render(&tree),
//!     "********\n   5    \n 3   8  \n********\n",
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::Tree;

const EMPTY_BORDER: &str = "****************";

/// The tallest tree [`render`] lays out. The top row of a tree this tall is already
/// `2^15 * (widest key + 3)` columns wide.
pub const MAX_DRAWN_HEIGHT: usize = 16;

fn banner(message: &str) -> String {
    format!("{EMPTY_BORDER}\n{message}\n{EMPTY_BORDER}\n")
}

/// Draws `tree` as text. An empty tree draws as a short "No items in tree" banner, and a tree
/// taller than [`MAX_DRAWN_HEIGHT`] as a "too deep to draw" banner.
pub fn render<K>(tree: &Tree<K>) -> String
where
    K: fmt::Display,
{
    let Some(root) = tree.root() else {
        return banner("No items in tree");
    };

    let height = tree.height();
    let widest = tree.iter().map(|key| key.to_string().len()).max().unwrap_or(0);
    // `widths[depth - 1]` is the cell width on that level.
    let widths: Option<Vec<usize>> = (height <= MAX_DRAWN_HEIGHT)
        .then(|| {
            (1..=height)
                .map(|depth| (widest + 3).checked_mul(1 << (height - depth)))
                .collect()
        })
        .flatten();
    let Some(widths) = widths else {
        return banner(&format!("Tree too deep to draw (height {height})"));
    };
    let cell_width = |depth: usize| widths[depth - 1];
    let border = "*".repeat(cell_width(1));

    let mut out = border.clone();
    out.push('\n');

    // Empty slots are queued too so that the cells below them stay aligned. Stop as soon as the
    // last real node is drawn.
    let mut remaining = tree.len();
    let mut level = 1;
    let mut queue = VecDeque::from([(Some(root), 1)]);
    while remaining > 0 {
        let (node, depth) = queue
            .pop_front()
            .expect("Undrawn nodes are always queued");
        if depth > level {
            level = depth;
            out.push('\n');
        }

        let label = match node {
            Some(node) => {
                remaining -= 1;
                node.key().to_string()
            }
            None => String::new(),
        };
        out.push_str(&format!("{label:^width$}", width = cell_width(depth)));

        queue.push_back((node.and_then(|n| n.left()), depth + 1));
        queue.push_back((node.and_then(|n| n.right()), depth + 1));
    }

    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_banner() {
        let tree = Tree::<i32>::new();
        assert_eq!(
            render(&tree),
            "****************\nNo items in tree\n****************\n"
        );
    }

    #[test]
    fn ascending_run_is_too_deep_to_draw() {
        let tree: Tree<i32> = (0..70).collect();
        assert_eq!(
            render(&tree),
            "****************\nTree too deep to draw (height 70)\n****************\n"
        );
    }

    #[test]
    fn tallest_drawable_tree() {
        let tree: Tree<i32> = (0..MAX_DRAWN_HEIGHT as i32).collect();
        let drawn = render(&tree);
        let lines: Vec<_> = drawn.lines().collect();

        assert_eq!(lines.len(), MAX_DRAWN_HEIGHT + 2);
        assert_eq!(lines[0].len(), 5 << (MAX_DRAWN_HEIGHT - 1));
        assert_eq!(lines[MAX_DRAWN_HEIGHT].trim(), "15");
    }

    #[test]
    fn lone_root() {
        let tree: Tree<i32> = [42].into_iter().collect();
        assert_eq!(render(&tree), "*****\n 42  \n*****\n");
    }

    #[test]
    fn missing_children_keep_their_cells() {
        let tree: Tree<i32> = [5, 8, 9].into_iter().collect();
        assert_eq!(
            render(&tree),
            concat!(
                "****************\n",
                "       5        \n",
                "           8    \n",
                "             9  \n",
                "****************\n",
            )
        );
    }
}
