use linked_bst::{NodeRef, RotationError, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a count of each key.
/// This way we can ensure that after a random smattering of inserts,
/// deletes and rotations we have the same keys in both.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, counts: &mut HashMap<i8, usize>) {
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(*k);
                *counts.entry(*k).or_default() += 1;
            }
            Op::Delete(k) => {
                if tree.delete(k).is_some() {
                    *counts.get_mut(k).expect("deleted key was inserted") -= 1;
                }
            }
            Op::RotateLeft(k) => {
                let _ = tree.rotate_left(k);
            }
            Op::RotateRight(k) => {
                let _ = tree.rotate_right(k);
            }
        }
    }
}

/// Walks every node checking that links mirror each other and that
/// exactly one node, the root, has no parent.
fn links_are_consistent(tree: &Tree<i8>) -> bool {
    let parentless: Vec<NodeRef<'_, i8>> = tree
        .levels()
        .map(|(_, node)| node)
        .filter(|node| node.parent().is_none())
        .collect();
    if parentless != tree.root().into_iter().collect::<Vec<_>>() {
        return false;
    }

    tree.levels().all(|(_, node)| match node.parent() {
        None => true,
        Some(parent) => {
            (parent.left() == Some(node)) ^ (parent.right() == Some(node))
                && node.is_left_child() != node.is_right_child()
        }
    })
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = HashMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let in_tree = tree.iter().count();
    let expected: usize = counts.values().sum();

    in_tree == expected
        && tree.len() == expected
        && counts
            .iter()
            .all(|(key, n)| (*n > 0) == tree.search(key).is_some())
        && links_are_consistent(&tree)
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let keys: Vec<i8> = tree.iter().copied().collect();

    let mut sorted = xs;
    sorted.sort();
    keys.windows(2).all(|pair| pair[0] <= pair[1]) && keys == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|n| n.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.delete(delete).is_some() {}
        still_present.retain(|x| x != delete);
    }

    deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
        && links_are_consistent(&tree)
}

#[quickcheck]
fn rotation_pairs_restore_shape(xs: Vec<i8>, at: i8) -> bool {
    let mut tree: Tree<i8> = xs.into_iter().collect();
    let shape = |tree: &Tree<i8>| -> Vec<_> {
        tree.levels()
            .map(|(depth, node)| (depth, node.id(), node.parent().map(|p| p.id())))
            .collect()
    };
    let before = shape(&tree);

    match tree.rotate_right(&at) {
        Ok(raised) => tree.rotate_left_at(raised).is_ok() && shape(&tree) == before,
        Err(RotationError::NotFound) => tree.search(&at).is_none() && shape(&tree) == before,
        Err(_) => shape(&tree) == before,
    }
}
