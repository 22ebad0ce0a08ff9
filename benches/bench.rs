use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linked_bst::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: u32) -> usize {
    2usize.pow(num_levels) - 1
}

/// Builds a tree by inserting values in ascending order. Nothing rebalances it, so this is a
/// linked list leaning right.
fn get_unbalanced_tree(num_levels: u32) -> Tree<i32> {
    (0..num_nodes_in_full_tree(num_levels) as i32).collect()
}

/// Builds a tree by inserting values so that, without any balancing, every level is full.
fn get_balanced_tree(num_levels: u32) -> Tree<i32> {
    let xs = (0..num_nodes_in_full_tree(num_levels) as i32).collect::<Vec<_>>();
    let mut tree = Tree::with_capacity(xs.len());
    fill_balanced_tree(&mut tree, &xs);
    tree
}

/// Recursive helper for [`get_balanced_tree`].
fn fill_balanced_tree(tree: &mut Tree<i32>, xs: &[i32]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        tree.insert(xs[mid]);
        fill_balanced_tree(tree, &xs[..mid]);
        fill_balanced_tree(tree, &xs[mid + 1..]);
    }
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of tree before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        let trees = [
            ("balanced", get_balanced_tree(num_levels)),
            ("unbalanced", get_unbalanced_tree(num_levels)),
        ];
        for (name, tree) in trees {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "search", |tree, i| {
        let _node = black_box(tree.search(&i).map(|node| node.id()));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "search-miss", |tree, i| {
        let _node = black_box(tree.search(&(i + 1)).map(|node| node.id()));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });

    bench_helper(c, "rotate-root", |tree, _| {
        let root = *tree.root().expect("benchmark trees are non-empty").key();
        let _ = black_box(tree.rotate_left(&root));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
