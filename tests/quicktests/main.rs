mod tree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete the first node with K from the tree
    Delete(K),
    /// Rotate left at the first node with K
    RotateLeft(K),
    /// Rotate right at the first node with K
    RotateRight(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::RotateLeft(K::arbitrary(g)),
            3 => Op::RotateRight(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
