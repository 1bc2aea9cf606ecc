mod tree;

use quickcheck::{Arbitrary, Gen};

/// Things to do to a tree in a quicktest. Removes pick an existing key by position so that most
/// of them hit.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Remove the node at this (wrapped) position in key order
    RemoveNth(usize),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::RemoveNth(usize::from(u8::arbitrary(g)))
        }
    }
}
