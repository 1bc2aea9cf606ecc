use ordered_tree::{NodeId, Tree};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Builds a tree by applying `ops` in order. Removed nodes are released straight away.
fn apply(ops: &[Op<i8>]) -> Tree<i8> {
    let mut tree = Tree::new();
    for op in ops {
        match *op {
            Op::Insert(k) => {
                tree.insert_key(k);
            }
            Op::RemoveNth(n) => {
                if tree.is_empty() {
                    continue;
                }
                let id = tree.nodes().nth(n % tree.len()).unwrap();
                tree.remove(id).unwrap();
                tree.release(id).unwrap();
            }
        }
    }
    tree
}

fn keys(tree: &Tree<i8>) -> Vec<i8> {
    tree.iter().copied().collect()
}

/// Counts the nodes reachable from `id` through child links.
fn reachable(tree: &Tree<i8>, id: Option<NodeId>) -> usize {
    match id {
        Some(id) => 1 + reachable(tree, tree.left(id)) + reachable(tree, tree.right(id)),
        None => 0,
    }
}

#[quickcheck]
fn in_order_is_sorted(ops: Vec<Op<i8>>) -> bool {
    let tree = apply(&ops);
    keys(&tree).windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn parent_links_match_child_links(ops: Vec<Op<i8>>) -> bool {
    let tree = apply(&ops);

    let root_ok = tree.root().map_or(true, |root| tree.parent(root).is_none());
    let links_ok = tree.nodes().all(|id| {
        let left_ok = tree.left(id).map_or(true, |c| tree.parent(c) == Some(id));
        let right_ok = tree.right(id).map_or(true, |c| tree.parent(c) == Some(id));
        left_ok && right_ok
    });

    root_ok && links_ok && reachable(&tree, tree.root()) == tree.len()
}

#[quickcheck]
fn insert_then_remove_round_trips(ops: Vec<Op<i8>>, key: i8) -> bool {
    let mut tree = apply(&ops);
    let before = keys(&tree);

    let id = tree.insert_key(key);
    tree.remove(id).unwrap();

    keys(&tree) == before && tree.release(id) == Ok(key)
}

#[quickcheck]
fn successor_and_predecessor_are_inverse(ops: Vec<Op<i8>>) -> bool {
    let tree = apply(&ops);
    tree.nodes().all(|id| match tree.successor(id).unwrap() {
        Some(next) => tree.predecessor(next) == Ok(Some(id)),
        None => Some(id) == tree.maximum(),
    })
}

#[quickcheck]
fn kth_matches_iteration(ops: Vec<Op<i8>>) -> bool {
    let tree = apply(&ops);
    let by_rank: Vec<i8> = (1..=tree.len())
        .filter_map(|k| tree.kth(k))
        .filter_map(|id| tree.key(id).copied())
        .collect();

    by_rank == keys(&tree) && tree.kth(tree.len() + 1).is_none()
}

#[quickcheck]
fn remove_drops_exactly_one_key(ops: Vec<Op<i8>>, pick: usize) -> bool {
    let mut tree = apply(&ops);
    if tree.is_empty() {
        return true;
    }
    let mut expected = keys(&tree);
    let id = tree.nodes().nth(pick % tree.len()).unwrap();
    let key = *tree.key(id).unwrap();

    tree.remove(id).unwrap();
    let pos = expected.iter().position(|k| *k == key).unwrap();
    expected.remove(pos);

    keys(&tree) == expected && tree.len() == expected.len() && !tree.contains(id)
}

#[quickcheck]
fn find_agrees_with_contents(xs: Vec<i8>, probe: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    match tree.find(&probe) {
        Some(id) => tree.key(id) == Some(&probe),
        None => !xs.contains(&probe),
    }
}

#[quickcheck]
fn balanced_holds_every_key(xs: Vec<i8>) -> bool {
    let tree = Tree::balanced(xs.iter().copied());
    let mut sorted = xs;
    sorted.sort();

    keys(&tree) == sorted
}
