use rebuild_bst::{Order, Tree};

use std::collections::BTreeSet;

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                bst.delete(k);
                set.remove(k);
            }
        }
    }
}

fn keys<K: Copy>(tree: &Tree<K>, order: Order) -> Vec<K> {
    tree.traversal(order).copied().collect()
}

/// `floor(log2(n))` for `n >= 1`.
fn floor_log2(n: usize) -> isize {
    (usize::BITS - 1 - n.leading_zeros()) as isize
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && tree.in_order().eq(set.iter())
}

#[quickcheck]
fn construct_sorts_and_dedups(xs: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.clone());
    let expected: Vec<i8> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    keys(&tree, Order::In) == expected
}

#[quickcheck]
fn construct_is_balanced(xs: Vec<i8>) -> bool {
    Tree::from_keys(xs).is_balanced()
}

#[quickcheck]
fn construct_height_is_floor_log2(xs: Vec<i16>) -> bool {
    let tree = Tree::from_keys(xs);

    match tree.len() {
        0 => tree.height() == -1,
        n => tree.height() == floor_log2(n),
    }
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.clone());
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn insert_present_key_changes_nothing(xs: Vec<i8>, pick: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree = Tree::from_keys(xs.clone());
    let key = xs[pick % xs.len()];
    let before = keys(&tree, Order::Pre);
    let len = tree.len();

    !tree.insert(key)
        && tree.find(&key) == Some(&key)
        && tree.len() == len
        && keys(&tree, Order::Pre) == before
}

#[quickcheck]
fn insert_absent_key(xs: Vec<i8>, key: i8) -> bool {
    let mut tree = Tree::from_keys(xs);
    if tree.contains(&key) {
        return true;
    }

    tree.insert(key)
        && tree.find(&key) == Some(&key)
        && tree.in_order().zip(tree.in_order().skip(1)).all(|(a, b)| a < b)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        let len = tree.len();
        let present = tree.contains(delete);
        let before = keys(&tree, Order::Pre);

        let deleted = tree.delete(delete);
        let ok = if present {
            deleted == Some(*delete) && tree.len() == len - 1
        } else {
            deleted.is_none() && keys(&tree, Order::Pre) == before
        };
        if !ok {
            return false;
        }
    }

    let still_present: BTreeSet<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();
    deletes.iter().all(|x| tree.find(x).is_none()) && tree.in_order().eq(still_present)
}

#[quickcheck]
fn rebalance_keeps_keys(xs: Vec<i16>, more: Vec<i16>) -> bool {
    let mut tree = Tree::from_keys(xs);
    for x in more {
        tree.insert(x);
    }
    let before = keys(&tree, Order::In);

    tree.rebalance();
    tree.is_balanced() && keys(&tree, Order::In) == before
}

#[quickcheck]
fn every_order_visits_every_key(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(x);
    }
    let sorted = keys(&tree, Order::In);

    Order::ALL.iter().all(|&order| {
        let mut visited = Vec::new();
        if tree
            .traverse(order, Some(&mut |k: &i8| visited.push(*k)))
            .is_err()
        {
            return false;
        }
        visited.sort_unstable();

        visited == sorted
    })
}

#[test]
fn rebalance_after_inserts_unbalance() {
    let mut tree = Tree::from_keys(vec![50, 25, 75]);
    for x in 76..90 {
        tree.insert(x);
    }
    assert!(!tree.is_balanced());

    tree.rebalance();
    assert!(tree.is_balanced());
    assert_eq!(tree.len(), 17);
    assert_eq!(tree.height(), floor_log2(17));
}

#[test]
fn missing_visitor_visits_nothing() {
    let tree = Tree::from_keys(vec![5, 3, 3, 8, 1]);

    for order in Order::ALL {
        let result = tree.traverse(order, None);
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid argument: a visitor is required"
        );
    }
}
