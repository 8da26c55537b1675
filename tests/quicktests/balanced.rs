use avl::{AvlTree, Node, NodeId};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a map counting occurrences.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut AvlTree<T>, model: &mut BTreeMap<T, usize>) -> bool
where
    T: Ord + Clone,
{
    ops.iter().all(|op| {
        let agreed = match op {
            Op::Add(v) => {
                tree.add(v.clone());
                *model.entry(v.clone()).or_default() += 1;
                true
            }
            Op::Remove(v) => {
                let expected = match model.get_mut(v) {
                    Some(1) => model.remove(v).is_some(),
                    Some(count) => {
                        *count -= 1;
                        true
                    }
                    None => false,
                };
                tree.remove(v) == expected
            }
        };
        agreed && tree.validate().is_ok()
    })
}

fn ids<'a>(nodes: impl Iterator<Item = &'a Node<i16>>) -> Vec<NodeId> {
    nodes.map(Node::id).collect()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut model)
            && tree.len() == model.values().sum::<usize>()
            && tree.in_order().map(|n| (*n.value(), n.multiplicity())).eq(model.into_iter())
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.has(x)) && tree.len() == xs.len()
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: AvlTree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            // We may have added the same value multiple times - remove each one.
            while tree.remove(delete) {}
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        tree.validate().is_ok()
            && deletes.iter().all(|x| !tree.has(x))
            && still_present.iter().all(|x| tree.has(x))
            && tree.len() == still_present.len()
    }

    fn sorted_output_ignores_insertion_order(xs: Vec<i16>) -> bool {
        let forwards: AvlTree<_> = xs.iter().copied().collect();
        let backwards: AvlTree<_> = xs.iter().rev().copied().collect();

        forwards.values().eq(backwards.values())
    }

    fn traversals_are_repeatable(xs: Vec<i16>) -> bool {
        let tree: AvlTree<_> = xs.into_iter().collect();
        ids(tree.pre_order()) == ids(tree.pre_order())
            && ids(tree.in_order()) == ids(tree.in_order())
            && ids(tree.post_order()) == ids(tree.post_order())
            && ids(tree.bfs()) == ids(tree.bfs())
            && ids(tree.dfs()) == ids(tree.dfs())
    }

    fn every_balance_factor_is_small(xs: Vec<i16>, removes: Vec<i16>) -> bool {
        let mut tree: AvlTree<_> = xs.into_iter().collect();
        for x in &removes {
            tree.remove(x);
        }

        tree.in_order()
            .all(|n| tree.balance_factor(n.id()).map_or(false, |bf| bf.abs() <= 1))
    }
}
