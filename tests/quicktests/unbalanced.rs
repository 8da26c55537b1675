use avl::bst::Tree;
use avl::Node;

use std::collections::BTreeMap;

use crate::Op;

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model: BTreeMap<i8, usize> = BTreeMap::new();

        for op in &ops {
            match *op {
                Op::Add(v) => {
                    tree.add(v);
                    *model.entry(v).or_default() += 1;
                }
                Op::Remove(v) => {
                    let expected = match model.get_mut(&v) {
                        Some(1) => model.remove(&v).is_some(),
                        Some(count) => {
                            *count -= 1;
                            true
                        }
                        None => false,
                    };
                    if tree.remove(&v) != expected {
                        return false;
                    }
                }
            }
        }

        tree.validate().is_ok()
            && tree.in_order().map(|n| (*n.value(), n.multiplicity())).eq(model.into_iter())
    }

    fn in_order_is_non_decreasing(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let values: Vec<_> = tree.values().collect();

        values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    fn size_counts_every_add(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        tree.len() == xs.len() && tree.node_count() <= xs.len()
    }

    fn to_array_lists_every_node(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let array = tree.to_array();
        let present = array.iter().filter(|v| v.is_some()).count();

        // Every node adds its value plus two child slots, one of which is filled by each
        // non-root node.
        present == tree.node_count()
            && (tree.is_empty() || array.len() == 2 * tree.node_count() + 1)
    }

    fn leftmost_is_min(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        tree.get_leftmost(None).map(Node::value) == xs.iter().min()
            && tree.get_rightmost(None).map(Node::value) == xs.iter().max()
    }
}
