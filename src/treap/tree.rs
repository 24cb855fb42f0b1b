use crate::treap::aggregate::Aggregate;
use crate::treap::node::Node;
use crate::treap::{Error, Result};
use std::cmp::Ordering;

pub type Tree<A> = Option<Box<Node<A>>>;

/// Concatenates `left` and `right`, assuming every key of `left` is at most every key of
/// `right`. The root with the greater priority wins; on a tie the root of `right` wins.
pub fn merge<A: Aggregate>(left: Tree<A>, right: Tree<A>) -> Tree<A> {
    match (left, right) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority > r_node.priority {
                l_node.right = merge(l_node.right.take(), Some(r_node));
                l_node.update();
                Some(l_node)
            } else {
                r_node.left = merge(Some(l_node), r_node.left.take());
                r_node.update();
                Some(r_node)
            }
        }
        (tree, None) | (None, tree) => tree,
    }
}

/// Partitions `tree` around `threshold`. If `inclusive` is set, keys equal to `threshold` go to
/// the left part, otherwise they go to the right part.
pub fn split<A: Aggregate>(
    tree: Tree<A>,
    threshold: &A::Key,
    inclusive: bool,
) -> (Tree<A>, Tree<A>) {
    match tree {
        Some(mut node) => {
            let goes_left = match node.key().cmp(threshold) {
                Ordering::Less => true,
                Ordering::Equal => inclusive,
                Ordering::Greater => false,
            };
            if goes_left {
                let (inner_left, right) = split(node.right.take(), threshold, inclusive);
                node.right = inner_left;
                node.update();
                (Some(node), right)
            } else {
                let (left, inner_right) = split(node.left.take(), threshold, inclusive);
                node.left = inner_right;
                node.update();
                (left, Some(node))
            }
        }
        None => (None, None),
    }
}

pub fn len<A>(tree: &Tree<A>) -> usize {
    tree.as_ref().map_or(0, |node| node.len)
}

pub fn height<A>(tree: &Tree<A>) -> usize {
    match tree {
        Some(ref node) => 1 + height(&node.left).max(height(&node.right)),
        None => 0,
    }
}

pub fn contains<A: Aggregate>(tree: &Tree<A>, key: &A::Key) -> bool {
    get(tree, key).is_some()
}

pub fn get<'a, A: Aggregate>(tree: &'a Tree<A>, key: &A::Key) -> Option<&'a A> {
    tree.as_ref().and_then(|node| match key.cmp(node.key()) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.aggregate),
    })
}

pub fn min<A: Aggregate>(tree: &Tree<A>) -> Option<&A::Key> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        curr.key()
    })
}

pub fn max<A: Aggregate>(tree: &Tree<A>) -> Option<&A::Key> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        curr.key()
    })
}

/// Returns the keys of `tree` in order.
pub fn keys<A: Aggregate>(tree: &Tree<A>) -> Vec<&A::Key> {
    fn traverse<'a, A: Aggregate>(tree: &'a Tree<A>, keys: &mut Vec<&'a A::Key>) {
        if let Some(ref node) = tree {
            traverse(&node.left, keys);
            keys.push(node.key());
            traverse(&node.right, keys);
        }
    }

    let mut keys = Vec::new();
    traverse(tree, &mut keys);
    keys
}

/// Checks the binary search tree order, the heap order of the priorities, and that every
/// aggregate and subtree length matches a fresh `update` from its children.
pub fn validate<A>(tree: &Tree<A>) -> Result<()>
where
    A: Aggregate + Clone + PartialEq,
{
    let keys = keys(tree);
    if keys.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(Error::OrderViolation);
    }
    validate_node(tree)
}

fn validate_node<A>(tree: &Tree<A>) -> Result<()>
where
    A: Aggregate + Clone + PartialEq,
{
    if let Some(ref node) = tree {
        let Node {
            ref aggregate,
            priority,
            len,
            ref left,
            ref right,
        } = **node;
        for child in left.iter().chain(right.iter()) {
            if child.priority > priority {
                return Err(Error::HeapViolation {
                    parent: priority,
                    child: child.priority,
                });
            }
        }

        let mut expected = aggregate.clone();
        expected.update(
            left.as_ref().map(|node| &node.aggregate),
            right.as_ref().map(|node| &node.aggregate),
        );
        if expected != *aggregate {
            return Err(Error::StaleAggregate);
        }
        let expected_len = 1 + self::len(left) + self::len(right);
        if expected_len != len {
            return Err(Error::StaleLength {
                expected: expected_len,
                actual: len,
            });
        }

        validate_node(left)?;
        validate_node(right)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{height, keys, len, max, merge, min, split, validate, Tree};
    use crate::treap::aggregate::Counted;
    use crate::treap::node::Node;
    use crate::treap::Error;

    fn leaf(key: u32, priority: u32) -> Tree<Counted<u32>> {
        Some(Box::new(Node::with_priority(Counted::new(key), priority)))
    }

    fn build(entries: &[(u32, u32)]) -> Tree<Counted<u32>> {
        entries
            .iter()
            .fold(None, |tree, &(key, priority)| merge(tree, leaf(key, priority)))
    }

    fn owned_keys(tree: &Tree<Counted<u32>>) -> Vec<u32> {
        keys(tree).into_iter().cloned().collect()
    }

    fn size(tree: &Tree<Counted<u32>>) -> usize {
        tree.as_ref().map_or(0, |node| node.aggregate.size)
    }

    #[test]
    fn test_merge_empty() {
        let tree: Tree<Counted<u32>> = merge(None, None);
        assert!(tree.is_none());
    }

    #[test]
    fn test_merge_identity() {
        let tree = merge(None, build(&[(1, 3), (2, 9), (3, 4)]));
        assert_eq!(owned_keys(&tree), vec![1, 2, 3]);
        let tree = merge(tree, None);
        assert_eq!(owned_keys(&tree), vec![1, 2, 3]);
        assert_eq!(size(&tree), 3);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_merge_order() {
        let left = build(&[(1, 10), (2, 40), (3, 20)]);
        let right = build(&[(4, 30), (5, 50), (6, 5)]);
        let tree = merge(left, right);
        assert_eq!(owned_keys(&tree), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(tree.as_ref().map(|node| node.priority), Some(50));
        assert_eq!(size(&tree), 6);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_split_scenario() {
        let tree = build(&[(1, 50), (3, 30), (5, 90), (7, 10), (9, 70)]);
        assert_eq!(tree.as_ref().map(|node| node.aggregate.key), Some(5));

        let (left, right) = split(tree, &5, true);
        assert_eq!(owned_keys(&left), vec![1, 3, 5]);
        assert_eq!(owned_keys(&right), vec![7, 9]);
        assert_eq!(size(&left), 3);
        assert_eq!(size(&right), 2);
        assert_eq!(validate(&left), Ok(()));
        assert_eq!(validate(&right), Ok(()));

        let tree = merge(left, right);
        assert_eq!(owned_keys(&tree), vec![1, 3, 5, 7, 9]);
        assert_eq!(size(&tree), 5);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_split_duplicates() {
        let tree = build(&[(3, 4), (5, 8), (5, 2), (6, 6)]);
        let (left, right) = split(tree, &5, true);
        assert_eq!(owned_keys(&left), vec![3, 5, 5]);
        assert_eq!(owned_keys(&right), vec![6]);

        let tree = merge(left, right);
        let (left, right) = split(tree, &5, false);
        assert_eq!(owned_keys(&left), vec![3]);
        assert_eq!(owned_keys(&right), vec![5, 5, 6]);
    }

    #[test]
    fn test_split_outside_range() {
        let tree = build(&[(2, 1), (4, 2)]);
        let (left, right) = split(tree, &0, true);
        assert!(left.is_none());
        assert_eq!(owned_keys(&right), vec![2, 4]);

        let (left, right) = split(right, &10, true);
        assert_eq!(owned_keys(&left), vec![2, 4]);
        assert!(right.is_none());
    }

    #[test]
    fn test_split_empty() {
        let (left, right) = split::<Counted<u32>>(None, &1, true);
        assert!(left.is_none());
        assert!(right.is_none());
    }

    #[test]
    fn test_len_height() {
        let tree = build(&[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(len(&tree), 3);
        assert_eq!(height(&tree), 3);

        let tree = build(&[(1, 1), (2, 3), (3, 2)]);
        assert_eq!(height(&tree), 2);
    }

    #[test]
    fn test_min_max() {
        let tree = build(&[(4, 1), (8, 7), (15, 3)]);
        assert_eq!(min(&tree), Some(&4));
        assert_eq!(max(&tree), Some(&15));
        assert_eq!(min::<Counted<u32>>(&None), None);
    }

    #[test]
    fn test_validate_order_violation() {
        let mut root = Node::with_priority(Counted::new(5), 10);
        root.left = leaf(7, 1);
        root.update();
        assert_eq!(validate(&Some(Box::new(root))), Err(Error::OrderViolation));
    }

    #[test]
    fn test_validate_heap_violation() {
        let mut root = Node::with_priority(Counted::new(5), 1);
        root.right = leaf(7, 10);
        root.update();
        assert_eq!(
            validate(&Some(Box::new(root))),
            Err(Error::HeapViolation { parent: 1, child: 10 }),
        );
    }

    #[test]
    fn test_validate_stale_aggregate() {
        let mut root = Node::with_priority(Counted::new(5), 10);
        root.right = leaf(7, 1);
        assert_eq!(validate(&Some(Box::new(root))), Err(Error::StaleAggregate));
    }

    #[test]
    fn test_validate_stale_length() {
        let mut root = Node::with_priority(Counted::new(5), 10);
        root.len = 4;
        assert_eq!(
            validate(&Some(Box::new(root))),
            Err(Error::StaleLength { expected: 1, actual: 4 }),
        );
    }

    #[test]
    fn test_len_after_split() {
        let entries = (0..1_000)
            .map(|key: u32| (key, key.wrapping_mul(2_654_435_761)))
            .collect::<Vec<_>>();
        let (left, right) = split(build(&entries), &299, true);
        assert_eq!(len(&left), 300);
        assert_eq!(len(&right), 700);
        assert_eq!(validate(&left), Ok(()));
        assert_eq!(validate(&right), Ok(()));
    }
}
