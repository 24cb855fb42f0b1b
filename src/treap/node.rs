use crate::treap::aggregate::Aggregate;
use crate::treap::priority::PrioritySource;
use crate::treap::tree::{self, Tree};

/// A struct representing an internal node of a Cartesian tree.
///
/// Keys follow the binary search tree order: keys in `left` are at most the node's key and keys
/// in `right` are at least the node's key. Priorities follow the max-heap order: no child has a
/// greater priority than its parent. The node's aggregate and `len`, the number of nodes in its
/// subtree, are always up to date with respect to its children.
#[derive(Debug, Serialize, Deserialize)]
pub struct Node<A> {
    pub aggregate: A,
    pub priority: u32,
    pub len: usize,
    pub left: Tree<A>,
    pub right: Tree<A>,
}

impl<A: Aggregate> Node<A> {
    /// Constructs a leaf with a priority drawn from `source`.
    pub fn new<P: PrioritySource>(aggregate: A, source: &mut P) -> Self {
        Self::with_priority(aggregate, source.next_priority())
    }

    /// Constructs a leaf with an explicit priority.
    pub fn with_priority(aggregate: A, priority: u32) -> Self {
        let mut node = Node {
            aggregate,
            priority,
            len: 1,
            left: None,
            right: None,
        };
        node.update();
        node
    }

    /// Recomputes the aggregate and the subtree length of this node from its children.
    pub fn update(&mut self) {
        let Node {
            ref mut aggregate,
            ref mut len,
            ref left,
            ref right,
            ..
        } = *self;
        *len = 1;
        if let Some(ref left_node) = left {
            *len += left_node.len;
        }
        if let Some(ref right_node) = right {
            *len += right_node.len;
        }
        aggregate.update(
            left.as_ref().map(|node| &node.aggregate),
            right.as_ref().map(|node| &node.aggregate),
        );
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn key(&self) -> &A::Key {
        self.aggregate.key()
    }

    /// Concatenates two trees. Every key in `left` must be less than or equal to every key in
    /// `right`; this is not checked. When the two roots have equal priorities, the root of
    /// `right` becomes the root of the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{tree, Node, Plain};
    ///
    /// let left = Some(Box::new(Node::with_priority(Plain(1), 10)));
    /// let right = Some(Box::new(Node::with_priority(Plain(2), 20)));
    ///
    /// let merged = Node::merge(left, right);
    /// assert_eq!(tree::keys(&merged), vec![&1, &2]);
    /// assert_eq!(merged.map(|node| node.priority), Some(20));
    /// ```
    pub fn merge(left: Tree<A>, right: Tree<A>) -> Tree<A> {
        tree::merge(left, right)
    }

    /// Partitions the subtree rooted at this node into the keys less than or equal to
    /// `threshold` and the keys greater than `threshold`.
    ///
    /// The node is consumed: nodes on the path from the root to the split point are relinked and
    /// reused, so no reference into the original tree survives the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{tree, Node, Plain};
    ///
    /// let root = [1, 3, 5, 7, 9]
    ///     .iter()
    ///     .zip(&[4, 2, 5, 1, 3])
    ///     .map(|(key, priority)| Some(Box::new(Node::with_priority(Plain(*key), *priority))))
    ///     .fold(None, Node::merge);
    ///
    /// let (left, right) = root.unwrap().split(&5);
    /// assert_eq!(tree::keys(&left), vec![&1, &3, &5]);
    /// assert_eq!(tree::keys(&right), vec![&7, &9]);
    /// ```
    pub fn split(self: Box<Self>, threshold: &A::Key) -> (Tree<A>, Tree<A>) {
        tree::split(Some(self), threshold, true)
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::treap::aggregate::Counted;
    use crate::treap::priority::FixedPriorities;

    #[test]
    fn test_new_draws_priority() {
        let mut source = FixedPriorities::new(vec![17, 4]);
        let first = Node::new(Counted::new(1), &mut source);
        let second = Node::new(Counted::new(2), &mut source);
        assert_eq!(first.priority, 17);
        assert_eq!(second.priority, 4);
    }

    #[test]
    fn test_with_priority_is_leaf() {
        let node = Node::with_priority(Counted { key: 1, size: 9 }, 3);
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert_eq!(node.aggregate.size, 1);
        assert_eq!(node.key(), &1);
    }

    #[test]
    fn test_update() {
        let mut node = Node::with_priority(Counted::new(2), 10);
        node.left = Some(Box::new(Node::with_priority(Counted::new(1), 5)));
        node.right = Some(Box::new(Node::with_priority(Counted::new(3), 5)));
        node.update();
        assert_eq!(node.aggregate.size, 3);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_merge_tie_right_wins() {
        let left = Some(Box::new(Node::with_priority(Counted::new(1), 7)));
        let right = Some(Box::new(Node::with_priority(Counted::new(2), 7)));
        let root = Node::merge(left, right).unwrap();
        assert_eq!(root.key(), &2);
        assert_eq!(root.left.as_ref().map(|node| *node.key()), Some(1));
        assert_eq!(root.aggregate.size, 2);
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn test_merge_higher_left_wins() {
        let left = Some(Box::new(Node::with_priority(Counted::new(1), 8)));
        let right = Some(Box::new(Node::with_priority(Counted::new(2), 7)));
        let root = Node::merge(left, right).unwrap();
        assert_eq!(root.key(), &1);
        assert_eq!(root.right.as_ref().map(|node| *node.key()), Some(2));
        assert_eq!(root.aggregate.size, 2);
    }

    #[test]
    fn test_split_leaf() {
        let node = Box::new(Node::with_priority(Counted::new(4), 1));
        let (left, right) = node.split(&4);
        assert_eq!(left.map(|node| node.aggregate.key), Some(4));
        assert!(right.is_none());

        let node = Box::new(Node::with_priority(Counted::new(4), 1));
        let (left, right) = node.split(&3);
        assert!(left.is_none());
        assert_eq!(right.map(|node| node.aggregate.key), Some(4));
    }
}
