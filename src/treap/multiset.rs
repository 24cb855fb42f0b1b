use crate::treap::aggregate::Aggregate;
use crate::treap::node::Node;
use crate::treap::priority::{PrioritySource, RandomPriorities};
use crate::treap::tree::{self, Tree};
use crate::treap::Result;
use std::iter::FromIterator;

/// An ordered multiset of aggregates implemented by a Cartesian tree.
///
/// A Cartesian tree, or treap, is a tree that satisfies both the binary search tree property and
/// a heap property. Each node has a key, a priority, and an aggregate summarizing its subtree.
/// The key of any node is at least all keys in its left subtree and at most all keys in its
/// right subtree. The priority of a node is at least the priority of all nodes in its subtrees.
/// By randomly generating priorities, the expected height of the tree is proportional to the
/// logarithm of the number of keys.
///
/// Every operation is a composition of merge and split. Equal keys are allowed and are kept in
/// insertion order.
///
/// Aggregates borrowed from the tree, through `iter`, `get` or `summary`, summarize the subtree
/// of their node. Aggregates moved out of the tree, through `into_iter` or `remove`, are
/// recomputed as leaves first. For `Counted`, `iter` yields subtree sizes while `into_iter` always
/// yields a size of one.
///
/// # Examples
///
/// ```
/// use cartesian_tree::treap::{CartesianTree, Counted};
///
/// let mut t = CartesianTree::new();
/// t.insert(Counted::new(3));
/// t.insert(Counted::new(1));
/// t.insert(Counted::new(3));
///
/// assert_eq!(t.len(), 3);
/// assert_eq!(t.min(), Some(&1));
/// assert_eq!(t.summary().map(|aggregate| aggregate.size), Some(3));
///
/// let right = t.split_off(&1);
/// assert_eq!(right.len(), 2);
/// assert_eq!(t.remove(&1).map(|aggregate| aggregate.key), Some(1));
/// assert!(t.is_empty());
/// ```
pub struct CartesianTree<A, P = RandomPriorities> {
    root: Tree<A>,
    source: P,
}

impl<A: Aggregate> CartesianTree<A> {
    /// Constructs a new, empty `CartesianTree<A>` with randomly seeded priorities.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Plain};
    ///
    /// let t: CartesianTree<Plain<u32>> = CartesianTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_priorities(RandomPriorities::new())
    }

    /// Constructs a new, empty `CartesianTree<A>` whose priorities come from a seeded generator.
    ///
    /// # Panics
    ///
    /// Panics if the seed is all zeros.
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_priorities(RandomPriorities::from_seed(seed))
    }
}

impl<A: Aggregate, P: PrioritySource> CartesianTree<A, P> {
    /// Constructs a new, empty `CartesianTree<A, P>` drawing priorities from `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, FixedPriorities, Plain};
    ///
    /// let mut t = CartesianTree::with_priorities(FixedPriorities::new(vec![1, 2]));
    /// t.insert(Plain(1));
    /// t.insert(Plain(2));
    /// assert_eq!(t.height(), 2);
    /// ```
    pub fn with_priorities(source: P) -> Self {
        CartesianTree { root: None, source }
    }

    /// Inserts an aggregate into the tree. An aggregate whose key is already present is placed
    /// after the existing ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Plain};
    ///
    /// let mut t = CartesianTree::new();
    /// t.insert(Plain(1));
    /// t.insert(Plain(1));
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn insert(&mut self, aggregate: A) {
        let CartesianTree {
            ref mut root,
            ref mut source,
        } = self;
        let new_node = Box::new(Node::new(aggregate, source));
        let (left, right) = tree::split(root.take(), new_node.key(), true);
        *root = tree::merge(tree::merge(left, Some(new_node)), right);
    }

    /// Removes one aggregate with a particular key and returns it as a leaf aggregate. Returns
    /// `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Counted};
    ///
    /// let mut t = CartesianTree::new();
    /// t.insert(Counted::new(1));
    /// t.insert(Counted::new(2));
    /// assert_eq!(t.remove(&1), Some(Counted::new(1)));
    /// assert_eq!(t.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &A::Key) -> Option<A> {
        let (left, rest) = tree::split(self.root.take(), key, false);
        let (middle, right) = tree::split(rest, key, true);
        let (middle, removed) = match middle {
            Some(mut node) => {
                let remaining = tree::merge(node.left.take(), node.right.take());
                node.update();
                (remaining, Some(node.aggregate))
            }
            None => (None, None),
        };
        self.root = tree::merge(tree::merge(left, middle), right);
        removed
    }

    /// Removes every aggregate with a particular key. Returns the number of aggregates removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Plain};
    ///
    /// let mut t: CartesianTree<_> = vec![Plain(1), Plain(2), Plain(2)].into_iter().collect();
    /// assert_eq!(t.remove_all(&2), 2);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn remove_all(&mut self, key: &A::Key) -> usize {
        let (left, rest) = tree::split(self.root.take(), key, false);
        let (middle, right) = tree::split(rest, key, true);
        let removed = tree::len(&middle);
        self.root = tree::merge(left, right);
        removed
    }

    /// Checks if a key exists in the tree.
    pub fn contains(&self, key: &A::Key) -> bool {
        tree::contains(&self.root, key)
    }

    /// Returns the aggregate of some node with a particular key. The aggregate summarizes the
    /// subtree of that node. Returns `None` if the key does not exist.
    pub fn get(&self, key: &A::Key) -> Option<&A> {
        tree::get(&self.root, key)
    }

    /// Returns the minimum key of the tree.
    pub fn min(&self) -> Option<&A::Key> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the tree.
    pub fn max(&self) -> Option<&A::Key> {
        tree::max(&self.root)
    }

    /// Returns the aggregate of the root, which summarizes the whole tree.
    pub fn summary(&self) -> Option<&A> {
        self.root.as_ref().map(|node| &node.aggregate)
    }

    /// Returns the number of aggregates in the tree.
    pub fn len(&self) -> usize {
        tree::len(&self.root)
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        tree::height(&self.root)
    }

    /// Clears the tree, removing all aggregates.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Splits the tree at a key. Aggregates with keys at most `key` stay in `self` and the rest
    /// are returned in a new tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Plain};
    ///
    /// let mut t: CartesianTree<_> = (1..6).map(Plain).collect();
    /// let right = t.split_off(&3);
    /// assert_eq!(t.iter().map(|aggregate| aggregate.0).collect::<Vec<u32>>(), vec![1, 2, 3]);
    /// assert_eq!(right.iter().map(|aggregate| aggregate.0).collect::<Vec<u32>>(), vec![4, 5]);
    /// ```
    pub fn split_off(&mut self, key: &A::Key) -> Self {
        let (left, right) = tree::split(self.root.take(), key, true);
        trace!(
            "splitting {} of {} nodes off a cartesian tree",
            tree::len(&right),
            tree::len(&left) + tree::len(&right),
        );
        self.root = left;
        CartesianTree {
            root: right,
            source: self.source.fork(),
        }
    }

    /// Moves every aggregate of `other` into `self`. Every key of `self` must be at most every
    /// key of `other`; this is only checked in debug builds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Plain};
    ///
    /// let mut t: CartesianTree<_> = (1..3).map(Plain).collect();
    /// let other: CartesianTree<_> = (3..5).map(Plain).collect();
    /// t.append(other);
    /// assert_eq!(t.len(), 4);
    /// ```
    pub fn append(&mut self, other: Self) {
        debug_assert!(
            match (tree::max(&self.root), tree::min(&other.root)) {
                (Some(left_max), Some(right_min)) => left_max <= right_min,
                _ => true,
            },
            "Error: appended tree has keys less than existing keys."
        );
        trace!(
            "appending {} nodes to a cartesian tree of {} nodes",
            other.len(),
            self.len(),
        );
        self.root = tree::merge(self.root.take(), other.root);
    }

    /// Returns an in-order iterator over the aggregates of the tree. Each aggregate summarizes
    /// the subtree of its node.
    pub fn iter(&self) -> CartesianTreeIter<'_, A> {
        CartesianTreeIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Checks every invariant of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartesian_tree::treap::{CartesianTree, Counted};
    ///
    /// let t: CartesianTree<_> = (0..100).map(Counted::new).collect();
    /// assert!(t.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()>
    where
        A: Clone + PartialEq,
    {
        let result = tree::validate(&self.root);
        if let Err(ref error) = result {
            debug!("cartesian tree failed validation: {}", error);
        }
        result
    }
}

impl<A: Aggregate> Default for CartesianTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Aggregate> FromIterator<A> for CartesianTree<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut tree = CartesianTree::new();
        tree.extend(iter);
        tree
    }
}

impl<A: Aggregate, P: PrioritySource> Extend<A> for CartesianTree<A, P> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for aggregate in iter {
            self.insert(aggregate);
        }
    }
}

impl<A: Aggregate, P> IntoIterator for CartesianTree<A, P> {
    type IntoIter = CartesianTreeIntoIter<A>;
    type Item = A;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, A: Aggregate, P: PrioritySource> IntoIterator for &'a CartesianTree<A, P>
where
    A: 'a,
{
    type IntoIter = CartesianTreeIter<'a, A>;
    type Item = &'a A;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `CartesianTree<A, P>`.
///
/// This iterator traverses the tree in-order and yields every aggregate recomputed as a leaf.
pub struct CartesianTreeIntoIter<A> {
    current: Tree<A>,
    stack: Vec<Node<A>>,
}

impl<A: Aggregate> Iterator for CartesianTreeIntoIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                mut aggregate,
                right,
                ..
            } = node;
            self.current = right;
            aggregate.update(None, None);
            aggregate
        })
    }
}

/// An iterator for `CartesianTree<A, P>`.
///
/// This iterator traverses the tree in-order and yields immutable references.
pub struct CartesianTreeIter<'a, A> {
    current: &'a Tree<A>,
    stack: Vec<&'a Node<A>>,
}

impl<'a, A> Iterator for CartesianTreeIter<'a, A>
where
    A: 'a,
{
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node {
                ref aggregate,
                ref right,
                ..
            } = node;
            self.current = right;
            aggregate
        })
    }
}
