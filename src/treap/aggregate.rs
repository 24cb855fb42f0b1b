/// The payload carried by every node of a Cartesian tree.
///
/// An aggregate exposes the key used for binary search tree ordering and knows how to recompute
/// itself from the aggregates of its children. The tree calls `update` after every structural
/// change that touches a node, so any summary stored in the aggregate (subtree size, sums,
/// minimums, ...) always reflects the node's current subtree.
///
/// `update` must recompute from scratch: calling it twice with the same children must give the
/// same result, and it must not depend on anything outside of `self` and the two children.
/// Either child may be absent.
///
/// # Examples
///
/// ```
/// use cartesian_tree::treap::Aggregate;
///
/// struct MaxValue {
///     key: u32,
///     value: u64,
///     max: u64,
/// }
///
/// impl Aggregate for MaxValue {
///     type Key = u32;
///
///     fn key(&self) -> &u32 {
///         &self.key
///     }
///
///     fn update(&mut self, left: Option<&Self>, right: Option<&Self>) {
///         self.max = self.value;
///         for child in left.into_iter().chain(right) {
///             self.max = self.max.max(child.max);
///         }
///     }
/// }
/// ```
pub trait Aggregate {
    type Key: Ord;

    fn key(&self) -> &Self::Key;

    fn update(&mut self, left: Option<&Self>, right: Option<&Self>);
}

/// An aggregate that carries only a key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Plain<K>(pub K);

impl<K: Ord> Aggregate for Plain<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }

    fn update(&mut self, _: Option<&Self>, _: Option<&Self>) {}
}

/// An aggregate that tracks the number of nodes in its subtree.
///
/// # Examples
///
/// ```
/// use cartesian_tree::treap::{CartesianTree, Counted};
///
/// let tree: CartesianTree<Counted<u32>> = (0..10).map(Counted::new).collect();
/// assert_eq!(tree.summary().map(|aggregate| aggregate.size), Some(10));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Counted<K> {
    pub key: K,
    pub size: usize,
}

impl<K> Counted<K> {
    pub fn new(key: K) -> Self {
        Counted { key, size: 1 }
    }
}

impl<K: Ord> Aggregate for Counted<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn update(&mut self, left: Option<&Self>, right: Option<&Self>) {
        self.size = 1;
        if let Some(left_aggregate) = left {
            self.size += left_aggregate.size;
        }
        if let Some(right_aggregate) = right {
            self.size += right_aggregate.size;
        }
    }
}
