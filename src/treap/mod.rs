//! Randomized binary search tree where each node also maintains the heap invariant on a random
//! priority, built entirely on merge and split.

mod aggregate;
mod multiset;
mod node;
mod priority;
pub mod tree;

pub use self::aggregate::{Aggregate, Counted, Plain};
pub use self::multiset::{CartesianTree, CartesianTreeIntoIter, CartesianTreeIter};
pub use self::node::Node;
pub use self::priority::{FixedPriorities, PrioritySource, RandomPriorities};
pub use self::tree::Tree;

use std::error;
use std::fmt;
use std::result;

/// An invariant violation found while validating a tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The in-order key sequence is not sorted.
    OrderViolation,
    /// A child has a greater priority than its parent.
    HeapViolation { parent: u32, child: u32 },
    /// An aggregate differs from a fresh recomputation from its children.
    StaleAggregate,
    /// A subtree length differs from the lengths of its children plus one.
    StaleLength { expected: usize, actual: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OrderViolation => write!(f, "keys are not in binary search tree order"),
            Error::HeapViolation { parent, child } => write!(
                f,
                "child priority {} exceeds parent priority {}",
                child, parent,
            ),
            Error::StaleAggregate => write!(f, "aggregate is out of date with its children"),
            Error::StaleLength { expected, actual } => write!(
                f,
                "subtree length {} does not match its children, expected {}",
                actual, expected,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
