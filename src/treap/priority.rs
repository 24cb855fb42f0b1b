use rand::{Rng, SeedableRng, XorShiftRng};

/// A source of node priorities.
///
/// Priorities only need to come from a total order with a negligible chance of collision. The
/// expected logarithmic depth of a Cartesian tree relies on them being independent of the keys.
pub trait PrioritySource {
    /// Returns the priority for the next freshly created node.
    fn next_priority(&mut self) -> u32;

    /// Returns an independent source for a tree split off from the one using `self`.
    fn fork(&mut self) -> Self
    where
        Self: Sized;
}

/// Uniformly random priorities drawn from a `XorShiftRng`.
///
/// # Examples
///
/// ```
/// use cartesian_tree::treap::{PrioritySource, RandomPriorities};
///
/// let mut a = RandomPriorities::from_seed([1, 2, 3, 4]);
/// let mut b = RandomPriorities::from_seed([1, 2, 3, 4]);
/// assert_eq!(a.next_priority(), b.next_priority());
/// ```
#[derive(Clone)]
pub struct RandomPriorities {
    rng: XorShiftRng,
}

impl RandomPriorities {
    /// Constructs a new `RandomPriorities` seeded from the operating system.
    pub fn new() -> Self {
        RandomPriorities {
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a new `RandomPriorities` with a fixed seed.
    ///
    /// # Panics
    ///
    /// Panics if the seed is all zeros.
    pub fn from_seed(seed: [u32; 4]) -> Self {
        RandomPriorities {
            rng: XorShiftRng::from_seed(seed),
        }
    }
}

impl Default for RandomPriorities {
    fn default() -> Self {
        Self::new()
    }
}

impl PrioritySource for RandomPriorities {
    fn next_priority(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn fork(&mut self) -> Self {
        // XorShift's state is its last four outputs, so drawn words are scrambled before seeding.
        let mut seed = [0; 4];
        for (word, scramble) in seed.iter_mut().zip(&FORK_SCRAMBLE) {
            *word = self.rng.next_u32() ^ scramble;
        }
        if seed == [0; 4] {
            seed[0] = FORK_SCRAMBLE[0];
        }
        RandomPriorities {
            rng: XorShiftRng::from_seed(seed),
        }
    }
}

const FORK_SCRAMBLE: [u32; 4] = [0x9e37_79b9, 0x7f4a_7c15, 0xf39c_c060, 0x5ced_c834];

/// A predetermined sequence of priorities, repeated once exhausted.
///
/// # Examples
///
/// ```
/// use cartesian_tree::treap::{FixedPriorities, PrioritySource};
///
/// let mut priorities = FixedPriorities::new(vec![3, 1]);
/// assert_eq!(priorities.next_priority(), 3);
/// assert_eq!(priorities.next_priority(), 1);
/// assert_eq!(priorities.next_priority(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct FixedPriorities {
    priorities: Vec<u32>,
    index: usize,
}

impl FixedPriorities {
    /// Constructs a new `FixedPriorities` that yields `priorities` in order.
    ///
    /// # Panics
    ///
    /// Panics if `priorities` is empty.
    pub fn new(priorities: Vec<u32>) -> Self {
        assert!(!priorities.is_empty(), "Error: priority sequence is empty.");
        FixedPriorities {
            priorities,
            index: 0,
        }
    }
}

impl PrioritySource for FixedPriorities {
    fn next_priority(&mut self) -> u32 {
        let priority = self.priorities[self.index];
        self.index = (self.index + 1) % self.priorities.len();
        priority
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}
