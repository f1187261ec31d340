use rand::{seq::SliceRandom, Rng};

/// An unbounded memory of every (state, action) pair visited during episode
/// generation
///
/// Unlike a replay buffer, the memory grows monotonically for the lifetime of
/// one planner: pairs are never evicted or deduplicated, so a pair visited in
/// many episodes carries proportionally more sampling mass.
#[derive(Default)]
pub struct TrajectoryMemory {
    pairs: Vec<(usize, usize)>,
}

impl TrajectoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visited (state, action) pair
    pub fn push(&mut self, state: usize, action: usize) {
        self.pairs.push((state, action));
    }

    /// Sample one pair uniformly at random, with replacement
    ///
    /// ### Returns
    /// - `Some((state, action))` if the memory is non-empty
    /// - `None` otherwise
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        self.pairs.choose(rng).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether the pair has been recorded at least once
    pub fn contains(&self, state: usize, action: usize) -> bool {
        self.pairs.contains(&(state, action))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn trajectory_memory_functional() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut memory = TrajectoryMemory::new();
        assert!(memory.is_empty());
        assert!(memory.sample(&mut rng).is_none(), "empty memory samples none");

        memory.push(0, 1);
        memory.push(2, 0);
        memory.push(0, 1);
        assert_eq!(memory.len(), 3, "duplicates are kept");

        for _ in 0..50 {
            let pair = memory.sample(&mut rng).unwrap();
            assert!(memory.contains(pair.0, pair.1), "samples only stored pairs");
        }
    }
}
