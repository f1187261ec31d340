use rand::Rng;

use crate::decay::Decay;

/// Exploration policy result
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
///
/// Use [`decay::Constant`](crate::decay::Constant) for a fixed exploration
/// rate.
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Invoke epsilon greedy policy for the current episode
    pub fn choose<R: Rng>(&self, rng: &mut R, episode: u32) -> Choice {
        let epsilon = self.epsilon.evaluate(episode as f32);
        if rng.gen::<f32>() > epsilon {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::Constant;

    #[test]
    fn zero_epsilon_never_explores() {
        let policy = EpsilonGreedy::new(Constant::new(0.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(matches!(policy.choose(&mut rng, 0), Choice::Exploit));
        }
    }

    #[test]
    fn unit_epsilon_always_explores() {
        let policy = EpsilonGreedy::new(Constant::new(1.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(matches!(policy.choose(&mut rng, 0), Choice::Explore));
        }
    }
}
