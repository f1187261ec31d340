use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{
    config::{Config, ConfigError},
    env::{DiscreteActionSpace, Environment},
};

/// A randomly generated finite MDP
///
/// At construction, every (state, action) pair is assigned a fixed list of
/// `branching_factor` distinct successor states sampled uniformly from the
/// full state space, each with a reward drawn once from a standard normal
/// distribution. The same precomputed lists back both the stochastic
/// simulator ([`Environment::step`]) and the enumerable dynamics
/// ([`RandomMdp::transitions`]) a planner's expectation backup sums over, so
/// the simulated episodes and the backup's assumed dynamics agree by
/// construction.
///
/// Episodes terminate with probability `terminal_probability` on every step,
/// independent of state and action.
pub struct RandomMdp {
    num_states: usize,
    num_actions: usize,
    branching_factor: usize,
    terminal_probability: f32,
    transitions: Vec<Vec<(usize, f32)>>,
    state: usize,
    rng: StdRng,
}

impl RandomMdp {
    /// Generate a new MDP from a validated configuration, seeding the
    /// generator from entropy
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Generate a new MDP using a caller-provided generator
    ///
    /// The generator drives both the one-time structure generation and every
    /// subsequent [`Environment::step`] call, so a seeded generator makes the
    /// environment fully deterministic.
    pub fn with_rng(config: &Config, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let rewards = Normal::new(0.0, 1.0).unwrap();
        let mut transitions = Vec::with_capacity(config.num_states * config.num_actions);
        for _ in 0..config.num_states * config.num_actions {
            let successors = index::sample(&mut rng, config.num_states, config.branching_factor);
            transitions.push(
                successors
                    .into_iter()
                    .map(|next| (next, rewards.sample(&mut rng)))
                    .collect(),
            );
        }

        Ok(Self {
            num_states: config.num_states,
            num_actions: config.num_actions,
            branching_factor: config.branching_factor,
            terminal_probability: config.terminal_probability,
            transitions,
            state: 0,
            rng,
        })
    }

    /// Construct an MDP with a hand-built transition table
    #[cfg(test)]
    pub(crate) fn with_transitions(
        config: &Config,
        transitions: Vec<Vec<(usize, f32)>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        assert_eq!(transitions.len(), config.num_states * config.num_actions);
        Ok(Self {
            num_states: config.num_states,
            num_actions: config.num_actions,
            branching_factor: config.branching_factor,
            terminal_probability: config.terminal_probability,
            transitions,
            state: 0,
            rng: StdRng::seed_from_u64(0),
        })
    }

    /// The precomputed `(successor, reward)` list for a (state, action) pair
    ///
    /// Under the simulator each listed successor occurs with probability
    /// `(1 - terminal_probability) / branching_factor`.
    pub fn transitions(&self, state: usize, action: usize) -> &[(usize, f32)] {
        &self.transitions[state * self.num_actions + action]
    }

    /// The fixed root state every episode starts from
    pub fn initial_state(&self) -> usize {
        0
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    pub fn terminal_probability(&self) -> f32 {
        self.terminal_probability
    }
}

impl Environment for RandomMdp {
    type State = usize;
    type Action = usize;

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        assert!(action < self.num_actions, "Invalid action: {}", action);
        if self.rng.gen::<f32>() < self.terminal_probability {
            return (None, 0.0);
        }
        let chosen = self.rng.gen_range(0..self.branching_factor);
        let (next, reward) = self.transitions[self.state * self.num_actions + action][chosen];
        self.state = next;
        (Some(next), reward)
    }

    fn reset(&mut self) -> Self::State {
        self.state = self.initial_state();
        self.state
    }

    fn random_action(&mut self) -> Self::Action {
        self.rng.gen_range(0..self.num_actions)
    }
}

impl DiscreteActionSpace for RandomMdp {
    fn actions(&self) -> Vec<Self::Action> {
        (0..self.num_actions).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config {
            num_states: 5,
            num_actions: 2,
            branching_factor: 3,
            terminal_probability: 0.25,
            ..Config::default()
        }
    }

    #[test]
    fn rejects_oversized_branching_factor() {
        let config = Config {
            num_states: 2,
            branching_factor: 3,
            ..Config::default()
        };
        assert!(matches!(
            RandomMdp::new(&config),
            Err(ConfigError::BranchingTooLarge { .. })
        ));
    }

    #[test]
    fn every_pair_has_distinct_successors() {
        let config = small_config();
        let env = RandomMdp::with_rng(&config, StdRng::seed_from_u64(11)).unwrap();

        for state in 0..config.num_states {
            for action in 0..config.num_actions {
                let successors = env.transitions(state, action);
                assert_eq!(successors.len(), config.branching_factor);
                for (i, &(a, _)) in successors.iter().enumerate() {
                    assert!(a < config.num_states);
                    for &(b, _) in &successors[i + 1..] {
                        assert_ne!(a, b, "successors of ({state}, {action}) repeat");
                    }
                }
            }
        }
    }

    #[test]
    fn structural_queries() {
        let config = small_config();
        let mut env = RandomMdp::with_rng(&config, StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(env.initial_state(), 0);
        assert_eq!(env.reset(), 0);
        assert_eq!(env.actions(), vec![0, 1]);
        for _ in 0..20 {
            assert!(env.random_action() < 2);
        }
    }

    #[test]
    fn step_matches_precomputed_dynamics() {
        let config = small_config();
        let mut env = RandomMdp::with_rng(&config, StdRng::seed_from_u64(42)).unwrap();
        let successors: Vec<usize> = env.transitions(0, 0).iter().map(|&(s, _)| s).collect();
        let expected_rewards: Vec<f32> = env.transitions(0, 0).iter().map(|&(_, r)| r).collect();

        let trials = 20_000;
        let mut terminals = 0;
        let mut counts = vec![0usize; successors.len()];
        for _ in 0..trials {
            env.reset();
            match env.step(0) {
                (None, reward) => {
                    assert_eq!(reward, 0.0, "terminal steps carry zero reward");
                    terminals += 1;
                }
                (Some(next), reward) => {
                    let i = successors
                        .iter()
                        .position(|&s| s == next)
                        .expect("non-terminal step left the successor set");
                    assert_eq!(reward, expected_rewards[i], "rewards are fixed per successor");
                    counts[i] += 1;
                }
            }
        }

        let terminal_rate = terminals as f32 / trials as f32;
        assert!(
            (terminal_rate - 0.25).abs() < 0.02,
            "terminal rate {terminal_rate} far from 0.25"
        );
        for (i, &count) in counts.iter().enumerate() {
            let rate = count as f32 / trials as f32;
            assert!(
                (rate - 0.25).abs() < 0.02,
                "successor {i} rate {rate} far from 0.25"
            );
        }
    }

    #[test]
    fn unit_terminal_probability_always_terminates() {
        let config = Config {
            terminal_probability: 1.0,
            ..small_config()
        };
        let mut env = RandomMdp::with_rng(&config, StdRng::seed_from_u64(9)).unwrap();
        env.reset();
        for _ in 0..100 {
            assert!(matches!(env.step(0), (None, _)));
        }
    }
}
