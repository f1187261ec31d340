use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{Config, ConfigError},
    decay::{Constant, Decay},
    ds::QTable,
    env::Environment,
    exploration::{Choice, EpsilonGreedy},
    mdp::RandomMdp,
    memory::TrajectoryMemory,
};

/// How a planner picks the next (state, action) pair to back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Visit every pair in ascending (state, action) order, wrapping around
    /// until the budget is exhausted
    ExhaustiveSweep,
    /// Generate epsilon-greedy episodes from the root and back up pairs
    /// sampled uniformly from the accumulated trajectory memory
    TrajectorySampling,
}

/// A tabular planner that repeatedly applies Bellman expectation backups to
/// the cells of a [`QTable`], under one of two update-sampling strategies
///
/// Both strategies share the same backup: for a pair `(s, a)` the new value
/// is the sum over the precomputed successors `(s', r)` of
/// `[(1 - p_term) / b] * (r + Q[s', greedy(s')])`. Updates are applied in
/// place, so later backups in a sweep read values written earlier in the same
/// pass. After every cell update the planner records the current estimated
/// value of the root state; the resulting trace is the planner's output.
pub struct QPlanner<D: Decay = Constant> {
    q: QTable,
    memory: TrajectoryMemory,
    exploration: EpsilonGreedy<D>,
    strategy: UpdateStrategy,
    updates_per_episode: usize,
    root: usize,
    episode: u32,
    rng: StdRng,
}

impl QPlanner<Constant> {
    /// Initialize a planner bound to an environment, with a fixed exploration
    /// rate taken from the configuration and a generator seeded from entropy
    pub fn new(
        env: &RandomMdp,
        config: &Config,
        strategy: UpdateStrategy,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(env, config, strategy, StdRng::from_entropy())
    }

    /// Initialize a planner using a caller-provided generator
    pub fn with_rng(
        env: &RandomMdp,
        config: &Config,
        strategy: UpdateStrategy,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let exploration = EpsilonGreedy::new(Constant::new(config.epsilon_exploration));
        Self::with_exploration(env, config, strategy, exploration, rng)
    }
}

impl<D: Decay> QPlanner<D> {
    /// Initialize a planner with a customized exploration policy
    pub fn with_exploration(
        env: &RandomMdp,
        config: &Config,
        strategy: UpdateStrategy,
        exploration: EpsilonGreedy<D>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            q: QTable::new(env.num_states(), env.num_actions()),
            memory: TrajectoryMemory::new(),
            exploration,
            strategy,
            updates_per_episode: config.updates_per_episode,
            root: env.initial_state(),
            episode: 0,
            rng,
        })
    }

    pub fn q_table(&self) -> &QTable {
        &self.q
    }

    /// Apply exactly `total_updates` backups under the configured strategy
    ///
    /// **Returns** the root-value trace: the estimated value of the root
    /// state before any update, followed by one entry per applied update, for
    /// a total length of `total_updates + 1`.
    pub fn run_updates(
        &mut self,
        env: &mut RandomMdp,
        total_updates: usize,
    ) -> Result<Vec<f32>, ConfigError> {
        if total_updates == 0 {
            return Err(ConfigError::NonPositive {
                name: "total_updates",
            });
        }

        let mut trace = Vec::with_capacity(total_updates + 1);
        trace.push(self.q.value(self.root));
        let mut applied = 0;

        match self.strategy {
            UpdateStrategy::ExhaustiveSweep => {
                'pass: loop {
                    for state in 0..env.num_states() {
                        for action in 0..env.num_actions() {
                            self.backup(env, state, action, &mut trace);
                            applied += 1;
                            if applied % 1000 == 0 {
                                debug!("applied {applied}/{total_updates} updates");
                            }
                            if applied == total_updates {
                                break 'pass;
                            }
                        }
                    }
                }
            }
            UpdateStrategy::TrajectorySampling => {
                'budget: while applied < total_updates {
                    self.generate_episode(env);
                    for _ in 0..self.updates_per_episode {
                        let (state, action) = self
                            .memory
                            .sample(&mut self.rng)
                            .expect("an episode records at least one pair");
                        self.backup(env, state, action, &mut trace);
                        applied += 1;
                        if applied % 1000 == 0 {
                            debug!("applied {applied}/{total_updates} updates");
                        }
                        if applied == total_updates {
                            break 'budget;
                        }
                    }
                }
            }
        }

        Ok(trace)
    }

    /// Roll out one epsilon-greedy episode from the root, recording every
    /// visited (state, action) pair in the trajectory memory
    fn generate_episode(&mut self, env: &mut RandomMdp) {
        let mut state = env.reset();
        loop {
            let action = self.act(env, state);
            self.memory.push(state, action);
            match env.step(action) {
                (Some(next), _) => state = next,
                (None, _) => break,
            }
        }
        self.episode += 1;
    }

    /// Choose an action for a state via the exploration policy
    fn act(&mut self, env: &mut RandomMdp, state: usize) -> usize {
        match self.exploration.choose(&mut self.rng, self.episode) {
            Choice::Explore => env.random_action(),
            Choice::Exploit => self.q.greedy_action(state),
        }
    }

    /// Back up one cell and record the root value
    fn backup(&mut self, env: &RandomMdp, state: usize, action: usize, trace: &mut Vec<f32>) {
        let value = self.expected_value(env, state, action);
        self.q.set(state, action, value);
        trace.push(self.q.value(self.root));
    }

    /// The Bellman expectation target for a pair, a pure function of the
    /// current table and the transition model
    ///
    /// Terminal transitions contribute zero value: the successor lists never
    /// contain the terminal outcome, so the sum's total probability mass is
    /// `1 - terminal_probability`.
    fn expected_value(&self, env: &RandomMdp, state: usize, action: usize) -> f32 {
        let p_transition = (1.0 - env.terminal_probability()) / env.branching_factor() as f32;
        env.transitions(state, action)
            .iter()
            .map(|&(next, reward)| p_transition * (reward + self.q.value(next)))
            .sum()
    }
}
