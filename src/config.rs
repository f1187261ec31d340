use thiserror::Error;

/// Error raised when a run is configured with parameters the model cannot
/// support
///
/// These are construction-time failures; once an environment and planner are
/// built, no further failure paths exist.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("branching factor {branching_factor} exceeds state count {num_states} (successors are sampled without replacement)")]
    BranchingTooLarge {
        branching_factor: usize,
        num_states: usize,
    },

    #[error("`{name}` must be positive")]
    NonPositive { name: &'static str },

    #[error("`{name}` must be in the interval [0, 1], got {value}")]
    OutOfInterval { name: &'static str, value: f32 },

    #[error("`vi - vf` must have the same sign as `rate`")]
    InvalidDecay,
}

/// Parameters of one convergence study: the shape of the generated MDP and
/// the knobs of the update strategies
///
/// A single `Config` is shared by the environment and every planner bound to
/// it, so the termination mass the simulator applies and the one the backup
/// assumes always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of states in the generated MDP
    pub num_states: usize,
    /// Number of actions available in every state
    pub num_actions: usize,
    /// Successor states precomputed per (state, action) pair
    pub branching_factor: usize,
    /// Probability of picking a uniformly random action during episode
    /// generation
    pub epsilon_exploration: f32,
    /// Probability that any single step ends the episode, independent of
    /// state and action
    pub terminal_probability: f32,
    /// Total individual cell updates applied by one `run_updates` call
    pub total_updates: usize,
    /// Backups applied per generated episode (trajectory strategy only)
    pub updates_per_episode: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_states: 100,
            num_actions: 2,
            branching_factor: 3,
            epsilon_exploration: 0.1,
            terminal_probability: 0.1,
            total_updates: 20_000,
            updates_per_episode: 100,
        }
    }
}

impl Config {
    /// Check every parameter, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("num_states", self.num_states),
            ("num_actions", self.num_actions),
            ("branching_factor", self.branching_factor),
            ("total_updates", self.total_updates),
            ("updates_per_episode", self.updates_per_episode),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { name });
            }
        }
        if self.branching_factor > self.num_states {
            return Err(ConfigError::BranchingTooLarge {
                branching_factor: self.branching_factor,
                num_states: self.num_states,
            });
        }
        for (name, value) in [
            ("epsilon_exploration", self.epsilon_exploration),
            ("terminal_probability", self.terminal_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfInterval { name, value });
            }
        }
        Ok(())
    }
}
