/// Implemented planning algorithms
pub mod algo;

/// Run configuration
pub mod config;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Randomly generated MDPs
pub mod mdp;

/// Trajectory memory
pub mod memory;
