/// Represents a Markov decision process, defining the dynamics of an
/// environment in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one
/// agent and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent,
    /// producing a new state and associated reward
    ///
    /// **Returns** `(next_state, reward)`, where a `next_state` of `None`
    /// marks the end of an episode
    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Sample a uniformly random action
    fn random_action(&mut self) -> Self::Action;
}

/// An [`Environment`] with a finite action space that can be enumerated
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions
    ///
    /// The returned vec should never be empty, instead specify an action that
    /// represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}
