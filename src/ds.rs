/// A dense table of action values over a finite state-action space
///
/// Stores one `f32` per (state, action) pair, initialized to zero. Each
/// planner owns its table exclusively, so two planners compared against the
/// same environment never observe each other's updates.
pub struct QTable {
    values: Vec<f32>,
    num_actions: usize,
}

impl QTable {
    /// Construct a zero-initialized table of shape `(num_states, num_actions)`
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_actions,
        }
    }

    /// Get the value of a (state, action) pair
    pub fn get(&self, state: usize, action: usize) -> f32 {
        self.values[state * self.num_actions + action]
    }

    /// Assign the value of a (state, action) pair
    pub fn set(&mut self, state: usize, action: usize, value: f32) {
        self.values[state * self.num_actions + action] = value;
    }

    /// Get a slice view of all action values for a state
    pub fn row(&self, state: usize) -> &[f32] {
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    /// The action maximizing the state's row, ties broken by lowest index
    pub fn greedy_action(&self, state: usize) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// The estimated value of a state: the max over its action values
    pub fn value(&self, state: usize) -> f32 {
        self.get(state, self.greedy_action(state))
    }
}
