pub mod planner;

pub use planner::{QPlanner, UpdateStrategy};
