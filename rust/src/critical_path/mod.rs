//! Critical path calculation.
//!
//! Finds the heaviest chain of dependent tasks in a task network. Weights
//! are effort estimates, so the resulting duration is in effort units.

mod calculation;

pub use calculation::{calculate_critical_path, unreached_tasks};
