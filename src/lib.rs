pub mod core;
pub mod sim;

pub use crate::core::{Quantum, SchedEvent};
pub use sim::{Job, Report, Sim, Workload, simulate};

/// Exit code for invalid arguments and invalid workload contents (`EINVAL`).
pub const EXIT_INVALID_ARGUMENT: u8 = 22;
