pub mod driver;
pub mod loader;
pub mod metrics;
pub mod synthetic;
pub mod workload;

pub use driver::{Sim, simulate};
pub use loader::{LoadError, ParseError, load_workload, parse_workload};
pub use metrics::{ProcessResult, Report};
pub use workload::{Job, Workload, WorkloadError};
