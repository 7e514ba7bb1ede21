pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{Quantum, SchedCore};
pub use event::SchedEvent;
pub use state::{Pid, ProcIdx, Process, ProcessState, ReadyQueue, SchedCtx, Ticks};
