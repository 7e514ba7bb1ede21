use crate::core::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    // Arrived and placed at the ready-queue tail
    Admitted { pid: Pid },
    Dispatched { pid: Pid },
    // Quantum expired with work left; returned to the ready-queue tail
    Preempted { pid: Pid },
    Retired { pid: Pid },
    // Nothing to dispatch while processes are still outstanding
    CpuIdle,
}
