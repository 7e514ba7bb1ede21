use super::state::{ProcessState, SchedCtx};

/// Checks the dispatch-loop invariants after every tick. Only active in debug
/// builds; release builds just count ticks.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(idx) = ctx.running {
            let proc = ctx.proc(idx);
            debug_assert_eq!(
                proc.state,
                ProcessState::Running,
                "running process {} must be Running",
                proc.pid
            );
            debug_assert!(
                !ctx.ready.contains(idx),
                "Running process {} must not appear in the ready queue",
                proc.pid
            );
        }

        for idx in ctx.ready.iter() {
            let proc = ctx.proc(idx);
            debug_assert_eq!(
                proc.state,
                ProcessState::Ready,
                "Queued process {} must be Ready",
                proc.pid
            );
        }

        let mut ready = 0;
        let mut completed = 0;
        for proc in &ctx.procs {
            debug_assert!(
                proc.remaining_time <= proc.burst_time,
                "Process {} has more work left than its burst",
                proc.pid
            );

            match proc.state {
                ProcessState::Pending => {
                    debug_assert!(
                        proc.response_time.is_none(),
                        "Pending process {} already dispatched",
                        proc.pid
                    );
                }
                ProcessState::Ready => ready += 1,
                ProcessState::Running => {}
                ProcessState::Completed => {
                    completed += 1;
                    debug_assert!(
                        proc.is_complete() && proc.completion_time.is_some(),
                        "Completed process {} still has work or no completion tick",
                        proc.pid
                    );
                }
            }

            if proc.last_preempted_at.is_some() {
                debug_assert!(
                    proc.response_time.is_some(),
                    "Process {} preempted before its first dispatch",
                    proc.pid
                );
            }
            if let Some(response) = proc.response_time {
                debug_assert!(
                    proc.waiting_time >= response,
                    "Process {} waited less than its response time",
                    proc.pid
                );
            }
        }

        debug_assert_eq!(
            ready,
            ctx.ready.len(),
            "ready-queue length disagrees with Ready process count"
        );
        debug_assert_eq!(
            completed, ctx.completed,
            "completion counter disagrees with Completed process count"
        );
    }
}
