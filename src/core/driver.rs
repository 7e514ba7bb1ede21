use std::num::NonZeroU64;

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{ProcIdx, Process, SchedCtx, Ticks},
};

pub type Quantum = NonZeroU64;

/// Single-CPU round-robin engine. Owns the simulation context and advances it
/// one tick at a time; admission of arrivals is driven from outside through
/// [`SchedCore::admit`].
pub struct SchedCore {
    pub ctx: SchedCtx,
    quantum: Quantum,
    observer: Observer,
}

impl SchedCore {
    pub fn new(procs: Vec<Process>, quantum: Quantum) -> Self {
        Self {
            ctx: SchedCtx::new(procs),
            quantum,
            observer: Observer::new(),
        }
    }

    pub fn admit(&mut self, idx: ProcIdx) -> SchedEvent {
        self.ctx.mark_ready(idx);
        SchedEvent::Admitted {
            pid: self.ctx.proc(idx).pid,
        }
    }

    // Runs the execution, completion/dispatch and preemption phases of the
    // current tick, then advances the clock.
    pub fn tick(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();

        if let Some(idx) = self.ctx.running {
            let proc = self.ctx.proc_mut(idx);
            if proc.remaining_time > 0 {
                proc.remaining_time -= 1;
                self.ctx.slice_used += 1;
            }
        }

        let finished = self
            .ctx
            .running
            .filter(|&idx| self.ctx.proc(idx).is_complete());

        if self.ctx.running.is_none() || finished.is_some() {
            if let Some(idx) = finished {
                self.ctx.retire(idx);
                events.push(SchedEvent::Retired {
                    pid: self.ctx.proc(idx).pid,
                });
            }
            self.ctx.slice_used = 0;

            match self.ctx.dispatch_next() {
                Some(idx) => events.push(SchedEvent::Dispatched {
                    pid: self.ctx.proc(idx).pid,
                }),
                None if !self.ctx.all_completed() => {
                    self.ctx.idle_ticks += 1;
                    events.push(SchedEvent::CpuIdle);
                }
                None => {}
            }
        } else if let Some(idx) = self.slice_expired() {
            self.ctx.preempt(idx);
            events.push(SchedEvent::Preempted {
                pid: self.ctx.proc(idx).pid,
            });

            let next = self
                .ctx
                .dispatch_next()
                .expect("Ready queue cannot be empty right after a preemption");
            events.push(SchedEvent::Dispatched {
                pid: self.ctx.proc(next).pid,
            });
            self.ctx.slice_used = 0;
        }

        self.observer.observe(&self.ctx);
        self.ctx.advance_time(1);
        events
    }

    fn slice_expired(&self) -> Option<ProcIdx> {
        let idx = self.ctx.running?;
        let expired =
            self.ctx.slice_used == self.quantum.get() && self.ctx.proc(idx).remaining_time > 0;
        expired.then_some(idx)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_with(procs: &[(u32, Ticks, Ticks)], quantum: u64) -> SchedCore {
        SchedCore::new(
            procs
                .iter()
                .map(|&(pid, arrival, burst)| Process::new(pid, arrival, burst))
                .collect(),
            Quantum::new(quantum).unwrap(),
        )
    }

    #[test]
    fn idle_cpu_picks_up_admitted_process_same_tick() {
        let mut core = core_with(&[(1, 0, 3)], 2);
        core.admit(0);

        let events = core.tick();
        assert_eq!(events, vec![SchedEvent::Dispatched { pid: 1 }]);
        assert_eq!(core.ctx.running, Some(0));
        assert_eq!(core.ctx.proc(0).response_time, Some(0));
        assert_eq!(core.now(), 1);
    }

    #[test]
    fn running_process_consumes_one_tick_of_work() {
        let mut core = core_with(&[(1, 0, 3)], 2);
        core.admit(0);
        core.tick();

        assert!(core.tick().is_empty());
        assert_eq!(core.ctx.proc(0).remaining_time, 2);
        assert_eq!(core.ctx.slice_used, 1);
    }

    #[test]
    fn expired_slice_rotates_to_queue_head() {
        let mut core = core_with(&[(1, 0, 4), (2, 0, 4)], 1);
        core.admit(0);
        core.admit(1);
        core.tick();

        let events = core.tick();
        assert_eq!(
            events,
            vec![
                SchedEvent::Preempted { pid: 1 },
                SchedEvent::Dispatched { pid: 2 },
            ]
        );
        assert_eq!(core.ctx.running, Some(1));
        assert_eq!(core.ctx.ready.iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(core.ctx.proc(0).last_preempted_at, Some(1));
        assert_eq!(core.ctx.proc(1).response_time, Some(1));
        assert_eq!(core.ctx.slice_used, 0);
    }

    #[test]
    fn lone_process_is_redispatched_after_its_own_preemption() {
        let mut core = core_with(&[(1, 0, 3)], 1);
        core.admit(0);
        core.tick();

        let events = core.tick();
        assert_eq!(
            events,
            vec![
                SchedEvent::Preempted { pid: 1 },
                SchedEvent::Dispatched { pid: 1 },
            ]
        );
        assert_eq!(core.ctx.proc(0).waiting_time, 0);
    }

    #[test]
    fn retirement_clears_cpu_before_idle_gap() {
        let mut core = core_with(&[(1, 0, 1), (2, 9, 1)], 4);
        core.admit(0);
        core.tick();

        let events = core.tick();
        assert_eq!(events, vec![SchedEvent::Retired { pid: 1 }, SchedEvent::CpuIdle]);
        assert_eq!(core.ctx.running, None);
        assert_eq!(core.ctx.completed, 1);

        // A stale running reference would count the completion again here.
        assert_eq!(core.tick(), vec![SchedEvent::CpuIdle]);
        assert_eq!(core.ctx.completed, 1);
        assert_eq!(core.ctx.idle_ticks, 2);
    }

    #[test]
    fn zero_burst_process_retires_on_the_following_tick() {
        let mut core = core_with(&[(1, 0, 0)], 3);
        core.admit(0);
        core.tick();

        assert_eq!(core.tick(), vec![SchedEvent::Retired { pid: 1 }]);
        assert!(core.ctx.all_completed());
        assert_eq!(core.ctx.proc(0).completion_time, Some(1));
    }
}
