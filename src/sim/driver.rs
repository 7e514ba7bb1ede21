use super::{metrics::Report, workload::Workload};
use crate::core::{
    driver::{Quantum, SchedCore},
    event::SchedEvent,
    state::Ticks,
};

pub struct Sim {
    pub core: SchedCore,
    // Next process to admit; processes are stored in admission order
    admit_cursor: usize,
}

impl Sim {
    pub fn new(workload: Workload, quantum: Quantum) -> Self {
        Self {
            core: SchedCore::new(workload.into_processes(), quantum),
            admit_cursor: 0,
        }
    }

    /// Simulates one tick and returns the events it produced.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = self.handle_arrivals();
        events.extend(self.core.tick());
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SchedEvent> {
        let now = self.core.now();
        let mut events = Vec::new();

        // Contiguous, since processes are sorted by arrival
        while self.admit_cursor < self.core.ctx.procs.len()
            && self.core.ctx.proc(self.admit_cursor).arrival_time <= now
        {
            events.push(self.core.admit(self.admit_cursor));
            self.admit_cursor += 1;
        }

        events
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.ready.is_empty() && self.core.ctx.all_completed()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    /// Runs the simulation to completion and aggregates the result.
    pub fn run(mut self) -> Report {
        log::info!(
            "simulating {} processes, quantum {}",
            self.core.ctx.procs.len(),
            self.core.quantum()
        );

        while !self.all_completed() {
            let now = self.now();
            for event in self.step() {
                log::trace!("t={now} {event:?}");
            }
        }

        log::info!(
            "all processes retired after {} ticks ({} preemptions, {} idle)",
            self.now(),
            self.core.ctx.preemptions,
            self.core.ctx.idle_ticks
        );
        Report::from_ctx(&self.core.ctx)
    }
}

/// Convenience wrapper: simulate `workload` under `quantum` and report.
pub fn simulate(workload: Workload, quantum: Quantum) -> Report {
    Sim::new(workload, quantum).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::workload::Job;

    fn sim_with(jobs: &[(u32, Ticks, Ticks)], quantum: u64) -> Sim {
        let workload = Workload::new(
            jobs.iter()
                .map(|&(pid, arrival, burst)| Job::new(pid, arrival, burst))
                .collect(),
        )
        .unwrap();
        Sim::new(workload, Quantum::new(quantum).unwrap())
    }

    #[test]
    fn simultaneous_arrivals_admitted_in_pid_order() {
        let mut sim = sim_with(&[(5, 0, 2), (3, 0, 2), (4, 1, 2)], 2);

        assert_eq!(
            sim.step(),
            vec![
                SchedEvent::Admitted { pid: 3 },
                SchedEvent::Admitted { pid: 5 },
                SchedEvent::Dispatched { pid: 3 },
            ]
        );
        assert_eq!(sim.step(), vec![SchedEvent::Admitted { pid: 4 }]);
    }

    #[test]
    fn late_arrival_leaves_cpu_idle_until_admitted() {
        let mut sim = sim_with(&[(1, 2, 1)], 1);

        assert_eq!(sim.step(), vec![SchedEvent::CpuIdle]);
        assert_eq!(sim.step(), vec![SchedEvent::CpuIdle]);
        assert_eq!(
            sim.step(),
            vec![
                SchedEvent::Admitted { pid: 1 },
                SchedEvent::Dispatched { pid: 1 },
            ]
        );
        assert!(!sim.all_completed());
        assert_eq!(sim.step(), vec![SchedEvent::Retired { pid: 1 }]);
        assert!(sim.all_completed());
    }

    #[test]
    fn observer_checks_every_simulated_tick() {
        let mut sim = sim_with(&[(1, 2, 3), (2, 2, 4)], 2);
        while !sim.all_completed() {
            sim.step();
        }

        assert_eq!(sim.now(), 10);
        assert_eq!(sim.core.observer().steps(), sim.now());
    }

    #[test]
    fn run_stops_once_every_process_is_retired() {
        let sim = sim_with(&[(1, 0, 3), (2, 1, 2)], 2);
        let report = sim.run();
        assert_eq!(report.makespan, 5);
        assert_eq!(report.processes.len(), 2);
    }
}
