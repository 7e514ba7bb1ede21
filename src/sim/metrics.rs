use std::fmt;

use crate::core::{Pid, SchedCtx, Ticks};

/// Final timing of one retired process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub response_time: Ticks,
    pub waiting_time: Ticks,
    pub completion_time: Ticks,
}

impl ProcessResult {
    pub fn turnaround_time(&self) -> Ticks {
        self.completion_time - self.arrival_time
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    // Admission order
    pub processes: Vec<ProcessResult>,
    pub total_waiting: Ticks,
    pub total_response: Ticks,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub avg_turnaround: f64,
    pub makespan: Ticks,
    pub idle_ticks: Ticks,
    pub preemptions: u64,
}

impl Report {
    pub fn from_ctx(ctx: &SchedCtx) -> Self {
        let processes: Vec<ProcessResult> = ctx
            .procs
            .iter()
            .map(|proc| ProcessResult {
                pid: proc.pid,
                arrival_time: proc.arrival_time,
                burst_time: proc.burst_time,
                response_time: proc
                    .response_time
                    .expect("Retired process must have been dispatched"),
                waiting_time: proc.waiting_time,
                completion_time: proc
                    .completion_time
                    .expect("Report requires every process to be retired"),
            })
            .collect();

        for proc in &processes {
            log::debug!(
                "pid {}: arrival {} burst {} response {} waiting {} completion {}",
                proc.pid,
                proc.arrival_time,
                proc.burst_time,
                proc.response_time,
                proc.waiting_time,
                proc.completion_time
            );
        }

        let total_waiting: Ticks = processes.iter().map(|p| p.waiting_time).sum();
        let total_response: Ticks = processes.iter().map(|p| p.response_time).sum();
        let total_turnaround: Ticks = processes.iter().map(ProcessResult::turnaround_time).sum();
        let count = processes.len();

        Self {
            total_waiting,
            total_response,
            avg_waiting: avg(total_waiting, count),
            avg_response: avg(total_response, count),
            avg_turnaround: avg(total_turnaround, count),
            makespan: processes.iter().map(|p| p.completion_time).max().unwrap_or(0),
            idle_ticks: ctx.idle_ticks,
            preemptions: ctx.preemptions,
            processes,
        }
    }

    /// Per-process table, one header line plus one line per process.
    pub fn process_table(&self) -> ProcessTable<'_> {
        ProcessTable(self)
    }
}

// Exact quotient of the integer total; x.xx5 ties must stay on the tie
fn avg(total: Ticks, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

// The two-line result summary
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average waiting time: {:.2}", self.avg_waiting)?;
        write!(f, "Average response time: {:.2}", self.avg_response)
    }
}

pub struct ProcessTable<'a>(&'a Report);

impl fmt::Display for ProcessTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
            "pid", "arrival", "burst", "response", "waiting", "finish", "turnaround"
        )?;
        for proc in &self.0.processes {
            write!(
                f,
                "\n{:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
                proc.pid,
                proc.arrival_time,
                proc.burst_time,
                proc.response_time,
                proc.waiting_time,
                proc.completion_time,
                proc.turnaround_time()
            )?;
        }
        Ok(())
    }
}
