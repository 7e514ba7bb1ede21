use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::{Pid, Process, Ticks};

/// One decoded workload record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Job {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("workload contains no processes")]
    Empty,
    #[error("pid {0} appears more than once in the workload")]
    DuplicatePid(Pid),
}

/// Validated jobs in admission order: arrival time, then pid.
#[derive(Debug, Clone)]
pub struct Workload {
    jobs: Vec<Job>,
}

impl Workload {
    pub fn new(mut jobs: Vec<Job>) -> Result<Self, WorkloadError> {
        if jobs.is_empty() {
            return Err(WorkloadError::Empty);
        }

        let mut seen = FxHashSet::default();
        seen.reserve(jobs.len());
        for job in &jobs {
            if !seen.insert(job.pid) {
                return Err(WorkloadError::DuplicatePid(job.pid));
            }
        }

        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.pid.cmp(&b.pid))
        });

        Ok(Self { jobs })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn total_burst(&self) -> Ticks {
        self.jobs.iter().map(|job| job.burst_time).sum()
    }

    pub(crate) fn into_processes(self) -> Vec<Process> {
        self.jobs
            .into_iter()
            .map(|job| Process::new(job.pid, job.arrival_time, job.burst_time))
            .collect()
    }
}
