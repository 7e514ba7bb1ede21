use rand::prelude::*;

use super::workload::{Job, Workload};
use crate::core::Ticks;

/// Parameters for a Bernoulli-arrival workload: on every tick in
/// `0..ticks` a process arrives with probability `p_arrival`, and is short
/// with probability `p_short`.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 500,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
        }
    }
}

pub fn bernoulli_jobs(params: &BernoulliParams, seed: u64) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst_time = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };

            jobs.push(Job::new(jobs.len() as u32, t, burst_time));
        }
    }

    jobs
}

/// Same as [`bernoulli_jobs`], validated. `None` if no process arrived.
pub fn bernoulli_workload(params: &BernoulliParams, seed: u64) -> Option<Workload> {
    Workload::new(bernoulli_jobs(params, seed)).ok()
}
