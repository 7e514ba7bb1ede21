//! Workload decoding.
//!
//! The input is a process count followed by that many
//! `pid arrival_time burst_time` triples. Integers are maximal runs of ASCII
//! digits and every other byte separates them, so any whitespace or
//! punctuation layout is accepted. Anything after the last expected integer is
//! ignored.

use std::{fmt, fs, io, path::Path, path::PathBuf};

use thiserror::Error;

use super::workload::{Job, Workload, WorkloadError};
use crate::{EXIT_INVALID_ARGUMENT, core::Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Pid,
    ArrivalTime,
    BurstTime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Pid => "pid",
            Field::ArrivalTime => "arrival time",
            Field::BurstTime => "burst time",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("reached end of input while looking for the process count")]
    MissingCount,
    #[error("reached end of input while looking for the {field} of process {record} of {count}")]
    Truncated {
        field: Field,
        record: usize,
        count: usize,
    },
    #[error("integer starting at byte {offset} does not fit in 32 bits")]
    Overflow { offset: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read workload {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed workload: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid workload: {0}")]
    Invalid(#[from] WorkloadError),
}

impl LoadError {
    /// Process exit code for this failure: the OS error number for I/O
    /// failures, `EINVAL` for anything wrong with the contents.
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::Io { source, .. } => source
                .raw_os_error()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|&code| code != 0)
                .unwrap_or(1),
            LoadError::Parse(_) | LoadError::Invalid(_) => EXIT_INVALID_ARGUMENT,
        }
    }
}

struct Tokens<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    // Ok(None) once the input is exhausted
    fn next_int(&mut self) -> Result<Option<u32>, ParseError> {
        while self.pos < self.input.len() && !self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == self.input.len() {
            return Ok(None);
        }

        let offset = self.pos;
        let mut value: u32 = 0;
        while let Some(&byte) = self.input.get(self.pos).filter(|b| b.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(byte - b'0')))
                .ok_or(ParseError::Overflow { offset })?;
            self.pos += 1;
        }
        Ok(Some(value))
    }
}

/// Decodes raw workload bytes into jobs, in file order.
pub fn parse_jobs(input: &[u8]) -> Result<Vec<Job>, ParseError> {
    let mut tokens = Tokens::new(input);
    let count = tokens.next_int()?.ok_or(ParseError::MissingCount)? as usize;

    // Every record takes at least six bytes, so a lying count cannot force a
    // large allocation.
    let mut jobs = Vec::with_capacity(count.min(input.len() / 6));
    for record in 1..=count {
        let mut field = |field: Field| -> Result<u32, ParseError> {
            tokens.next_int()?.ok_or(ParseError::Truncated {
                field,
                record,
                count,
            })
        };
        let pid = field(Field::Pid)?;
        let arrival_time = Ticks::from(field(Field::ArrivalTime)?);
        let burst_time = Ticks::from(field(Field::BurstTime)?);
        jobs.push(Job::new(pid, arrival_time, burst_time));
    }

    Ok(jobs)
}

/// Decodes and validates a workload.
pub fn parse_workload(input: &[u8]) -> Result<Workload, LoadError> {
    Ok(Workload::new(parse_jobs(input)?)?)
}

pub fn load_workload(path: impl AsRef<Path>) -> Result<Workload, LoadError> {
    let path = path.as_ref();
    let input = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let workload = parse_workload(&input)?;
    log::info!(
        "loaded {} processes from {} ({} ticks of work)",
        workload.len(),
        path.display(),
        workload.total_burst()
    );
    Ok(workload)
}
