use std::collections::VecDeque;

// Index into the process Vec
pub type ProcIdx = usize;
pub type Pid = u32;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Option<Ticks>,
    pub last_preempted_at: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            state: ProcessState::Pending,
            remaining_time: burst_time,
            waiting_time: 0,
            response_time: None,
            last_preempted_at: None,
            completion_time: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|done| done - self.arrival_time)
    }
}

/// FIFO of processes that have arrived, are not complete and are not running.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    procs: VecDeque<ProcIdx>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, idx: ProcIdx) {
        self.procs.push_back(idx);
    }

    pub fn dequeue(&mut self) -> Option<ProcIdx> {
        self.procs.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn contains(&self, idx: ProcIdx) -> bool {
        self.procs.contains(&idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcIdx> + '_ {
        self.procs.iter().copied()
    }
}

/// Whole dispatch-loop state. Owns the process storage; the ready queue and
/// `running` only hold indices into it.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: Vec<Process>,
    pub ready: ReadyQueue,
    pub running: Option<ProcIdx>,
    pub slice_used: Ticks,
    pub completed: usize,
    pub preemptions: u64,
    pub idle_ticks: Ticks,
}

impl SchedCtx {
    pub fn new(procs: Vec<Process>) -> Self {
        Self {
            now: 0,
            procs,
            ready: ReadyQueue::new(),
            running: None,
            slice_used: 0,
            completed: 0,
            preemptions: 0,
            idle_ticks: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn proc(&self, idx: ProcIdx) -> &Process {
        &self.procs[idx]
    }

    pub fn proc_mut(&mut self, idx: ProcIdx) -> &mut Process {
        &mut self.procs[idx]
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.procs.len()
    }

    pub fn mark_ready(&mut self, idx: ProcIdx) {
        debug_assert!(
            !self.ready.contains(idx),
            "Process {} already present in the ready queue",
            self.procs[idx].pid
        );

        let proc = self.proc_mut(idx);
        debug_assert!(
            proc.state != ProcessState::Completed,
            "Completed process {} cannot be ready",
            proc.pid
        );
        proc.state = ProcessState::Ready;
        self.ready.enqueue(idx);
    }

    // Pops the ready-queue head onto the CPU and applies dispatch accounting
    pub fn dispatch_next(&mut self) -> Option<ProcIdx> {
        debug_assert!(self.running.is_none(), "CPU already running a process");

        let idx = self.ready.dequeue()?;
        let now = self.now;
        let proc = self.proc_mut(idx);
        debug_assert_eq!(
            proc.state,
            ProcessState::Ready,
            "Dispatched process {} must come from the ready queue",
            proc.pid
        );

        match proc.response_time {
            None => {
                let response = now - proc.arrival_time;
                proc.response_time = Some(response);
                proc.waiting_time += response;
            }
            Some(_) => {
                let stopped_at = proc
                    .last_preempted_at
                    .expect("Previously dispatched process must have been preempted");
                proc.waiting_time += now - stopped_at;
            }
        }
        proc.state = ProcessState::Running;

        self.running = Some(idx);
        Some(idx)
    }

    pub fn retire(&mut self, idx: ProcIdx) {
        debug_assert_eq!(self.running, Some(idx), "Retiring a process that is not running");

        let now = self.now;
        let proc = self.proc_mut(idx);
        debug_assert!(proc.is_complete(), "Process {} retired with work left", proc.pid);
        proc.state = ProcessState::Completed;
        proc.completion_time = Some(now);

        self.running = None;
        self.completed += 1;
    }

    pub fn preempt(&mut self, idx: ProcIdx) {
        debug_assert_eq!(self.running, Some(idx), "Preempting a process that is not running");

        let now = self.now;
        self.proc_mut(idx).last_preempted_at = Some(now);
        self.running = None;
        self.preemptions += 1;
        self.mark_ready(idx);
    }
}
