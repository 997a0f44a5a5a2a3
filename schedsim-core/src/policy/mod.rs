//! Ready-queue scheduling policies.
//!
//! All four policies below implement the same [`Scheduler`] contract; the
//! engine never matches on which policy it holds — it drives them entirely
//! through the trait. [`SchedulerKind`] is the closed sum type a caller
//! picks from (no open extensibility is required by the contracts the
//! policies expose).

mod fcfs;
mod mlfq;
mod priority;
mod round_robin;

pub use fcfs::FcfsScheduler;
pub use mlfq::MlfqScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;

use crate::entities::ProcessType;
use crate::entities::ThreadId;
use crate::event::SchedulingDecision;

/// The ready-queue contract every policy implements.
pub trait Scheduler {
    /// Admit a ready thread. The caller has already transitioned the
    /// thread's state to `Ready`; this call is only responsible for queue
    /// placement.
    fn enqueue(&mut self, thread: ThreadId, process_type: ProcessType);

    /// Choose one ready thread and remove it from the queue, filling in
    /// `time_slice` and `explanation`. Returns `None` iff the queue is
    /// empty.
    fn next(&mut self) -> Option<SchedulingDecision>;

    /// Whether an arriving thread should preempt the running one. Every
    /// policy here returns `false`.
    fn preempt_on_arrival(&self) -> bool {
        false
    }

    /// Number of ready threads currently queued.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Default round-robin / MLFQ time slice, in ticks.
pub const DEFAULT_QUANTUM: u64 = 3;

/// Closed sum type over the four policies. Selected once at CLI startup and
/// driven by the engine through the [`Scheduler`] trait via `as_scheduler`.
pub enum SchedulerKind {
    Fcfs(FcfsScheduler),
    RoundRobin(RoundRobinScheduler),
    Priority(PriorityScheduler),
    Mlfq(MlfqScheduler),
}

impl SchedulerKind {
    pub fn fcfs() -> Self {
        Self::Fcfs(FcfsScheduler::default())
    }

    pub fn round_robin(quantum: u64) -> Self {
        Self::RoundRobin(RoundRobinScheduler::new(quantum))
    }

    pub fn priority() -> Self {
        Self::Priority(PriorityScheduler::default())
    }

    pub fn mlfq(quantum: u64) -> Self {
        Self::Mlfq(MlfqScheduler::new(quantum))
    }

    fn as_scheduler(&mut self) -> &mut dyn Scheduler {
        match self {
            Self::Fcfs(s) => s,
            Self::RoundRobin(s) => s,
            Self::Priority(s) => s,
            Self::Mlfq(s) => s,
        }
    }
}

impl Scheduler for SchedulerKind {
    fn enqueue(&mut self, thread: ThreadId, process_type: ProcessType) {
        self.as_scheduler().enqueue(thread, process_type)
    }

    fn next(&mut self) -> Option<SchedulingDecision> {
        self.as_scheduler().next()
    }

    fn preempt_on_arrival(&self) -> bool {
        match self {
            Self::Fcfs(s) => s.preempt_on_arrival(),
            Self::RoundRobin(s) => s.preempt_on_arrival(),
            Self::Priority(s) => s.preempt_on_arrival(),
            Self::Mlfq(s) => s.preempt_on_arrival(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Fcfs(s) => s.size(),
            Self::RoundRobin(s) => s.size(),
            Self::Priority(s) => s.size(),
            Self::Mlfq(s) => s.size(),
        }
    }
}
