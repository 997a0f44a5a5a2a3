//! Events and scheduling decisions.

use crate::entities::ThreadId;

/// A decision made by a [`crate::policy::Scheduler`]: which thread to run
/// next, for how long, and why (for the trace sink).
#[derive(Debug, Clone)]
pub struct SchedulingDecision {
    pub thread: ThreadId,
    /// `None` means "run to completion of the current burst"; `Some(q)` is a
    /// quantized time slice of `q` ticks. Avoids an ambiguous `time_slice ==
    /// 0` sentinel for the non-quantized case.
    pub time_slice: Option<u64>,
    pub explanation: String,
}

/// The tag distinguishing the eight kinds of simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ThreadArrived,
    DispatcherInvoked,
    ProcessDispatchCompleted,
    ThreadDispatchCompleted,
    CpuBurstCompleted,
    IoBurstCompleted,
    ThreadPreempted,
    ThreadCompleted,
}

/// A single simulation event: a tag, a timestamp, and the optional thread
/// and scheduling decision it carries. The event queue owns events between
/// insertion and extraction; a handler owns (and implicitly drops) the event
/// it was given once it returns.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub time: u64,
    pub thread: Option<ThreadId>,
    pub decision: Option<SchedulingDecision>,
}

impl Event {
    pub fn new(kind: EventKind, time: u64) -> Self {
        Self { kind, time, thread: None, decision: None }
    }

    pub fn with_thread(kind: EventKind, time: u64, thread: ThreadId) -> Self {
        Self { kind, time, thread: Some(thread), decision: None }
    }

    pub fn dispatch_completed(
        kind: EventKind,
        time: u64,
        thread: ThreadId,
        decision: SchedulingDecision,
    ) -> Self {
        Self { kind, time, thread: Some(thread), decision: Some(decision) }
    }
}
