//! The trace sink boundary: a narrow trait the engine emits
//! state-transition and dispatch notifications through, so it never depends
//! on stdout or a particular report format directly.

use crate::entities::{Process, ThreadId, ThreadState};
use crate::event::EventKind;
use crate::stats::SystemStats;

/// Receives state-transition and dispatch notifications as the engine runs,
/// plus the final per-process thread details and statistics once the event
/// queue drains.
pub trait TraceSink {
    /// A thread changed state while handling `event_kind` at `time`.
    fn on_state_transition(
        &mut self,
        event_kind: EventKind,
        time: u64,
        thread: ThreadId,
        from: ThreadState,
        to: ThreadState,
    );

    /// The dispatcher chose `thread` at `time`, for the given reason.
    fn on_dispatch(&mut self, time: u64, thread: ThreadId, explanation: &str);

    /// The simulation has finished; here is the final process/thread graph
    /// and the aggregated statistics.
    fn on_complete(&mut self, processes: &[Process], stats: &SystemStats);
}

/// Discards every notification. Used when `--verbose` is not passed, and in
/// tests that only care about the returned [`SystemStats`].
#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn on_state_transition(
        &mut self,
        _event_kind: EventKind,
        _time: u64,
        _thread: ThreadId,
        _from: ThreadState,
        _to: ThreadState,
    ) {
    }

    fn on_dispatch(&mut self, _time: u64, _thread: ThreadId, _explanation: &str) {}

    fn on_complete(&mut self, _processes: &[Process], _stats: &SystemStats) {}
}
