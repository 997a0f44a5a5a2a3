//! The simulation engine: the event dispatch loop, its handlers, and the
//! timing bookkeeping they share.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::entities::{BurstKind, Process, ThreadId, ThreadState};
use crate::error::{SimError, SimResult};
use crate::event::{Event, EventKind, SchedulingDecision};
use crate::event_queue::EventQueue;
use crate::policy::{Scheduler, SchedulerKind};
use crate::stats::SystemStats;
use crate::trace::TraceSink;

/// Virtual-time overheads charged when the CPU switches between threads of
/// the same process and between threads of different processes.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOverheads {
    pub thread_switch: u64,
    pub process_switch: u64,
}

/// Owns the event queue, the process/thread graph, the scheduler, and the
/// running statistics for one simulation. Constructed once per run via
/// [`Engine::new`] and consumed by [`Engine::run`].
pub struct Engine {
    processes: Vec<Process>,
    index: HashMap<ThreadId, (usize, usize)>,
    queue: EventQueue,
    scheduler: SchedulerKind,
    overheads: DispatchOverheads,
    active_thread: Option<ThreadId>,
    prev_thread: Option<ThreadId>,
    stats: SystemStats,
}

impl Engine {
    pub fn new(
        processes: Vec<Process>,
        initial_events: Vec<Event>,
        scheduler: SchedulerKind,
        overheads: DispatchOverheads,
    ) -> Self {
        let mut index = HashMap::new();
        for (p, process) in processes.iter().enumerate() {
            for (t, thread) in process.threads.iter().enumerate() {
                index.insert(thread.id, (p, t));
            }
        }

        let mut queue = EventQueue::new();
        for event in initial_events {
            queue.push(event);
        }

        Self {
            processes,
            index,
            queue,
            scheduler,
            overheads,
            active_thread: None,
            prev_thread: None,
            stats: SystemStats::default(),
        }
    }

    fn thread(&self, id: ThreadId) -> SimResult<&crate::entities::Thread> {
        let &(p, t) = self.index.get(&id).ok_or(SimError::UnknownThread(id))?;
        Ok(&self.processes[p].threads[t])
    }

    fn thread_mut(&mut self, id: ThreadId) -> SimResult<&mut crate::entities::Thread> {
        let &(p, t) = self.index.get(&id).ok_or(SimError::UnknownThread(id))?;
        Ok(&mut self.processes[p].threads[t])
    }

    /// Run the simulation to completion (the event queue drains to empty),
    /// emitting notifications to `sink` as it goes, and return the final
    /// statistics.
    pub fn run(mut self, sink: &mut dyn TraceSink) -> SimResult<SystemStats> {
        while let Some(event) = self.queue.pop() {
            let kind = event.kind;
            let time = event.time;
            let thread_id = event.thread;

            trace!(?kind, time, thread = ?thread_id, "dispatching event");
            self.stats.total_time = time;
            self.dispatch(event, sink)?;

            if let Some(tid) = thread_id {
                let t = self.thread(tid)?;
                if t.current_state != t.previous_state {
                    sink.on_state_transition(kind, time, tid, t.previous_state, t.current_state);
                }
            }
        }

        let stats = std::mem::take(&mut self.stats).finalize(&self.processes);
        debug!(
            total_time = stats.total_time,
            cpu_utilization = stats.cpu_utilization,
            "simulation complete"
        );
        sink.on_complete(&self.processes, &stats);
        Ok(stats)
    }

    fn dispatch(&mut self, event: Event, sink: &mut dyn TraceSink) -> SimResult<()> {
        let time = event.time;
        match event.kind {
            EventKind::ThreadArrived => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                self.handle_thread_arrived(tid, time)
            }
            EventKind::DispatcherInvoked => self.handle_dispatcher_invoked(time, sink),
            EventKind::ThreadDispatchCompleted | EventKind::ProcessDispatchCompleted => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                let decision = event.decision.ok_or(SimError::MissingDecision)?;
                self.handle_dispatch_completed(tid, decision, time)
            }
            EventKind::CpuBurstCompleted => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                self.handle_cpu_burst_completed(tid, time)
            }
            EventKind::IoBurstCompleted => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                self.handle_io_burst_completed(tid, time)
            }
            EventKind::ThreadPreempted => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                let decision = event.decision.ok_or(SimError::MissingDecision)?;
                self.handle_thread_preempted(tid, decision, time)
            }
            EventKind::ThreadCompleted => {
                let tid = event.thread.ok_or(SimError::MissingDecision)?;
                self.handle_thread_completed(tid, time)
            }
        }
    }

    /// Posts `DISPATCHER_INVOKED` at `time` only if the CPU is idle;
    /// otherwise a later completion event will invoke it.
    fn invoke_dispatcher(&mut self, time: u64) {
        if self.active_thread.is_none() {
            self.queue.push(Event::new(EventKind::DispatcherInvoked, time));
        }
    }

    fn handle_thread_arrived(&mut self, tid: ThreadId, time: u64) -> SimResult<()> {
        self.thread_mut(tid)?.transition(ThreadState::Ready, time)?;
        let process_type = self.thread(tid)?.process_type;
        self.scheduler.enqueue(tid, process_type);
        self.invoke_dispatcher(time);
        Ok(())
    }

    fn handle_dispatcher_invoked(&mut self, time: u64, sink: &mut dyn TraceSink) -> SimResult<()> {
        // Two threads arriving at the same tick each call invoke_dispatcher
        // while the CPU is still idle, queuing two DISPATCHER_INVOKED
        // events before either has run. Guard here, not just at the call
        // site, so the second one is a no-op instead of double-dispatching.
        if self.active_thread.is_some() {
            return Ok(());
        }

        let Some(decision) = self.scheduler.next() else {
            return Ok(());
        };
        let next_thread = decision.thread;
        let explanation = decision.explanation.clone();

        let switches_process = match self.prev_thread {
            None => true,
            Some(prev) => self.thread(prev)?.process_id != self.thread(next_thread)?.process_id,
        };

        if switches_process {
            let overhead = self.overheads.process_switch;
            self.queue.push(Event::dispatch_completed(
                EventKind::ProcessDispatchCompleted,
                time + overhead,
                next_thread,
                decision,
            ));
            self.stats.dispatch_time += overhead;
        } else {
            let overhead = self.overheads.thread_switch;
            self.queue.push(Event::dispatch_completed(
                EventKind::ThreadDispatchCompleted,
                time + overhead,
                next_thread,
                decision,
            ));
            self.stats.dispatch_time += overhead;
        }

        debug!(thread = ?next_thread, time, "{}", explanation);
        sink.on_dispatch(time, next_thread, &explanation);
        self.active_thread = Some(next_thread);
        Ok(())
    }

    fn handle_dispatch_completed(
        &mut self,
        tid: ThreadId,
        decision: SchedulingDecision,
        time: u64,
    ) -> SimResult<()> {
        self.thread_mut(tid)?.transition(ThreadState::Running, time)?;
        self.prev_thread = self.active_thread;
        self.active_thread = Some(tid);

        let burst = self
            .thread(tid)?
            .front_burst()
            .copied()
            .ok_or(SimError::NoBurst { thread: tid })?;
        if burst.kind != BurstKind::Cpu {
            return Err(SimError::FrontBurstMismatch { thread: tid, found: burst.kind });
        }

        match decision.time_slice {
            Some(q) if q < burst.length => {
                self.queue.push(Event::dispatch_completed(
                    EventKind::ThreadPreempted,
                    time + q,
                    tid,
                    decision,
                ));
                self.stats.service_time += q;
            }
            _ => {
                self.queue.push(Event::with_thread(EventKind::CpuBurstCompleted, time + burst.length, tid));
                self.stats.service_time += burst.length;
            }
        }
        Ok(())
    }

    fn handle_cpu_burst_completed(&mut self, tid: ThreadId, time: u64) -> SimResult<()> {
        let burst = self
            .thread_mut(tid)?
            .pop_front_burst()
            .ok_or(SimError::NoBurst { thread: tid })?;
        if burst.kind != BurstKind::Cpu {
            return Err(SimError::FrontBurstMismatch { thread: tid, found: burst.kind });
        }

        self.prev_thread = self.active_thread;
        self.active_thread = None;
        self.invoke_dispatcher(time);

        if self.thread(tid)?.front_burst().is_none() {
            self.queue.push(Event::with_thread(EventKind::ThreadCompleted, time, tid));
        } else {
            self.thread_mut(tid)?.transition(ThreadState::Blocked, time)?;
            let io_length = self.thread(tid)?.front_burst().expect("checked above").length;
            self.queue.push(Event::with_thread(EventKind::IoBurstCompleted, time + io_length, tid));
        }
        Ok(())
    }

    fn handle_io_burst_completed(&mut self, tid: ThreadId, time: u64) -> SimResult<()> {
        self.thread_mut(tid)?.transition(ThreadState::Ready, time)?;
        let burst = self
            .thread_mut(tid)?
            .pop_front_burst()
            .ok_or(SimError::NoBurst { thread: tid })?;
        self.stats.io_time += burst.length;

        let process_type = self.thread(tid)?.process_type;
        self.scheduler.enqueue(tid, process_type);
        self.invoke_dispatcher(time);
        Ok(())
    }

    fn handle_thread_preempted(
        &mut self,
        tid: ThreadId,
        decision: SchedulingDecision,
        time: u64,
    ) -> SimResult<()> {
        let time_slice = decision.time_slice.unwrap_or(0);
        {
            let burst = self
                .thread(tid)?
                .front_burst()
                .copied()
                .ok_or(SimError::NoBurst { thread: tid })?;
            if burst.kind != BurstKind::Cpu {
                return Err(SimError::FrontBurstMismatch { thread: tid, found: burst.kind });
            }
            if burst.length <= time_slice {
                return Err(SimError::InvalidPreemption {
                    thread: tid,
                    time_slice,
                    burst_length: burst.length,
                });
            }
        }

        self.thread_mut(tid)?.transition(ThreadState::Ready, time)?;
        self.thread_mut(tid)?
            .front_burst_mut()
            .expect("checked above")
            .length -= time_slice;

        let process_type = self.thread(tid)?.process_type;
        self.scheduler.enqueue(tid, process_type);
        self.prev_thread = self.active_thread;
        self.active_thread = None;
        self.invoke_dispatcher(time);
        Ok(())
    }

    fn handle_thread_completed(&mut self, tid: ThreadId, time: u64) -> SimResult<()> {
        self.thread_mut(tid)?.transition(ThreadState::Exit, time)
    }
}
