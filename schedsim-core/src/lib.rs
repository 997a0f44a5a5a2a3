//! Discrete-event simulator core: the entity model, the ready-queue
//! scheduling policies, the event queue, the simulation engine, and the
//! statistics aggregator.
//!
//! This crate owns the in-memory contract only — parsing a workload file
//! and rendering a report are boundary concerns that live in the `schedsim`
//! binary crate (see [`trace::TraceSink`] for the seam between them).

pub mod engine;
pub mod entities;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod policy;
pub mod stats;
pub mod trace;

pub use engine::{DispatchOverheads, Engine};
pub use entities::{Burst, BurstKind, Process, ProcessType, Thread, ThreadId, ThreadState};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind, SchedulingDecision};
pub use event_queue::EventQueue;
pub use policy::{Scheduler, SchedulerKind};
pub use stats::SystemStats;
pub use trace::{NullTraceSink, TraceSink};
