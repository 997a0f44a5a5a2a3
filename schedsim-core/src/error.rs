//! Error types for the simulation engine.

use crate::entities::ThreadId;
use thiserror::Error;

/// Errors that indicate a bug in the simulator itself: an illegal state
/// transition, a handler invoked against the wrong burst kind, or a
/// scheduling decision that violates its own contract. These are never
/// expected in normal operation and are always fatal.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("thread {thread}: illegal state transition {from:?} -> {to:?} at t={time}")]
    IllegalTransition {
        thread: ThreadId,
        from: crate::entities::ThreadState,
        to: crate::entities::ThreadState,
        time: u64,
    },

    #[error("thread {thread}: expected a CPU burst at the front of the queue, found {found:?}")]
    FrontBurstMismatch {
        thread: ThreadId,
        found: crate::entities::BurstKind,
    },

    #[error("thread {thread}: front burst queue is empty but a handler required one")]
    NoBurst { thread: ThreadId },

    #[error(
        "thread {thread}: preemption time slice {time_slice} is not smaller than burst length {burst_length}"
    )]
    InvalidPreemption {
        thread: ThreadId,
        time_slice: u64,
        burst_length: u64,
    },

    #[error("event referenced unknown thread id {0}")]
    UnknownThread(ThreadId),

    #[error("dispatch event carried no scheduling decision")]
    MissingDecision,
}

pub type SimResult<T> = std::result::Result<T, SimError>;
