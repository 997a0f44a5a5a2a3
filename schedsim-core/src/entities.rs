//! The entity model: bursts, threads, processes, and the thread state
//! machine.

use crate::error::{SimError, SimResult};
use std::collections::VecDeque;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Stable, non-owning handle to a [`Thread`]. Scheduling policies key their
/// internal queues and level maps on this rather than holding references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ThreadId(pub u32);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process priority class. The discriminant is the value carried in the
/// workload file and is what priority/MLFQ index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u8)]
pub enum ProcessType {
    System = 0,
    Interactive = 1,
    Normal = 2,
    Batch = 3,
}

impl ProcessType {
    pub const COUNT: usize = 4;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::System),
            1 => Some(Self::Interactive),
            2 => Some(Self::Normal),
            3 => Some(Self::Batch),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Interactive => "INTERACTIVE",
            Self::Normal => "NORMAL",
            Self::Batch => "BATCH",
        }
    }
}

/// A contiguous interval of CPU use or I/O wait inside a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BurstKind {
    Cpu,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Burst {
    pub kind: BurstKind,
    pub length: u64,
}

impl Burst {
    pub fn cpu(length: u64) -> Self {
        Self { kind: BurstKind::Cpu, length }
    }

    pub fn io(length: u64) -> Self {
        Self { kind: BurstKind::Io, length }
    }
}

/// Valid states in which a thread can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ThreadState {
    New,
    Ready,
    Running,
    Blocked,
    Exit,
}

/// A thread of execution, with one or more alternating CPU and I/O bursts.
///
/// Invariants upheld by [`Thread::transition`]: `arrival_time <= start_time
/// <= end_time`; `service_time` equals the sum of CPU-burst lengths once the
/// thread reaches `Exit`; `bursts` is drained to empty by the time it does.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Thread {
    pub id: ThreadId,
    pub process_id: u32,
    pub process_type: ProcessType,
    pub arrival_time: u64,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub service_time: u64,
    pub io_time: u64,
    pub state_change_time: u64,
    pub current_state: ThreadState,
    pub previous_state: ThreadState,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub bursts: VecDeque<Burst>,
}

impl Thread {
    pub fn new(
        id: ThreadId,
        process_id: u32,
        process_type: ProcessType,
        arrival_time: u64,
        bursts: VecDeque<Burst>,
    ) -> Self {
        Self {
            id,
            process_id,
            process_type,
            arrival_time,
            start_time: None,
            end_time: None,
            service_time: 0,
            io_time: 0,
            state_change_time: arrival_time,
            current_state: ThreadState::New,
            previous_state: ThreadState::New,
            bursts,
        }
    }

    /// Response time: `start_time - arrival_time`. Only meaningful once the
    /// thread has been dispatched at least once.
    pub fn response_time(&self) -> Option<u64> {
        self.start_time.map(|s| s.saturating_sub(self.arrival_time))
    }

    /// Turnaround time: `end_time - arrival_time`. Only meaningful at EXIT.
    pub fn turnaround_time(&self) -> Option<u64> {
        self.end_time.map(|e| e.saturating_sub(self.arrival_time))
    }

    /// Apply a legal state transition at `time`, updating bookkeeping per
    /// the side-effect table. Returns [`SimError::IllegalTransition`] for any
    /// pair not in that table.
    pub fn transition(&mut self, to: ThreadState, time: u64) -> SimResult<()> {
        use ThreadState::*;

        match (self.current_state, to) {
            (New, Ready) => {}
            (Ready, Running) => {
                if self.start_time.is_none() {
                    self.start_time = Some(time);
                }
            }
            (Running, Ready) => {
                self.service_time += time - self.state_change_time;
            }
            (Running, Blocked) => {
                self.service_time += time - self.state_change_time;
            }
            (Blocked, Ready) => {
                self.io_time += time - self.state_change_time;
            }
            (Running, Exit) => {
                self.service_time += time - self.state_change_time;
                self.end_time = Some(time);
            }
            (from, to) => {
                return Err(SimError::IllegalTransition { thread: self.id, from, to, time });
            }
        }

        self.previous_state = self.current_state;
        self.current_state = to;
        self.state_change_time = time;
        Ok(())
    }

    /// The burst at the front of the queue, if any.
    pub fn front_burst(&self) -> Option<&Burst> {
        self.bursts.front()
    }

    /// Mutable access to the front burst, so a preemption can shrink its
    /// remaining length in place.
    pub fn front_burst_mut(&mut self) -> Option<&mut Burst> {
        self.bursts.front_mut()
    }

    /// Remove and return the front burst.
    pub fn pop_front_burst(&mut self) -> Option<Burst> {
        self.bursts.pop_front()
    }
}

/// A process: a pid, a priority class, and the threads it owns.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Process {
    pub pid: u32,
    pub process_type: ProcessType,
    pub threads: Vec<Thread>,
}

impl Process {
    pub fn new(pid: u32, process_type: ProcessType) -> Self {
        Self { pid, process_type, threads: Vec::new() }
    }
}
