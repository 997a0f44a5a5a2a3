//! Multilevel feedback: `L` round-robin queues, demoting a thread one level
//! on every re-enqueue, including after I/O (not just on time-slice
//! exhaustion as classical MLFQ does — deliberately preserved).

use super::{RoundRobinScheduler, Scheduler};
use crate::entities::{ProcessType, ThreadId};
use crate::event::SchedulingDecision;
use std::collections::HashMap;

/// Number of feedback levels.
pub const NUM_LEVELS: usize = 8;

pub struct MlfqScheduler {
    queues: Vec<RoundRobinScheduler>,
    levels: HashMap<ThreadId, usize>,
}

impl MlfqScheduler {
    pub fn new(time_slice: u64) -> Self {
        Self {
            queues: (0..NUM_LEVELS).map(|_| RoundRobinScheduler::new(time_slice)).collect(),
            levels: HashMap::new(),
        }
    }

    /// Current level of `thread`, if it has been admitted at least once.
    pub fn level_of(&self, thread: ThreadId) -> Option<usize> {
        self.levels.get(&thread).copied()
    }
}

impl Scheduler for MlfqScheduler {
    fn enqueue(&mut self, thread: ThreadId, process_type: ProcessType) {
        let level = match self.levels.get(&thread) {
            None => process_type.index().min(NUM_LEVELS - 1),
            Some(&current) => (current + 1).min(NUM_LEVELS - 1),
        };
        self.queues[level].enqueue(thread, process_type);
        self.levels.insert(thread, level);
    }

    fn next(&mut self) -> Option<SchedulingDecision> {
        for (i, queue) in self.queues.iter_mut().enumerate() {
            if !queue.is_empty() {
                // Off-by-one kept intentionally: counted before the pop
                // below, so it reports one more thread than was actually
                // waiting.
                let n = queue.size() + 1;
                let mut decision = queue.next()?;
                let time_slice = decision.time_slice.expect("round-robin always quantizes");
                decision.explanation = format!(
                    "Selected from {n} threads in level {}/{NUM_LEVELS}; will run for at most {time_slice} ticks",
                    i + 1
                );
                return Some(decision);
            }
        }
        None
    }

    fn size(&self) -> usize {
        self.queues.iter().map(Scheduler::size).sum()
    }
}
