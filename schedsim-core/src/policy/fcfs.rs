//! First-come-first-served: a single FIFO queue.

use super::Scheduler;
use crate::entities::{ProcessType, ThreadId};
use crate::event::SchedulingDecision;
use std::collections::VecDeque;

#[derive(Default)]
pub struct FcfsScheduler {
    threads: VecDeque<ThreadId>,
}

impl Scheduler for FcfsScheduler {
    fn enqueue(&mut self, thread: ThreadId, _process_type: ProcessType) {
        self.threads.push_back(thread);
    }

    fn next(&mut self) -> Option<SchedulingDecision> {
        let n = self.threads.len();
        let thread = self.threads.pop_front()?;
        Some(SchedulingDecision {
            thread,
            time_slice: None,
            explanation: format!(
                "Selected from {n} threads; will run to completion of burst"
            ),
        })
    }

    fn size(&self) -> usize {
        self.threads.len()
    }
}
