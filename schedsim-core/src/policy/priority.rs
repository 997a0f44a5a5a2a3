//! Static priority: one FCFS queue per process type, scanned low-index-first.

use super::{FcfsScheduler, Scheduler};
use crate::entities::{ProcessType, ThreadId};
use crate::event::SchedulingDecision;

pub struct PriorityScheduler {
    queues: [FcfsScheduler; ProcessType::COUNT],
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self { queues: Default::default() }
    }
}

impl Scheduler for PriorityScheduler {
    fn enqueue(&mut self, thread: ThreadId, process_type: ProcessType) {
        self.queues[process_type.index()].enqueue(thread, process_type);
    }

    fn next(&mut self) -> Option<SchedulingDecision> {
        for i in 0..ProcessType::COUNT {
            if !self.queues[i].is_empty() {
                let mut decision = self.queues[i].next()?;
                decision.explanation = format!(
                    "Selected from queue {i} [S:{} I:{} N:{} B:{}]",
                    self.queues[0].size(),
                    self.queues[1].size(),
                    self.queues[2].size(),
                    self.queues[3].size(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priority_runs_first_despite_later_enqueue() {
        let mut s = PriorityScheduler::default();
        s.enqueue(ThreadId(0), ProcessType::Normal);
        s.enqueue(ThreadId(1), ProcessType::System);

        let d = s.next().unwrap();
        assert_eq!(d.thread, ThreadId(1));
        assert!(d.explanation.starts_with("Selected from queue 0"));
    }

    #[test]
    fn ties_within_a_type_are_fifo() {
        let mut s = PriorityScheduler::default();
        s.enqueue(ThreadId(0), ProcessType::Batch);
        s.enqueue(ThreadId(1), ProcessType::Batch);

        assert_eq!(s.next().unwrap().thread, ThreadId(0));
        assert_eq!(s.next().unwrap().thread, ThreadId(1));
    }

    #[test]
    fn empty_yields_none() {
        let mut s = PriorityScheduler::default();
        assert!(s.next().is_none());
    }
}
