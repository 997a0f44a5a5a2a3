//! Round-robin: FCFS with a fixed time slice.

use super::{FcfsScheduler, Scheduler};
use crate::entities::{ProcessType, ThreadId};
use crate::event::SchedulingDecision;

pub struct RoundRobinScheduler {
    time_slice: u64,
    inner: FcfsScheduler,
}

impl RoundRobinScheduler {
    pub fn new(time_slice: u64) -> Self {
        Self { time_slice, inner: FcfsScheduler::default() }
    }

    pub fn time_slice(&self) -> u64 {
        self.time_slice
    }
}

impl Scheduler for RoundRobinScheduler {
    fn enqueue(&mut self, thread: ThreadId, process_type: ProcessType) {
        self.inner.enqueue(thread, process_type);
    }

    fn next(&mut self) -> Option<SchedulingDecision> {
        let n = self.size();
        let mut decision = self.inner.next()?;
        decision.time_slice = Some(self.time_slice);
        decision.explanation = format!(
            "Selected from {n} threads; will run for at most {} ticks",
            self.time_slice
        );
        Some(decision)
    }

    fn size(&self) -> usize {
        self.inner.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_is_attached() {
        let mut s = RoundRobinScheduler::new(3);
        s.enqueue(ThreadId(0), ProcessType::Normal);
        let d = s.next().unwrap();
        assert_eq!(d.time_slice, Some(3));
        assert!(d.explanation.contains("at most 3 ticks"));
    }

    #[test]
    fn empty_yields_none() {
        let mut s = RoundRobinScheduler::new(3);
        assert!(s.next().is_none());
    }
}
