//! A min-priority queue over events keyed by time, with a stable
//! insertion-order tie-break so scenarios with simultaneous events are
//! reproducible.

use crate::event::Event;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry {
    event: Event,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.event.time == other.event.time && self.seq == other.seq
    }
}
impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys so the earliest time
        // (and, within a tie, the earliest insertion) sorts to the top.
        other
            .event
            .time
            .cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Time-ordered event queue. Takes ownership of events on [`push`] and
/// returns ownership on [`pop`].
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { event, seq });
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|entry| entry.event)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(Event::new(EventKind::ThreadArrived, 5));
        q.push(Event::new(EventKind::ThreadArrived, 1));
        q.push(Event::new(EventKind::ThreadArrived, 3));

        let times: Vec<u64> = std::iter::from_fn(|| q.pop()).map(|e| e.time).collect();
        assert_eq!(times, vec![1, 3, 5]);
    }

    #[test]
    fn ties_broken_by_insertion_order() {
        let mut q = EventQueue::new();
        q.push(Event::new(EventKind::DispatcherInvoked, 5));
        q.push(Event::new(EventKind::ThreadCompleted, 5));

        let kinds: Vec<EventKind> = std::iter::from_fn(|| q.pop()).map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::DispatcherInvoked, EventKind::ThreadCompleted]);
    }

    #[test]
    fn empty_queue_pops_none() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        assert!(q.pop().is_none());
    }
}
