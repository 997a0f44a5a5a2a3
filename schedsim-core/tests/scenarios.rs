//! Whole-workload scenario tests exercising the engine end to end, covering
//! cross-cutting contracts that don't fit a single module's unit tests.

use std::collections::VecDeque;

use schedsim_core::{
    Burst, DispatchOverheads, Engine, Event, EventKind, NullTraceSink, Process, ProcessType,
    SchedulerKind, Thread, ThreadId, ThreadState, TraceSink,
};

fn single_thread_workload(process_type: ProcessType, burst_len: u64) -> (Vec<Process>, Vec<Event>) {
    let mut process = Process::new(0, process_type);
    process.threads.push(Thread::new(
        ThreadId(0),
        0,
        process_type,
        0,
        VecDeque::from([Burst::cpu(burst_len)]),
    ));
    let events = vec![Event::with_thread(EventKind::ThreadArrived, 0, ThreadId(0))];
    (vec![process], events)
}

#[derive(Default)]
struct LevelTrackingSink {
    explanations: Vec<String>,
}

impl TraceSink for LevelTrackingSink {
    fn on_state_transition(
        &mut self,
        _event_kind: EventKind,
        _time: u64,
        _thread: ThreadId,
        _from: ThreadState,
        _to: ThreadState,
    ) {
    }

    fn on_dispatch(&mut self, _time: u64, _thread: ThreadId, explanation: &str) {
        self.explanations.push(explanation.to_string());
    }

    fn on_complete(&mut self, _processes: &[Process], _stats: &schedsim_core::SystemStats) {}
}

/// S6 — MLFQ demotion: one type-0 thread with a single 10-tick CPU burst
/// under quantum 3 demotes 0 -> 1 -> 2 -> 3 across its four dispatches.
#[test]
fn scenario_s6_mlfq_demotion_sequence() {
    let (processes, events) = single_thread_workload(ProcessType::System, 10);
    let overheads = DispatchOverheads { thread_switch: 0, process_switch: 0 };
    let engine = Engine::new(processes, events, SchedulerKind::mlfq(3), overheads);

    let mut sink = LevelTrackingSink::default();
    let stats = engine.run(&mut sink).unwrap();

    assert_eq!(stats.total_time, 10);
    let levels: Vec<&str> = sink
        .explanations
        .iter()
        .map(|e| {
            let start = e.find("level ").unwrap() + "level ".len();
            let end = e[start..].find(';').unwrap() + start;
            &e[start..end]
        })
        .collect();
    assert_eq!(levels, vec!["1/8", "2/8", "3/8", "4/8"]);
}

/// Running the same workload twice yields byte-identical statistics — the
/// engine has no hidden nondeterminism (wall-clock, hashing order, etc.).
#[test]
fn running_the_same_workload_twice_is_idempotent() {
    let build = || {
        let mut p0 = Process::new(0, ProcessType::Normal);
        p0.threads.push(Thread::new(ThreadId(0), 0, ProcessType::Normal, 0, VecDeque::from([Burst::cpu(7)])));
        let mut p1 = Process::new(1, ProcessType::Batch);
        p1.threads.push(Thread::new(ThreadId(1), 1, ProcessType::Batch, 2, VecDeque::from([Burst::cpu(4), Burst::io(2), Burst::cpu(3)])));
        let events = vec![
            Event::with_thread(EventKind::ThreadArrived, 0, ThreadId(0)),
            Event::with_thread(EventKind::ThreadArrived, 2, ThreadId(1)),
        ];
        let overheads = DispatchOverheads { thread_switch: 1, process_switch: 2 };
        Engine::new(vec![p0, p1], events, SchedulerKind::round_robin(3), overheads)
    };

    let mut sink_a = NullTraceSink;
    let mut sink_b = NullTraceSink;
    let stats_a = build().run(&mut sink_a).unwrap();
    let stats_b = build().run(&mut sink_b).unwrap();

    assert_eq!(stats_a.total_time, stats_b.total_time);
    assert_eq!(stats_a.service_time, stats_b.service_time);
    assert_eq!(stats_a.dispatch_time, stats_b.dispatch_time);
    assert_eq!(stats_a.io_time, stats_b.io_time);
    assert_eq!(stats_a.cpu_utilization, stats_b.cpu_utilization);
}

/// Universal invariant: total_cpu_time + total_idle_time == total_time.
#[test]
fn cpu_and_idle_time_partition_total_time() {
    let (processes, events) = single_thread_workload(ProcessType::Interactive, 6);
    let overheads = DispatchOverheads { thread_switch: 2, process_switch: 4 };
    let engine = Engine::new(processes, events, SchedulerKind::fcfs(), overheads);

    let mut sink = NullTraceSink;
    let stats = engine.run(&mut sink).unwrap();
    assert_eq!(stats.total_cpu_time + stats.total_idle_time, stats.total_time);
    assert!(stats.cpu_utilization >= stats.cpu_efficiency);
}
