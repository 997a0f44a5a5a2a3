//! Trace sinks: the human-readable verbose trace and a JSON report for
//! scripting, both implementing `schedsim_core::TraceSink` so the engine
//! never depends on either directly.

use schedsim_core::{EventKind, Process, SystemStats, ThreadId, ThreadState, TraceSink};
use serde::Serialize;

/// Prints every state transition and dispatch decision as it happens (when
/// `verbose`), then always prints the per-process thread table and final
/// statistics. The transition trace is opt-in so default runs stay quiet
/// while the report tail is unconditional.
pub struct TextTraceSink {
    pub verbose: bool,
}

impl TraceSink for TextTraceSink {
    fn on_state_transition(
        &mut self,
        event_kind: EventKind,
        time: u64,
        thread: ThreadId,
        from: ThreadState,
        to: ThreadState,
    ) {
        if self.verbose {
            println!("{time:>6}  {event_kind:?}: thread {thread} {from:?} -> {to:?}");
        }
    }

    fn on_dispatch(&mut self, time: u64, thread: ThreadId, explanation: &str) {
        if self.verbose {
            println!("{time:>6}  DispatcherInvoked: thread {thread} — {explanation}");
        }
    }

    fn on_complete(&mut self, processes: &[Process], stats: &SystemStats) {
        for process in processes {
            println!();
            println!("Process {} ({})", process.pid, process.process_type.label());
            println!("{:<8}{:<8}{:<8}{:<10}{:<10}{:<10}", "thread", "arr", "start", "end", "service", "io");
            for thread in &process.threads {
                println!(
                    "{:<8}{:<8}{:<8}{:<10}{:<10}{:<10}",
                    thread.id,
                    thread.arrival_time,
                    display_opt(thread.start_time),
                    display_opt(thread.end_time),
                    thread.service_time,
                    thread.io_time,
                );
            }
        }

        println!();
        print_stats(stats);
    }
}

fn display_opt(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_stats(stats: &SystemStats) {
    println!("System statistics");
    println!("=================");
    println!("Total time:        {}", stats.total_time);
    println!("Dispatch time:     {}", stats.dispatch_time);
    println!("Service time:      {}", stats.service_time);
    println!("I/O time:          {}", stats.io_time);
    println!("Total CPU time:    {}", stats.total_cpu_time);
    println!("Total idle time:   {}", stats.total_idle_time);
    println!("CPU utilization:   {:.2}%", stats.cpu_utilization);
    println!("CPU efficiency:    {:.2}%", stats.cpu_efficiency);
    println!();
    println!(
        "{:<14}{:<10}{:<16}{:<16}",
        "type", "threads", "avg response", "avg turnaround"
    );
    for (index, label) in ["SYSTEM", "INTERACTIVE", "NORMAL", "BATCH"].iter().enumerate() {
        println!(
            "{:<14}{:<10}{:<16.2}{:<16.2}",
            label,
            stats.thread_counts[index],
            stats.avg_thread_response_times[index],
            stats.avg_thread_turnaround_times[index],
        );
    }
}

/// Discards the trace as it happens and buffers the final process/thread
/// details and statistics for a single JSON emission at the end
/// (`--format json`).
#[derive(Default)]
pub struct JsonReportSink {
    report: Option<Report>,
}

#[derive(Serialize)]
struct Report {
    processes: Vec<ProcessReport>,
    stats: SystemStats,
}

#[derive(Serialize)]
struct ProcessReport {
    pid: u32,
    process_type: &'static str,
    threads: Vec<ThreadReport>,
}

#[derive(Serialize)]
struct ThreadReport {
    id: u32,
    arrival_time: u64,
    start_time: Option<u64>,
    end_time: Option<u64>,
    service_time: u64,
    io_time: u64,
    response_time: Option<u64>,
    turnaround_time: Option<u64>,
}

impl JsonReportSink {
    pub fn into_json(self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report)
    }
}

impl TraceSink for JsonReportSink {
    fn on_state_transition(
        &mut self,
        _event_kind: EventKind,
        _time: u64,
        _thread: ThreadId,
        _from: ThreadState,
        _to: ThreadState,
    ) {
    }

    fn on_dispatch(&mut self, _time: u64, _thread: ThreadId, _explanation: &str) {}

    fn on_complete(&mut self, processes: &[Process], stats: &SystemStats) {
        let processes = processes
            .iter()
            .map(|p| ProcessReport {
                pid: p.pid,
                process_type: p.process_type.label(),
                threads: p
                    .threads
                    .iter()
                    .map(|t| ThreadReport {
                        id: t.id.0,
                        arrival_time: t.arrival_time,
                        start_time: t.start_time,
                        end_time: t.end_time,
                        service_time: t.service_time,
                        io_time: t.io_time,
                        response_time: t.response_time(),
                        turnaround_time: t.turnaround_time(),
                    })
                    .collect(),
            })
            .collect();

        self.report = Some(Report { processes, stats: stats.clone() });
    }
}
