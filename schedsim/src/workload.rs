//! The workload reader: parses the whitespace-separated integer format into
//! the initial process/thread/burst graph plus one `THREAD_ARRIVED` event
//! per thread.

use std::collections::VecDeque;

use schedsim_core::{Burst, Event, EventKind, Process, ProcessType, Thread, ThreadId};
use thiserror::Error;

/// Failures while parsing a workload file. Distinct from [`schedsim_core::SimError`]:
/// this is an input problem, not a simulator bug, and the core never runs.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("could not open workload file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected end of input while reading {expected}")]
    Truncated { expected: &'static str },

    #[error("expected an integer for {field}, found {found:?}")]
    NotAnInteger { field: &'static str, found: String },

    #[error("process type must be 0-3 (SYSTEM/INTERACTIVE/NORMAL/BATCH), found {0}")]
    UnknownProcessType(u32),

    #[error("process {0} appears more than once in the workload")]
    DuplicatePid(u32),

    #[error("thread {thread} in process {pid} has {count} CPU bursts; at least 1 is required")]
    NoCpuBursts { pid: u32, thread: usize, count: u32 },
}

/// The parsed workload: the process/thread graph plus the initial
/// `THREAD_ARRIVED` events, ready to hand to [`schedsim_core::Engine::new`].
pub struct Workload {
    pub processes: Vec<Process>,
    pub initial_events: Vec<Event>,
    pub thread_switch_overhead: u64,
    pub process_switch_overhead: u64,
}

impl Workload {
    pub fn read_from_path(path: &std::path::Path) -> Result<Self, WorkloadError> {
        let text = std::fs::read_to_string(path).map_err(|source| WorkloadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, WorkloadError> {
        let mut tokens = text.split_ascii_whitespace();

        let num_processes = next_u32(&mut tokens, "process count")?;
        let thread_switch_overhead = next_u64(&mut tokens, "thread switch overhead")?;
        let process_switch_overhead = next_u64(&mut tokens, "process switch overhead")?;

        let mut processes = Vec::with_capacity(num_processes as usize);
        let mut initial_events = Vec::new();
        let mut next_thread_id = 0u32;
        let mut seen_pids = std::collections::HashSet::new();

        for _ in 0..num_processes {
            let pid = next_u32(&mut tokens, "process id")?;
            if !seen_pids.insert(pid) {
                return Err(WorkloadError::DuplicatePid(pid));
            }
            let raw_type = next_u32(&mut tokens, "process type")?;
            let process_type = if raw_type < ProcessType::COUNT as u32 {
                ProcessType::from_u8(raw_type as u8).expect("checked above")
            } else {
                return Err(WorkloadError::UnknownProcessType(raw_type));
            };
            let num_threads = next_u32(&mut tokens, "thread count")?;

            let mut process = Process::new(pid, process_type);

            for thread_index in 0..num_threads {
                let arrival_time = next_u64(&mut tokens, "thread arrival time")?;
                let num_cpu_bursts = next_u32(&mut tokens, "CPU burst count")?;
                if num_cpu_bursts == 0 {
                    return Err(WorkloadError::NoCpuBursts {
                        pid,
                        thread: thread_index as usize,
                        count: num_cpu_bursts,
                    });
                }

                let num_lengths = 2 * num_cpu_bursts - 1;
                let mut bursts = VecDeque::with_capacity(num_lengths as usize);
                for i in 0..num_lengths {
                    let length = next_u64(&mut tokens, "burst length")?;
                    bursts.push_back(if i % 2 == 0 { Burst::cpu(length) } else { Burst::io(length) });
                }

                let thread_id = ThreadId(next_thread_id);
                next_thread_id += 1;
                initial_events.push(Event::with_thread(
                    EventKind::ThreadArrived,
                    arrival_time,
                    thread_id,
                ));
                process.threads.push(Thread::new(thread_id, pid, process_type, arrival_time, bursts));
            }

            processes.push(process);
        }

        Ok(Self { processes, initial_events, thread_switch_overhead, process_switch_overhead })
    }
}

fn next_u32<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &'static str) -> Result<u32, WorkloadError> {
    let raw = tokens.next().ok_or(WorkloadError::Truncated { expected: field })?;
    raw.parse::<u32>().map_err(|_| WorkloadError::NotAnInteger { field, found: raw.to_string() })
}

fn next_u64<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &'static str) -> Result<u64, WorkloadError> {
    let raw = tokens.next().ok_or(WorkloadError::Truncated { expected: field })?;
    raw.parse::<u64>().map_err(|_| WorkloadError::NotAnInteger { field, found: raw.to_string() })
}
