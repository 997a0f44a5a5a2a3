//! schedsim - discrete-event CPU scheduling simulator CLI.
//!
//! Reads a workload file, runs it through the simulation engine under a
//! chosen scheduling policy, and prints the resulting per-thread timings
//! and system statistics.

mod report;
mod workload;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use schedsim_core::{DispatchOverheads, Engine, SchedulerKind};
use tracing::error;

use report::{JsonReportSink, TextTraceSink};
use workload::Workload;

/// CPU scheduling simulator: advances a virtual clock over a workload of
/// processes and reports per-thread timing and system utilization.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version, about)]
struct Args {
    /// Workload file to simulate.
    workload: PathBuf,

    /// Scheduling policy.
    #[arg(short, long, value_enum, default_value_t = Policy::Fcfs)]
    policy: Policy,

    /// Time slice (ticks) for round-robin and multilevel feedback.
    #[arg(long, default_value_t = schedsim_core::policy::DEFAULT_QUANTUM)]
    quantum: u64,

    /// Print every state transition and dispatch decision as it happens.
    #[arg(short, long)]
    verbose: bool,

    /// Output format for the final report.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Fcfs,
    Rr,
    Priority,
    Mlfq,
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fcfs => write!(f, "fcfs"),
            Self::Rr => write!(f, "rr"),
            Self::Priority => write!(f, "priority"),
            Self::Mlfq => write!(f, "mlfq"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.chain().any(|cause| cause.downcast_ref::<workload::WorkloadError>().is_some()) {
                eprintln!("error: {err:#}");
                ExitCode::from(1)
            } else if err.chain().any(|cause| cause.downcast_ref::<schedsim_core::SimError>().is_some()) {
                error!("invariant violation: {err:#}");
                eprintln!("error: {err:#}");
                ExitCode::from(2)
            } else {
                eprintln!("error: {err:#}");
                ExitCode::from(1)
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    let workload = Workload::read_from_path(&args.workload).context("failed to read workload")?;

    let scheduler = match args.policy {
        Policy::Fcfs => SchedulerKind::fcfs(),
        Policy::Rr => SchedulerKind::round_robin(args.quantum),
        Policy::Priority => SchedulerKind::priority(),
        Policy::Mlfq => SchedulerKind::mlfq(args.quantum),
    };

    let overheads = DispatchOverheads {
        thread_switch: workload.thread_switch_overhead,
        process_switch: workload.process_switch_overhead,
    };

    let engine = Engine::new(workload.processes, workload.initial_events, scheduler, overheads);

    match args.format {
        Format::Json => {
            let mut sink = JsonReportSink::default();
            engine.run(&mut sink).context("simulation failed")?;
            let json = sink.into_json().context("failed to serialize report")?;
            println!("{json}");
        }
        Format::Text => {
            let mut sink = TextTraceSink { verbose: args.verbose };
            engine.run(&mut sink).context("simulation failed")?;
        }
    }

    Ok(())
}
