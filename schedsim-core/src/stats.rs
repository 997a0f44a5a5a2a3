//! The statistics aggregator: per-thread timing rolled up into per-type
//! averages and system-wide CPU utilization/efficiency.

use crate::entities::{Process, ProcessType};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Final statistics for a completed simulation run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SystemStats {
    pub total_time: u64,
    pub dispatch_time: u64,
    pub service_time: u64,
    pub io_time: u64,
    pub total_cpu_time: u64,
    pub total_idle_time: u64,
    pub cpu_utilization: f64,
    pub cpu_efficiency: f64,
    pub thread_counts: [u64; ProcessType::COUNT],
    pub avg_thread_response_times: [f64; ProcessType::COUNT],
    pub avg_thread_turnaround_times: [f64; ProcessType::COUNT],
}

impl SystemStats {
    /// Finalize the running scalars accrued by the engine against the final
    /// process/thread graph. Consumes no further engine state; safe to call
    /// once, after the event queue has drained.
    pub fn finalize(mut self, processes: &[Process]) -> Self {
        self.total_cpu_time = self.service_time + self.dispatch_time;
        self.total_idle_time = self.total_time.saturating_sub(self.total_cpu_time);

        self.cpu_utilization = percent(self.total_cpu_time, self.total_time);
        self.cpu_efficiency = percent(self.service_time, self.total_time);

        let mut response_sum = [0u64; ProcessType::COUNT];
        let mut turnaround_sum = [0u64; ProcessType::COUNT];

        for process in processes {
            let idx = process.process_type.index();
            self.thread_counts[idx] += process.threads.len() as u64;
            for thread in &process.threads {
                if let Some(r) = thread.response_time() {
                    response_sum[idx] += r;
                }
                if let Some(t) = thread.turnaround_time() {
                    turnaround_sum[idx] += t;
                }
            }
        }

        for idx in 0..ProcessType::COUNT {
            let count = self.thread_counts[idx];
            self.avg_thread_response_times[idx] = average(response_sum[idx], count);
            self.avg_thread_turnaround_times[idx] = average(turnaround_sum[idx], count);
        }

        self
    }
}

fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

fn average(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Burst, Thread, ThreadId, ThreadState};
    use std::collections::VecDeque;

    fn exited_thread(id: u32, arrival: u64, start: u64, end: u64) -> Thread {
        let mut t = Thread::new(ThreadId(id), 0, ProcessType::Normal, arrival, VecDeque::new());
        t.transition(ThreadState::Ready, arrival).unwrap();
        t.transition(ThreadState::Running, start).unwrap();
        t.transition(ThreadState::Exit, end).unwrap();
        t
    }

    #[test]
    fn division_by_zero_yields_zero_not_nan() {
        let stats = SystemStats::default().finalize(&[]);
        assert_eq!(stats.cpu_utilization, 0.0);
        assert_eq!(stats.avg_thread_response_times[ProcessType::Normal.index()], 0.0);
    }

    #[test]
    fn averages_per_process_type() {
        let mut p = Process::new(0, ProcessType::Normal);
        p.threads.push(exited_thread(0, 0, 2, 12));
        p.threads.push(exited_thread(1, 1, 8, 13));

        let stats = SystemStats { total_time: 13, ..Default::default() }.finalize(&[p]);
        let idx = ProcessType::Normal.index();
        assert_eq!(stats.thread_counts[idx], 2);
        // response times: 2-0=2, 8-1=7 -> avg 4.5
        assert_eq!(stats.avg_thread_response_times[idx], 4.5);
        // turnaround: 12-0=12, 13-1=12 -> avg 12
        assert_eq!(stats.avg_thread_turnaround_times[idx], 12.0);
    }

    #[test]
    fn utilization_and_efficiency() {
        let stats = SystemStats {
            total_time: 12,
            service_time: 10,
            dispatch_time: 2,
            ..Default::default()
        }
        .finalize(&[]);
        assert_eq!(stats.total_cpu_time, 12);
        assert_eq!(stats.total_idle_time, 0);
        assert_eq!(stats.cpu_utilization, 100.0);
        assert!((stats.cpu_efficiency - 83.333_333).abs() < 1e-3);
    }

    #[test]
    fn utilization_is_never_below_efficiency() {
        let stats = SystemStats {
            total_time: 20,
            service_time: 8,
            dispatch_time: 3,
            ..Default::default()
        }
        .finalize(&[]);
        assert!(stats.cpu_utilization >= stats.cpu_efficiency);
    }
}
