//! Simulation statistics collection and reporting.
//!
//! This module tracks scheduling metrics for one simulator instance. It provides:
//! 1. **Time:** Ticks elapsed, split into busy and idle CPU ticks.
//! 2. **Admission:** Submissions, rejections, immediate admissions, deferrals and promotions.
//! 3. **Completion:** Finished count with accumulated turnaround and waiting time.
//! 4. **Memory:** Peak reservation observed.

use serde::Serialize;

use crate::common::{Megabytes, Ticks};
use crate::core::Process;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Ticks advanced so far.
    pub ticks: Ticks,
    /// Ticks in which a process was on the CPU at the start of the tick.
    pub busy_ticks: Ticks,
    /// Ticks in which the CPU had nothing to run at the start of the tick.
    pub idle_ticks: Ticks,

    /// Well-formed process requests accepted.
    pub submitted: u64,
    /// Requests refused by validation.
    pub rejected: u64,
    /// Submissions that reserved memory immediately.
    pub admitted_on_submit: u64,
    /// Submissions parked in the wait queue.
    pub deferred: u64,
    /// Processes moved from the wait queue to the ready queue.
    pub promotions: u64,
    /// Processes dispatched to the CPU.
    pub dispatches: u64,
    /// Processes that ran to completion.
    pub completed: u64,

    /// Sum of turnaround times over completed processes.
    pub total_turnaround: Ticks,
    /// Sum of submission-to-dispatch times over completed processes.
    pub total_waiting: Ticks,

    /// Highest memory reservation observed, in MB.
    pub peak_memory_mb: Megabytes,
}

impl SimStats {
    /// Folds a finished process into the completion counters.
    pub fn record_completion(&mut self, process: &Process) {
        self.completed += 1;
        self.total_turnaround += process.turnaround().unwrap_or(0);
        self.total_waiting += process.waiting_time().unwrap_or(0);
    }

    /// Fraction of ticks the CPU spent running a process, in `[0, 1]`.
    pub fn cpu_utilization(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.busy_ticks as f64 / self.ticks as f64
    }

    /// Mean submission-to-completion time, or `None` before any completion.
    pub fn mean_turnaround(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.total_turnaround as f64 / self.completed as f64)
    }

    /// Mean submission-to-dispatch time, or `None` before any completion.
    pub fn mean_waiting(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.total_waiting as f64 / self.completed as f64)
    }

    /// Writes the report to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }

    /// Formats the report as printed by [`SimStats::print`].
    pub fn report(&self) -> String {
        use std::fmt::Write;

        let fmt_mean = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"));
        let mut out = String::new();
        let _ = writeln!(out, "\n==========================================================");
        let _ = writeln!(out, "SCHEDULING SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "sim_ticks                {}", self.ticks);
        let _ = writeln!(out, "cpu_busy_ticks           {}", self.busy_ticks);
        let _ = writeln!(out, "cpu_idle_ticks           {}", self.idle_ticks);
        let _ = writeln!(
            out,
            "cpu_utilization          {:.2}%",
            self.cpu_utilization() * 100.0
        );
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "ADMISSION");
        let _ = writeln!(out, "  submitted              {}", self.submitted);
        let _ = writeln!(out, "  rejected               {}", self.rejected);
        let _ = writeln!(out, "  admitted_on_submit     {}", self.admitted_on_submit);
        let _ = writeln!(out, "  deferred               {}", self.deferred);
        let _ = writeln!(out, "  promotions             {}", self.promotions);
        let _ = writeln!(out, "  dispatches             {}", self.dispatches);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "COMPLETION");
        let _ = writeln!(out, "  completed              {}", self.completed);
        let _ = writeln!(
            out,
            "  mean_turnaround        {}",
            fmt_mean(self.mean_turnaround())
        );
        let _ = writeln!(out, "  mean_waiting           {}", fmt_mean(self.mean_waiting()));
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "MEMORY");
        let _ = writeln!(out, "  peak_used_mb           {}", self.peak_memory_mb);
        let _ = writeln!(out, "==========================================================");
        out
    }
}
