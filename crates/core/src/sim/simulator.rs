//! Simulator: owns the process table, memory pool, scheduler and CPU side by side.
//!
//! Each component receives the others it needs as explicit borrows, so the
//! orchestrator is the only place where the whole machine is visible and every
//! mutation happens under one `&mut self`.

use tracing::{debug, trace};

use super::snapshot::{CpuView, FinishedView, Snapshot};
use crate::common::{ConfigError, Megabytes, Pid, SchedulerError, SimError, Ticks};
use crate::config::Config;
use crate::core::{Cpu, MemoryPool, Process, ProcessTable};
use crate::sched::{FifoScheduler, Placement};
use crate::stats::SimStats;

/// What one call to [`Simulator::advance_tick`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number just completed.
    pub tick: Ticks,
    /// Process that finished on the CPU this tick.
    pub finished: Option<Pid>,
    /// Processes promoted from the wait queue, in admission order.
    pub promoted: Vec<Pid>,
    /// Process placed on the CPU at the end of the tick.
    pub dispatched: Option<Pid>,
}

/// Top-level simulator.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: Config,
    tick: Ticks,
    table: ProcessTable,
    memory: MemoryPool,
    scheduler: FifoScheduler,
    cpu: Cpu,
    finished: Vec<Pid>,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator from a validated configuration.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tick: 0,
            table: ProcessTable::new(),
            memory: MemoryPool::new(config.capacity_mb),
            scheduler: FifoScheduler::new(config.admission),
            cpu: Cpu::new(),
            finished: Vec::new(),
            stats: SimStats::default(),
            config,
        })
    }

    /// Creates a simulator with default settings and the given capacity.
    pub fn with_capacity(capacity_mb: Megabytes) -> Result<Self, ConfigError> {
        Self::new(Config::with_capacity(capacity_mb))
    }

    /// Discards all state and starts over with the same configuration.
    pub fn reset(&mut self) {
        debug!(capacity_mb = self.config.capacity_mb, "simulator reset");
        *self = Self {
            tick: 0,
            table: ProcessTable::new(),
            memory: MemoryPool::new(self.config.capacity_mb),
            scheduler: FifoScheduler::new(self.config.admission),
            cpu: Cpu::new(),
            finished: Vec::new(),
            stats: SimStats::default(),
            config: self.config.clone(),
        };
    }

    /// Submits a new process and returns its pid.
    ///
    /// A blank name is replaced with `Process N`, where `N` is one more than
    /// the number of finished processes.
    ///
    /// # Errors
    ///
    /// A validation error if `memory_mb` or `duration` is not positive; the
    /// simulator is left unchanged apart from the rejection counter. Lack of
    /// memory is never an error: the process waits instead.
    pub fn submit(&mut self, name: &str, memory_mb: i64, duration: i64) -> Result<Pid, SimError> {
        let name = if name.trim().is_empty() {
            format!("Process {}", self.finished.len() + 1)
        } else {
            name.to_string()
        };
        let pid = match self.table.spawn(name, memory_mb, duration, self.tick) {
            Ok(pid) => pid,
            Err(e) => {
                self.stats.rejected += 1;
                debug!(error = %e, "submission rejected");
                return Err(e.into());
            }
        };
        let placement = self
            .scheduler
            .submit(pid, &mut self.table, &mut self.memory, self.tick)?;
        self.stats.submitted += 1;
        match placement {
            Placement::Ready => self.stats.admitted_on_submit += 1,
            Placement::Waiting => self.stats.deferred += 1,
        }
        self.stats.peak_memory_mb = self.memory.peak();
        Ok(pid)
    }

    /// Advances simulated time by one tick.
    ///
    /// The order is fixed: the CPU ticks (releasing memory if its process
    /// finishes), the wait queue is re-scanned, then an idle CPU takes the ready
    /// head. A process dispatched here first counts down on the next call.
    ///
    /// # Errors
    ///
    /// Only on a broken internal invariant; correct operation never fails.
    pub fn advance_tick(&mut self) -> Result<TickReport, SimError> {
        self.tick += 1;
        let now = self.tick;
        trace!(tick = now, "advance");

        let finished = self.cpu.tick(&mut self.table, &mut self.memory, now)?;
        if let Some(pid) = finished {
            self.finished.push(pid);
            let process = self.table.get(pid).ok_or(SchedulerError::UnknownPid(pid))?;
            self.stats.record_completion(process);
        }

        let promoted = self
            .scheduler
            .promote(&mut self.table, &mut self.memory, now)?;
        self.stats.promotions += promoted.len() as u64;

        let dispatched = self.scheduler.dispatch(&self.cpu);
        if let Some(pid) = dispatched {
            self.cpu.assign(pid, &mut self.table, now)?;
            self.stats.dispatches += 1;
        }

        self.stats.ticks = now;
        self.stats.busy_ticks = self.cpu.busy_ticks();
        self.stats.idle_ticks = now - self.stats.busy_ticks;
        self.stats.peak_memory_mb = self.memory.peak();

        Ok(TickReport {
            tick: now,
            finished,
            promoted,
            dispatched,
        })
    }

    /// Advances until nothing is left to run or `max_ticks` have elapsed.
    ///
    /// Returns the number of ticks advanced. A process larger than the whole
    /// pool never drains, which is what `max_ticks` guards against.
    pub fn run_until_drained(&mut self, max_ticks: Ticks) -> Result<Ticks, SimError> {
        let mut advanced = 0;
        while !self.is_drained() && advanced < max_ticks {
            let _ = self.advance_tick()?;
            advanced += 1;
        }
        Ok(advanced)
    }

    /// Returns `true` when both queues are empty and the CPU is idle.
    pub fn is_drained(&self) -> bool {
        self.scheduler.is_empty() && self.cpu.is_idle()
    }

    /// Builds a consistent view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let tail_start = self.finished.len().saturating_sub(self.config.history_tail);
        Snapshot {
            tick: self.tick,
            ram: self.memory.snapshot(),
            ready: self.scheduler.ready().iter().copied().collect(),
            waiting: self.scheduler.waiting().iter().copied().collect(),
            cpu: self
                .cpu
                .current()
                .and_then(|pid| self.table.get(pid))
                .map(CpuView::from),
            finished: self.finished[tail_start..]
                .iter()
                .filter_map(|&pid| self.table.get(pid))
                .map(FinishedView::from)
                .collect(),
        }
    }

    /// Looks up any process ever submitted.
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.table.get(pid)
    }

    /// Full finished history in completion order.
    pub fn finished(&self) -> &[Pid] {
        &self.finished
    }

    /// Ticks advanced so far.
    pub const fn tick(&self) -> Ticks {
        self.tick
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Collected statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Memory pool, read-only.
    pub const fn memory(&self) -> &MemoryPool {
        &self.memory
    }

    /// Scheduler queues, read-only.
    pub const fn scheduler(&self) -> &FifoScheduler {
        &self.scheduler
    }

    /// CPU slot, read-only.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Process table, read-only.
    pub const fn table(&self) -> &ProcessTable {
        &self.table
    }
}
