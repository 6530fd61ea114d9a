//! Single CPU unit.
//!
//! The CPU holds at most one process and runs it to completion; there is no
//! preemption. It owns the `RUNNING` and `FINISHED` transitions and returns a
//! finished process's memory to the pool in the same tick it completes.

use tracing::debug;

use crate::common::{CpuError, Pid, SchedulerError, SimError, Ticks};

use super::memory::MemoryPool;
use super::table::ProcessTable;

/// CPU slot.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    current: Option<Pid>,
    busy_ticks: Ticks,
}

impl Cpu {
    /// Creates an idle CPU.
    pub const fn new() -> Self {
        Self {
            current: None,
            busy_ticks: 0,
        }
    }

    /// Returns `true` when no process is on the CPU.
    pub const fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Pid of the running process, if any.
    pub const fn current(&self) -> Option<Pid> {
        self.current
    }

    /// Ticks during which a process was decremented.
    pub const fn busy_ticks(&self) -> Ticks {
        self.busy_ticks
    }

    /// Places `pid` on the CPU and marks it `RUNNING`.
    ///
    /// # Errors
    ///
    /// [`CpuError::Occupied`] if another process is still running, or
    /// [`SchedulerError::UnknownPid`] if the table has no such process.
    pub fn assign(&mut self, pid: Pid, table: &mut ProcessTable, now: Ticks) -> Result<(), SimError> {
        if let Some(running) = self.current {
            return Err(CpuError::Occupied {
                running,
                incoming: pid,
            }
            .into());
        }
        let process = table.get_mut(pid).ok_or(SchedulerError::UnknownPid(pid))?;
        process.mark_running(now);
        self.current = Some(pid);
        debug!(%pid, name = process.name(), remaining = process.remaining(), "dispatched");
        Ok(())
    }

    /// Advances the running process by one tick.
    ///
    /// Does nothing when idle. When the process completes, its memory is
    /// released, the slot is cleared and its pid is returned.
    pub fn tick(
        &mut self,
        table: &mut ProcessTable,
        memory: &mut MemoryPool,
        now: Ticks,
    ) -> Result<Option<Pid>, SimError> {
        let Some(pid) = self.current else {
            return Ok(None);
        };
        let process = table.get_mut(pid).ok_or(SchedulerError::UnknownPid(pid))?;
        self.busy_ticks += 1;
        if !process.tick(now)? {
            return Ok(None);
        }
        memory.release(process.memory_mb())?;
        self.current = None;
        debug!(%pid, name = process.name(), "finished");
        Ok(Some(pid))
    }
}
