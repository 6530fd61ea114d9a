//! Process table.
//!
//! Every process record lives here exactly once, indexed by pid. Queues, the
//! CPU slot and the finished history only hold [`Pid`]s, so there is never a
//! second copy of a record that could drift out of date.

use crate::common::{Pid, PidAllocator, ProcessError, Ticks};

use super::process::Process;

/// Arena of process records.
#[derive(Clone, Debug, Default)]
pub struct ProcessTable {
    pids: PidAllocator,
    records: Vec<Process>,
}

impl ProcessTable {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            pids: PidAllocator::new(),
            records: Vec::new(),
        }
    }

    /// Validates a request and stores the resulting `NEW` process.
    ///
    /// A rejected request consumes no pid and leaves the table untouched.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        memory_mb: i64,
        duration: i64,
        now: Ticks,
    ) -> Result<Pid, ProcessError> {
        let process = Process::new(self.pids.peek(), name, memory_mb, duration, now)?;
        let pid = self.pids.allocate();
        self.records.push(process);
        Ok(pid)
    }

    fn index(pid: Pid) -> Option<usize> {
        pid.val()
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
    }

    /// Looks up a process.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        Self::index(pid).and_then(|i| self.records.get(i))
    }

    pub(crate) fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        Self::index(pid).and_then(|i| self.records.get_mut(i))
    }

    /// Number of processes ever submitted.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been submitted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all records in pid order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.records.iter()
    }
}
