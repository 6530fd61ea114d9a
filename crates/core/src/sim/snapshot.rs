//! Read-only simulator views.
//!
//! A [`Snapshot`] is an owned copy of everything a front-end draws. Building
//! one never mutates the simulator, so two snapshots taken without an
//! intervening tick compare equal.

use serde::Serialize;

use crate::common::{Pid, Ticks};
use crate::core::{MemorySnapshot, Process};

/// The process currently on the CPU.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CpuView {
    /// Process identifier.
    pub pid: Pid,
    /// Display name.
    pub name: String,
    /// Ticks still owed.
    #[serde(rename = "remaining_s")]
    pub remaining: Ticks,
}

/// One entry of the finished history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinishedView {
    /// Process identifier.
    pub pid: Pid,
    /// Display name.
    pub name: String,
    /// Total ticks the process ran.
    #[serde(rename = "duration_s")]
    pub duration: Ticks,
}

impl From<&Process> for CpuView {
    fn from(p: &Process) -> Self {
        Self {
            pid: p.pid(),
            name: p.name().to_string(),
            remaining: p.remaining(),
        }
    }
}

impl From<&Process> for FinishedView {
    fn from(p: &Process) -> Self {
        Self {
            pid: p.pid(),
            name: p.name().to_string(),
            duration: p.duration(),
        }
    }
}

/// Point-in-time simulator state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Ticks advanced so far.
    pub tick: Ticks,
    /// Memory pool counters.
    pub ram: MemorySnapshot,
    /// Ready queue, head first.
    pub ready: Vec<Pid>,
    /// Memory-wait queue, head first.
    pub waiting: Vec<Pid>,
    /// CPU occupant.
    pub cpu: Option<CpuView>,
    /// Most recent completions, oldest first.
    pub finished: Vec<FinishedView>,
}

impl Snapshot {
    /// Returns `true` if `pid` appears in any queue, on the CPU, or in the
    /// finished tail.
    pub fn contains(&self, pid: Pid) -> bool {
        self.ready.contains(&pid)
            || self.waiting.contains(&pid)
            || self.cpu.as_ref().is_some_and(|c| c.pid == pid)
            || self.finished.iter().any(|f| f.pid == pid)
    }

    /// Serializes the snapshot as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
