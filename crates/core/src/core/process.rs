//! Process entity and lifecycle state machine.
//!
//! A process moves through a closed set of states:
//!
//! ```text
//! NEW ──► WAITING_FOR_MEMORY ──► READY ──► RUNNING ──► FINISHED
//!   └──────────────────────────────┘
//! ```
//!
//! `NEW` only exists between construction and submission. Transitions into
//! `READY` and `WAITING_FOR_MEMORY` belong to the scheduler; `RUNNING` and
//! `FINISHED` belong to the CPU unit. Those mutators are crate-private so no
//! outside caller can skip a state.

use std::fmt;

use serde::Serialize;

use crate::common::{Megabytes, Pid, ProcessError, Ticks};

/// Lifecycle state of a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Constructed, not yet submitted.
    New,
    /// Queued until enough memory frees up.
    WaitingForMemory,
    /// Memory reserved, queued for the CPU.
    Ready,
    /// On the CPU.
    Running,
    /// Ran to completion. Terminal.
    Finished,
}

impl ProcessState {
    /// Returns `true` while the process holds a memory reservation.
    pub const fn holds_memory(self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }

    /// Returns `true` once the process can never change state again.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "NEW",
            Self::WaitingForMemory => "WAITING_FOR_MEMORY",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// One simulated job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    name: String,
    memory_mb: Megabytes,
    duration: Ticks,
    remaining: Ticks,
    state: ProcessState,
    submitted_at: Ticks,
    admitted_at: Option<Ticks>,
    dispatched_at: Option<Ticks>,
    finished_at: Option<Ticks>,
}

impl Process {
    /// Validates a request and builds a process in state `NEW`.
    ///
    /// # Arguments
    ///
    /// * `pid` - Identifier assigned by the owning simulator.
    /// * `name` - Display name.
    /// * `memory_mb` - Requested memory; must be at least 1.
    /// * `duration` - Ticks of CPU time required; must be at least 1.
    /// * `submitted_at` - Simulator tick at which the request arrived.
    ///
    /// # Errors
    ///
    /// [`ProcessError::InvalidMemory`] or [`ProcessError::InvalidDuration`] when a
    /// value is not positive. Memory is checked first.
    pub fn new(
        pid: Pid,
        name: impl Into<String>,
        memory_mb: i64,
        duration: i64,
        submitted_at: Ticks,
    ) -> Result<Self, ProcessError> {
        let memory = positive(memory_mb).ok_or(ProcessError::InvalidMemory(memory_mb))?;
        let duration_ticks = positive(duration).ok_or(ProcessError::InvalidDuration(duration))?;
        Ok(Self {
            pid,
            name: name.into(),
            memory_mb: memory,
            duration: duration_ticks,
            remaining: duration_ticks,
            state: ProcessState::New,
            submitted_at,
            admitted_at: None,
            dispatched_at: None,
            finished_at: None,
        })
    }

    /// Process identifier.
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Memory requested, in MB.
    pub const fn memory_mb(&self) -> Megabytes {
        self.memory_mb
    }

    /// Total CPU time required, in ticks.
    pub const fn duration(&self) -> Ticks {
        self.duration
    }

    /// CPU time still owed, in ticks.
    pub const fn remaining(&self) -> Ticks {
        self.remaining
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Tick at which the process was submitted.
    pub const fn submitted_at(&self) -> Ticks {
        self.submitted_at
    }

    /// Tick at which memory was reserved, if it has been.
    pub const fn admitted_at(&self) -> Option<Ticks> {
        self.admitted_at
    }

    /// Tick at which the process reached the CPU, if it has.
    pub const fn dispatched_at(&self) -> Option<Ticks> {
        self.dispatched_at
    }

    /// Tick at which the process finished, if it has.
    pub const fn finished_at(&self) -> Option<Ticks> {
        self.finished_at
    }

    /// Ticks from submission to completion.
    pub fn turnaround(&self) -> Option<Ticks> {
        self.finished_at.map(|t| t - self.submitted_at)
    }

    /// Ticks from submission to dispatch.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.dispatched_at.map(|t| t - self.submitted_at)
    }

    pub(crate) const fn mark_waiting(&mut self) {
        self.state = ProcessState::WaitingForMemory;
    }

    pub(crate) const fn mark_ready(&mut self, now: Ticks) {
        self.state = ProcessState::Ready;
        self.admitted_at = Some(now);
    }

    pub(crate) const fn mark_running(&mut self, now: Ticks) {
        self.state = ProcessState::Running;
        self.dispatched_at = Some(now);
    }

    /// Consumes one tick of CPU time.
    ///
    /// Returns `true` when this tick completed the process, which is then
    /// `FINISHED`.
    pub(crate) fn tick(&mut self, now: Ticks) -> Result<bool, ProcessError> {
        if self.state != ProcessState::Running {
            return Err(ProcessError::NotRunning {
                pid: self.pid,
                state: self.state,
            });
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ProcessState::Finished;
            self.finished_at = Some(now);
            return Ok(true);
        }
        Ok(false)
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|&v| v > 0)
}
