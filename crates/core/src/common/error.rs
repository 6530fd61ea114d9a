//! Error definitions.
//!
//! Errors fall into three classes:
//! 1. **Validation:** Malformed process requests ([`ProcessError::InvalidMemory`],
//!    [`ProcessError::InvalidDuration`]) and bad configuration ([`ConfigError`]).
//!    These are expected at the user boundary and leave the simulator unchanged.
//! 2. **Allocation:** [`MemoryError::Insufficient`]. The scheduler absorbs it by
//!    queuing the process; it only escapes when the pool is driven directly.
//! 3. **Invariant violations:** Everything else. They mean the engine itself is
//!    broken and the current operation must not continue.

use thiserror::Error;

use super::pid::Pid;
use super::units::Megabytes;
use crate::core::process::ProcessState;

/// Errors raised by the process entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Requested memory was zero or negative.
    #[error("memory must be a positive number of MB, got {0}")]
    InvalidMemory(i64),

    /// Requested duration was zero or negative.
    #[error("duration must be a positive number of ticks, got {0}")]
    InvalidDuration(i64),

    /// A tick was applied to a process that is not on the CPU.
    #[error("process {pid} cannot tick while {state}")]
    NotRunning {
        /// Offending process.
        pid: Pid,
        /// State it was found in.
        state: ProcessState,
    },
}

/// Errors raised by the memory pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// A reservation asked for more than is currently free.
    #[error("cannot reserve {requested} MB: only {available} MB available")]
    Insufficient {
        /// Amount requested.
        requested: Megabytes,
        /// Amount free at the time of the request.
        available: Megabytes,
    },

    /// A release returned more than is currently reserved.
    #[error("cannot release {requested} MB: only {used} MB in use")]
    ReleaseUnderflow {
        /// Amount released.
        requested: Megabytes,
        /// Amount reserved at the time of the release.
        used: Megabytes,
    },
}

/// Errors raised by the CPU unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// A process was assigned while another one was still running.
    #[error("cannot assign process {incoming}: CPU is running process {running}")]
    Occupied {
        /// Process currently on the CPU.
        running: Pid,
        /// Process that was refused.
        incoming: Pid,
    },
}

/// Errors raised by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A queue referenced a pid that the process table does not hold.
    #[error("process {0} is not in the process table")]
    UnknownPid(Pid),

    /// A process was submitted outside the `NEW` state.
    #[error("process {pid} was submitted while {state}")]
    NotNew {
        /// Offending process.
        pid: Pid,
        /// State it was found in.
        state: ProcessState,
    },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Memory capacity must be at least 1 MB.
    #[error("memory capacity must be positive")]
    ZeroCapacity,

    /// The finished-history tail shown in snapshots must hold at least one entry.
    #[error("history tail must hold at least one entry")]
    ZeroHistoryTail,

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Umbrella error returned by the orchestrator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Process validation or state machine failure.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Memory accounting failure.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// CPU slot misuse.
    #[error(transparent)]
    Cpu(#[from] CpuError),

    /// Queue bookkeeping failure.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    /// Returns `true` for errors a caller is expected to report and recover from.
    ///
    /// Only validation failures qualify; every other variant signals a broken
    /// invariant inside the engine.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Process(ProcessError::InvalidMemory(_) | ProcessError::InvalidDuration(_))
                | Self::Config(_)
        )
    }
}
