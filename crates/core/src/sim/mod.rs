//! Simulation orchestration.
//!
//! The [`Simulator`] composes the process table, memory pool, FIFO scheduler
//! and CPU, advances time one tick per call, and publishes [`Snapshot`]s.

/// Orchestrator.
pub mod simulator;

/// Read-only views.
pub mod snapshot;

pub use simulator::{Simulator, TickReport};
pub use snapshot::{CpuView, FinishedView, Snapshot};
