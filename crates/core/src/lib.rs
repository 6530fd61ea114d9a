//! Discrete-time process scheduling simulator library.
//!
//! This crate models a single CPU serving processes in FIFO order under a fixed
//! memory budget:
//! 1. **Core:** Process entity and state machine, memory pool, CPU unit, and the
//!    process table that owns every process record.
//! 2. **Scheduling:** Ready and memory-wait queues with configurable admission.
//! 3. **Simulation:** The orchestrator that advances time one tick at a time and
//!    publishes consistent snapshots.
//! 4. **Support:** Configuration, error types, and statistics collection.
//!
//! Time only moves when the caller invokes [`Simulator::advance_tick`]; nothing
//! runs in the background.

/// Common types (process ids, units, error enums).
pub mod common;
/// Simulator configuration (defaults, admission policy selection).
pub mod config;
/// Simulated hardware and process model (process, memory pool, CPU, table).
pub mod core;
/// FIFO scheduler and admission policies.
pub mod sched;
/// Orchestrator and read-only snapshots.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Umbrella error type returned by the orchestrator.
pub use crate::common::SimError;
/// Process identifier newtype.
pub use crate::common::Pid;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::with_capacity`.
pub use crate::sim::Simulator;
/// Immutable point-in-time view of the simulator.
pub use crate::sim::Snapshot;
