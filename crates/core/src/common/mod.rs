//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared across components:
//! 1. **Identifiers:** The [`Pid`] strong type and its allocator.
//! 2. **Units:** Aliases for megabytes and ticks.
//! 3. **Error Handling:** One error enum per component plus the umbrella [`SimError`].

/// Process identifier type and allocator.
pub mod pid;

/// Unit aliases for memory sizes and simulated time.
pub mod units;

/// Error types for every component.
pub mod error;

pub use error::{ConfigError, CpuError, MemoryError, ProcessError, SchedulerError, SimError};
pub use pid::{Pid, PidAllocator};
pub use units::{Megabytes, Ticks};
