//! Scheduling.
//!
//! 1. **FIFO:** The scheduler owning the ready and memory-wait queues.
//! 2. **Policy:** How the wait queue is scanned when memory is freed.

/// FIFO scheduler.
pub mod fifo;

/// Admission policies.
pub mod policy;

pub use fifo::{FifoScheduler, Placement};
pub use policy::AdmissionPolicy;
