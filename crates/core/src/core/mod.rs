//! Simulated machine and process model.
//!
//! 1. **Process:** The job entity and its lifecycle state machine.
//! 2. **Table:** The arena that owns every process record.
//! 3. **Memory:** The fixed-capacity reservation pool.
//! 4. **CPU:** The single non-preemptive execution slot.

/// Single CPU unit.
pub mod cpu;

/// Memory pool.
pub mod memory;

/// Process entity and state machine.
pub mod process;

/// Process arena indexed by pid.
pub mod table;

pub use cpu::Cpu;
pub use memory::{MemoryPool, MemorySnapshot};
pub use process::{Process, ProcessState};
pub use table::ProcessTable;
