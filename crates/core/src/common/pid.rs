//! Process identifier types.
//!
//! Pids are handed out by a per-simulator [`PidAllocator`], so two independent
//! simulators never share numbering state.

use std::fmt;

use serde::Serialize;

/// A process identifier.
///
/// Identifiers are unique within one simulator and assigned in strictly
/// increasing order starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Pid(pub u64);

impl Pid {
    /// Creates a pid from a raw value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[inline]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic pid source.
#[derive(Debug, Clone)]
pub struct PidAllocator {
    next: u64,
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PidAllocator {
    /// Creates an allocator whose first pid is 1.
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next pid without consuming it.
    pub const fn peek(&self) -> Pid {
        Pid(self.next)
    }

    /// Consumes and returns the next pid.
    pub const fn allocate(&mut self) -> Pid {
        let pid = Pid(self.next);
        self.next += 1;
        pid
    }
}
