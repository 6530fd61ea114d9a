//! Fixed-capacity memory pool.
//!
//! The pool only counts megabytes; it does not know which process holds them.
//! Callers pair every successful [`MemoryPool::reserve`] with exactly one
//! [`MemoryPool::release`] of the same amount. `available` is always derived
//! from `capacity - used` and never stored.

use serde::Serialize;
use tracing::trace;

use crate::common::{Megabytes, MemoryError};

/// Point-in-time memory counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    /// Megabytes currently reserved.
    pub used_mb: Megabytes,
    /// Total pool size.
    pub capacity_mb: Megabytes,
    /// Megabytes free for new reservations.
    pub available_mb: Megabytes,
}

/// Memory pool state.
#[derive(Clone, Debug)]
pub struct MemoryPool {
    capacity: Megabytes,
    used: Megabytes,
    peak: Megabytes,
}

impl MemoryPool {
    /// Creates an empty pool of `capacity` megabytes.
    pub const fn new(capacity: Megabytes) -> Self {
        Self {
            capacity,
            used: 0,
            peak: 0,
        }
    }

    /// Total pool size.
    pub const fn capacity(&self) -> Megabytes {
        self.capacity
    }

    /// Megabytes currently reserved.
    pub const fn used(&self) -> Megabytes {
        self.used
    }

    /// Megabytes free for new reservations.
    pub const fn available(&self) -> Megabytes {
        self.capacity - self.used
    }

    /// Highest value `used` has reached.
    pub const fn peak(&self) -> Megabytes {
        self.peak
    }

    /// Returns `true` if `amount` could be reserved right now.
    pub const fn fits(&self, amount: Megabytes) -> bool {
        amount <= self.available()
    }

    /// Reserves `amount` megabytes.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Insufficient`] if `amount` exceeds what is available. The
    /// pool is left unchanged.
    pub fn reserve(&mut self, amount: Megabytes) -> Result<(), MemoryError> {
        if !self.fits(amount) {
            return Err(MemoryError::Insufficient {
                requested: amount,
                available: self.available(),
            });
        }
        self.used += amount;
        self.peak = self.peak.max(self.used);
        trace!(amount, used = self.used, "memory reserved");
        Ok(())
    }

    /// Returns `amount` megabytes to the pool.
    ///
    /// # Errors
    ///
    /// [`MemoryError::ReleaseUnderflow`] if more is released than is reserved.
    /// This is an accounting bug, not a runtime condition.
    pub fn release(&mut self, amount: Megabytes) -> Result<(), MemoryError> {
        if amount > self.used {
            return Err(MemoryError::ReleaseUnderflow {
                requested: amount,
                used: self.used,
            });
        }
        self.used -= amount;
        trace!(amount, used = self.used, "memory released");
        Ok(())
    }

    /// Reads the counters without side effects.
    pub const fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            used_mb: self.used,
            capacity_mb: self.capacity,
            available_mb: self.available(),
        }
    }
}
