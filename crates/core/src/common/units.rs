//! Unit aliases.
//!
//! Memory is accounted in whole megabytes and time in whole ticks. The aliases
//! keep signatures readable without introducing arithmetic newtypes.

/// A memory amount in megabytes.
pub type Megabytes = u64;

/// A span or instant of simulated time, in ticks.
pub type Ticks = u64;
