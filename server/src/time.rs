//! Time source abstraction for token expiry and record timestamps.
//!
//! The identity service reads wall-clock time through a `TimeSource` so that
//! production uses the system clock while tests pin time to exact instants
//! (for example, one second before a token's expiry).

use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over time operations.
///
/// Implementations must be shareable across request tasks.
pub trait TimeSource: Send + Sync {
    /// Get the current time in whole seconds since Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Real time source using system clock.
///
/// This is the default implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> u64 {
        // duration_since(UNIX_EPOCH) only fails if system time is before 1970.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_secs())
    }
}
