//! Per-call-site once flags.

use std::sync::atomic::{AtomicBool, Ordering};

/// A flag that lets exactly one caller through for the process lifetime.
///
/// Every `*_once!` macro expansion owns a `static OnceFlag`, so the flag is
/// keyed by call site. The flag is never reset. When several threads reach
/// an unset flag at the same time, the atomic swap picks exactly one winner.
#[derive(Debug, Default)]
pub struct OnceFlag(AtomicBool);

impl OnceFlag {
    pub const fn new() -> Self {
        OnceFlag(AtomicBool::new(false))
    }

    /// Set the flag. Returns `true` only for the call that set it.
    #[inline]
    pub fn first(&self) -> bool {
        if self.0.load(Ordering::Relaxed) {
            return false;
        }
        !self.0.swap(true, Ordering::AcqRel)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests;
