use crate::utils::error::{MixError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Allows one mix at a time. A second caller is turned away, not queued.
#[derive(Debug, Default)]
pub struct MixGuard {
    busy: AtomicBool,
}

impl MixGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Result<MixPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| MixPermit { guard: self })
            .map_err(|_| MixError::MixInProgress)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of a mix; dropping it frees the guard.
#[derive(Debug)]
pub struct MixPermit<'a> {
    guard: &'a MixGuard,
}

impl Drop for MixPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
