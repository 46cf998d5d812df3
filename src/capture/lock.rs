//! Process-wide single-capture guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static PROCESS_LOCK: OnceLock<CaptureLock> = OnceLock::new();

/// Guard allowing at most one capture session at a time
///
/// Clones share the same flag. Acquisition either succeeds immediately or
/// fails; callers are never queued.
#[derive(Debug, Clone, Default)]
pub struct CaptureLock {
    active: Arc<AtomicBool>,
}

impl CaptureLock {
    /// A lock independent of every other lock
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock shared by the whole process
    pub fn process() -> Self {
        PROCESS_LOCK.get_or_init(CaptureLock::new).clone()
    }

    /// Try to start a session. Returns `None` if one is already active.
    pub fn try_acquire(&self) -> Option<CapturePermit> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CapturePermit {
                active: Arc::clone(&self.active),
            })
    }

    /// Whether a session currently holds the lock
    pub fn is_held(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Proof of an active session; releases the lock when dropped
#[derive(Debug)]
pub struct CapturePermit {
    active: Arc<AtomicBool>,
}

impl Drop for CapturePermit {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let lock = CaptureLock::new();
        let permit = lock.try_acquire().expect("first acquire");

        assert!(lock.is_held());
        assert!(lock.try_acquire().is_none());
        assert!(lock.clone().try_acquire().is_none());

        drop(permit);
        assert!(!lock.is_held());
        assert!(lock.try_acquire().is_some());
    }

    #[test]
    fn test_permit_released_on_panic() {
        let lock = CaptureLock::new();
        let shared = lock.clone();

        let result = std::panic::catch_unwind(move || {
            let _permit = shared.try_acquire().unwrap();
            panic!("loop body blew up");
        });

        assert!(result.is_err());
        assert!(!lock.is_held());
    }
}
