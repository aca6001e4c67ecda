//! Cancellation token shared between the search and its timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation for a running search.
///
/// Every clone refers to the same flag. The searcher polls it on entry to
/// each node and before each root move, then unwinds; the timer thread or
/// any other holder (a GUI "stop" button, a test) raises it. Nothing else
/// crosses the thread boundary, so the board and table stay unshared.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Ask the search to unwind as soon as it next polls.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag before a new search.
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_raise_and_lower() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());
        flag.stop();
        flag.stop();
        assert!(flag.is_stopped());
        flag.reset();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_clones_see_a_stop_from_another_thread() {
        let flag = StopFlag::default();
        let remote = flag.clone();
        thread::spawn(move || remote.stop())
            .join()
            .expect("thread panicked");
        assert!(flag.is_stopped());

        // Resetting through any clone lowers it for all of them
        let other = flag.clone();
        other.reset();
        assert!(!flag.is_stopped());
    }
}
