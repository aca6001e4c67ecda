//! Search timer.
//!
//! One long-lived thread per bot. `arm` hands it a budget; if `disarm` (or
//! another `arm`) does not arrive first, the thread sets the stop flag.
//! The thread sleeps on a condition variable between searches and is
//! joined when the timer is dropped.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{trace, warn};
use parking_lot::{Condvar, Mutex};

use crate::sync::StopFlag;

#[derive(Debug, Default)]
struct TimerState {
    /// Deadline of the armed search, if any
    deadline: Option<Instant>,
    /// Bumped on every arm/disarm so a waiting thread notices the reset
    epoch: u64,
    shutdown: bool,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<TimerState>,
    wakeup: Condvar,
}

pub struct SearchTimer {
    shared: Arc<Shared>,
    stop: StopFlag,
    handle: Option<JoinHandle<()>>,
}

impl SearchTimer {
    /// Start the timer thread. It sets `stop` whenever an armed budget runs
    /// out.
    #[must_use]
    pub fn new(stop: StopFlag) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(TimerState::default()),
            wakeup: Condvar::new(),
        });

        let thread_shared = Arc::clone(&shared);
        let thread_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("search-timer".into())
            .spawn(move || run(&thread_shared, &thread_stop))
            .ok();
        if handle.is_none() {
            warn!("could not start search timer thread; searches will not time out");
        }

        SearchTimer {
            shared,
            stop,
            handle,
        }
    }

    /// Clear the stop flag and start counting down `budget`.
    pub fn arm(&self, budget: Duration) {
        self.stop.reset();
        let mut state = self.shared.state.lock();
        state.deadline = Some(Instant::now() + budget);
        state.epoch = state.epoch.wrapping_add(1);
        trace!("timer armed for {} ms", budget.as_millis());
        self.shared.wakeup.notify_one();
    }

    /// Cancel the countdown without touching the stop flag.
    pub fn disarm(&self) {
        let mut state = self.shared.state.lock();
        if state.deadline.take().is_some() {
            trace!("timer disarmed");
        }
        state.epoch = state.epoch.wrapping_add(1);
        self.shared.wakeup.notify_one();
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.shared.state.lock().deadline.is_some()
    }

    /// The flag this timer sets
    #[must_use]
    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }
}

fn run(shared: &Shared, stop: &StopFlag) {
    let mut state = shared.state.lock();
    loop {
        if state.shutdown {
            return;
        }
        match state.deadline {
            None => shared.wakeup.wait(&mut state),
            Some(deadline) => {
                let epoch = state.epoch;
                let timed_out = shared.wakeup.wait_until(&mut state, deadline).timed_out();
                // Only fire if nobody re-armed or disarmed in the meantime
                if timed_out && state.epoch == epoch && state.deadline.is_some() {
                    state.deadline = None;
                    stop.stop();
                    trace!("timer fired");
                }
            }
        }
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            state.deadline = None;
        }
        self.shared.wakeup.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires() {
        let flag = StopFlag::new();
        let timer = SearchTimer::new(flag.clone());
        timer.arm(Duration::from_millis(20));
        thread::sleep(Duration::from_millis(200));
        assert!(flag.is_stopped());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_disarm_prevents_firing() {
        let flag = StopFlag::new();
        let timer = SearchTimer::new(flag.clone());
        timer.arm(Duration::from_millis(50));
        timer.disarm();
        thread::sleep(Duration::from_millis(150));
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_rearm_resets_flag_and_deadline() {
        let flag = StopFlag::new();
        let timer = SearchTimer::new(flag.clone());
        timer.arm(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(100));
        assert!(flag.is_stopped());

        timer.arm(Duration::from_secs(60));
        assert!(!flag.is_stopped());
        assert!(timer.is_armed());
        // Dropping joins the thread without waiting for the deadline
    }
}
