// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One-shot thread latch

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A latch that starts closed and is opened exactly once.
///
/// Any number of threads may wait on it. Once `open` has been called every
/// current and future waiter returns immediately.
pub struct Latch {
    lock: Mutex<bool>,
    cond: Condvar,
}

impl Latch {
    pub fn new() -> Latch {
        Latch {
            lock: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    // The mutex only ever guards a bool, a poisoned guard is still consistent.
    fn state(&self) -> MutexGuard<'_, bool> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the latch and wake up all waiting threads
    pub fn open(&self) {
        let mut guard = self.state();
        *guard = true;
        self.cond.notify_all();
    }

    pub fn is_open(&self) -> bool {
        *self.state()
    }

    /// Block the current thread until the latch is opened
    pub fn wait(&self) {
        let mut guard = self.state();

        while !*guard {
            guard = self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block the current thread until the latch is opened or `timeout` elapsed.
    ///
    /// Returns whether the latch is open.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.state();

        while !*guard {
            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    deadline - now
                }
                // Overflowing deadline, treat as "forever"
                None => {
                    guard = self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner);
                    continue;
                }
            };

            guard = match self.cond.wait_timeout(guard, remaining) {
                Ok((guard, _)) => guard,
                Err(err) => err.into_inner().0,
            };
        }

        true
    }
}

impl Default for Latch {
    fn default() -> Latch {
        Latch::new()
    }
}

impl fmt::Debug for Latch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_open() {
            write!(f, "Latch(Open)")
        } else {
            write!(f, "Latch(Closed)")
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_latch_thread_open() {
        let latch = Arc::new(Latch::new());
        let state = Arc::new(AtomicUsize::new(0));

        let h = {
            let latch = latch.clone();
            let state = state.clone();

            thread::spawn(move || {
                state.store(1, Ordering::SeqCst);
                latch.open();
            })
        };

        latch.wait();
        assert_eq!(state.load(Ordering::SeqCst), 1);

        h.join().unwrap();
    }

    #[test]
    fn test_latch_open_before_wait() {
        let latch = Latch::new();
        latch.open();
        latch.open();

        latch.wait();
        assert!(latch.wait_timeout(Duration::from_millis(0)));
        assert_eq!(format!("{:?}", latch), "Latch(Open)");
    }

    #[test]
    fn test_latch_wait_timeout() {
        let latch = Latch::new();

        assert!(!latch.wait_timeout(Duration::from_millis(20)));
        assert!(!latch.is_open());
        assert_eq!(format!("{:?}", latch), "Latch(Closed)");
    }

    #[test]
    fn test_latch_many_waiters() {
        let latch = Arc::new(Latch::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let latch = latch.clone();
                thread::spawn(move || latch.wait_timeout(Duration::from_secs(10)))
            })
            .collect();

        thread::sleep(Duration::from_millis(10));
        latch.open();

        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
