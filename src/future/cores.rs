// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The shared state between a `Promise` and its `Future`s

use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::Arc;
use std::thread;

use crate::sync::{Latch, Spinlock};

/// A callback waiting for a `Core` to settle.
pub enum Callback<T, E> {
    Success(Box<dyn FnOnce(T) + Send>),
    Failure(Box<dyn FnOnce(E) + Send>),
    Completion(Box<dyn FnOnce(Result<T, E>) + Send>),
}

impl<T, E> Callback<T, E>
    where T: Clone,
          E: Clone
{
    /// Whether this callback will ever be invoked for `result`
    fn accepts(&self, result: &Result<T, E>) -> bool {
        match (self, result) {
            (&Callback::Success(_), &Err(_)) => false,
            (&Callback::Failure(_), &Ok(_)) => false,
            _ => true,
        }
    }

    fn invoke(self, result: &Result<T, E>) {
        match (self, result) {
            (Callback::Success(f), Ok(val)) => f(val.clone()),
            (Callback::Failure(f), Err(err)) => f(err.clone()),
            (Callback::Completion(f), res) => f(res.clone()),
            _ => {}
        }
    }
}

struct Inner<T, E> {
    result: Option<Result<T, E>>,

    // Set while the settling thread walks the queues. Attachments made in
    // the meantime are queued behind the earlier ones instead of being
    // replayed out of order on the attaching thread.
    draining: bool,

    outcome: VecDeque<Callback<T, E>>,
    completion: VecDeque<Callback<T, E>>,

    // Shared by every thread blocking on this core, opened once it settled
    blocker: Option<Arc<Latch>>,
}

impl<T, E> Inner<T, E> {
    fn enqueue(&mut self, cb: Callback<T, E>) {
        match cb {
            Callback::Completion(..) => self.completion.push_back(cb),
            _ => self.outcome.push_back(cb),
        }
    }

    fn has_queued(&self) -> bool {
        !self.outcome.is_empty() || !self.completion.is_empty()
    }
}

// Ends a drain. On a regular exit the drain loop already cleared `draining`,
// when unwinding out of a panicking callback the flag is reset here so that
// the next attachment picks up the remaining queue.
struct DrainGuard<'a, T, E> {
    core: &'a Core<T, E>,
}

impl<'a, T, E> Drop for DrainGuard<'a, T, E> {
    fn drop(&mut self) {
        let blocker = {
            let mut inner = self.core.inner.lock();
            if thread::panicking() {
                inner.draining = false;
            }
            inner.blocker.take()
        };

        if let Some(latch) = blocker {
            latch.open();
        }
    }
}

/// A `Core` stores the terminal result of a future together with the
/// callbacks attached to it before it settled.
///
/// All state lives behind one spinlock owned by this `Core`. The lock is
/// never held while a callback runs, so callbacks are free to attach to,
/// settle or block on any future, including this one.
pub struct Core<T, E> {
    inner: Spinlock<Inner<T, E>>,
}

impl<T, E> Core<T, E>
    where T: Clone,
          E: Clone
{
    pub fn new(result: Option<Result<T, E>>) -> Arc<Core<T, E>> {
        Arc::new(Core {
            inner: Spinlock::new(Inner {
                result: result,
                draining: false,
                outcome: VecDeque::new(),
                completion: VecDeque::new(),
                blocker: None,
            }),
        })
    }

    pub fn result(&self) -> Option<Result<T, E>> {
        self.inner.lock().result.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.inner.lock().result.is_some()
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.inner.lock().result, Some(Ok(_)))
    }

    pub fn failed(&self) -> bool {
        matches!(self.inner.lock().result, Some(Err(_)))
    }

    /// The latch threads block on until this core settled, `None` if it
    /// already did.
    ///
    /// All callers share one latch, so polling a pending core does not grow
    /// its callback queues.
    pub fn blocker(&self) -> Option<Arc<Latch>> {
        let mut inner = self.inner.lock();

        if inner.result.is_some() {
            return None;
        }

        let latch = inner.blocker.get_or_insert_with(|| Arc::new(Latch::new()));
        Some(latch.clone())
    }

    /// Sets the result and fires every pending callback.
    ///
    /// Returns `false` without touching anything if the core already settled.
    pub fn settle(&self, val: Result<T, E>) -> bool {
        let stored = val.clone();

        let rejected = {
            let mut inner = self.inner.lock();

            if inner.result.is_some() {
                drop(inner);
                debug!("ignoring completion of an already settled future");
                return false;
            }

            // Success callbacks of a failed future (and vice versa) never
            // fire, release them right away.
            let (kept, rejected): (VecDeque<_>, VecDeque<_>) = mem::take(&mut inner.outcome)
                .into_iter()
                .partition(|cb| cb.accepts(&val));

            inner.outcome = kept;
            inner.result = Some(stored);
            inner.draining = true;
            rejected
        };

        drop(rejected);
        trace!("future settled, dispatching callbacks");

        self.drain(&val);
        true
    }

    /// Attach a callback, or run it right away if the core already settled.
    pub fn attach(&self, cb: Callback<T, E>) {
        let mut inner = self.inner.lock();

        let replay = match inner.result {
            None => false,
            Some(ref result) if !cb.accepts(result) => return,
            Some(_) => !inner.draining,
        };

        if !replay {
            inner.enqueue(cb);
            return;
        }

        let result = inner.result.clone();

        // A panicking callback cut the last drain short, run what it left
        // behind before this one.
        if inner.has_queued() {
            inner.enqueue(cb);
            inner.draining = true;
            drop(inner);

            if let Some(result) = result {
                self.drain(&result);
            }
            return;
        }

        drop(inner);

        if let Some(result) = result {
            cb.invoke(&result);
        }
    }

    fn drain(&self, result: &Result<T, E>) {
        let _guard = DrainGuard { core: self };

        loop {
            let cb = {
                let mut inner = self.inner.lock();

                let next = match inner.outcome.pop_front() {
                    Some(cb) => Some(cb),
                    None => inner.completion.pop_front(),
                };

                match next {
                    Some(cb) => cb,
                    None => {
                        inner.draining = false;
                        return;
                    }
                }
            };

            cb.invoke(result);
        }
    }
}

impl<T, E> fmt::Debug for Core<T, E>
    where T: fmt::Debug,
          E: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inner = match self.inner.try_lock() {
            Some(inner) => inner,
            None => return write!(f, "Core {{ <locked> }}"),
        };

        match inner.result {
            None => {
                write!(f,
                       "Core {{ pending, callbacks: {} }}",
                       inner.outcome.len() + inner.completion.len())
            }
            Some(ref result) => write!(f, "Core {{ {:?} }}", result),
        }
    }
}
