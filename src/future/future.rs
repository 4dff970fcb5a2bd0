// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::cores::{Callback, Core};

/// The read side of a single eventual `Result<To, Eo>`.
///
/// A `Future` is a cheap handle, cloning it yields another handle to the
/// same result. Any number of callbacks may be attached to it through
/// `on_success`, `on_failure` and `on_completion`. Callbacks attached before
/// completion run on the thread which completes the paired `Promise`, in the
/// order they were attached. Callbacks attached after completion run
/// immediately on the attaching thread.
pub struct Future<To, Eo> {
    core: Arc<Core<To, Eo>>,
}

impl<To, Eo> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    pub(super) fn with_core(core: Arc<Core<To, Eo>>) -> Future<To, Eo> {
        Future { core: core }
    }

    pub(super) fn core(&self) -> &Core<To, Eo> {
        &self.core
    }

    /// Create an already completed `Future`
    pub fn with_result(result: Result<To, Eo>) -> Future<To, Eo> {
        Future::with_core(Core::new(Some(result)))
    }

    /// Create a `Future` which already succeeded with `val`
    pub fn resolved(val: To) -> Future<To, Eo> {
        Self::with_result(Ok(val))
    }

    /// Create a `Future` which already failed with `err`
    pub fn rejected(err: Eo) -> Future<To, Eo> {
        Self::with_result(Err(err))
    }

    pub fn is_complete(&self) -> bool {
        self.core.is_complete()
    }

    pub fn succeeded(&self) -> bool {
        self.core.succeeded()
    }

    pub fn failed(&self) -> bool {
        self.core.failed()
    }

    /// A copy of the terminal result, `None` while pending
    pub fn result(&self) -> Option<Result<To, Eo>> {
        self.core.result()
    }

    pub fn value(&self) -> Option<To> {
        self.result().and_then(Result::ok)
    }

    pub fn error(&self) -> Option<Eo> {
        self.result().and_then(Result::err)
    }

    /// Call `func` with the value once this `Future` succeeded
    pub fn on_success<F>(&self, func: F) -> &Future<To, Eo>
        where F: FnOnce(To) + Send + 'static
    {
        self.core.attach(Callback::Success(Box::new(func)));
        self
    }

    /// Call `func` with the error once this `Future` failed
    pub fn on_failure<F>(&self, func: F) -> &Future<To, Eo>
        where F: FnOnce(Eo) + Send + 'static
    {
        self.core.attach(Callback::Failure(Box::new(func)));
        self
    }

    /// Call `func` with the result once this `Future` completed either way.
    ///
    /// Completion callbacks run after all success or failure callbacks.
    pub fn on_completion<F>(&self, func: F) -> &Future<To, Eo>
        where F: FnOnce(Result<To, Eo>) + Send + 'static
    {
        self.core.attach(Callback::Completion(Box::new(func)));
        self
    }

    /// Block the current thread until this `Future` completed or `timeout`
    /// elapsed, whichever comes first.
    ///
    /// Giving up does not cancel anything, the `Future` may still complete
    /// later on. Calling this on the thread that is supposed to complete the
    /// `Future` deadlocks until the timeout.
    pub fn block(&self, timeout: Duration) -> &Future<To, Eo> {
        if let Some(latch) = self.core.blocker() {
            if !latch.wait_timeout(timeout) {
                debug!("future still pending after blocking for {:?}", timeout);
            }
        }

        self
    }

    /// Block the current thread until this `Future` completed and return its result
    pub fn wait(&self) -> Result<To, Eo> {
        loop {
            if let Some(result) = self.result() {
                return result;
            }

            if let Some(latch) = self.core.blocker() {
                latch.wait();
            }
        }
    }
}

impl<To, Eo> Clone for Future<To, Eo> {
    fn clone(&self) -> Future<To, Eo> {
        Future { core: self.core.clone() }
    }
}

impl<To, Eo> From<Result<To, Eo>> for Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    fn from(result: Result<To, Eo>) -> Future<To, Eo> {
        Future::with_result(result)
    }
}

impl<To, Eo> fmt::Debug for Future<To, Eo>
    where To: fmt::Debug,
          Eo: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Future").field(&self.core).finish()
    }
}
