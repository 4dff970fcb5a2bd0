// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use super::cores::Core;
use super::Future;

/// The write side of a `Future`.
///
/// Only the first of `resolve`, `reject` or `complete` has an effect, every
/// later call is silently ignored.
pub struct Promise<To, Eo> {
    future: Future<To, Eo>,
}

impl<To, Eo> Promise<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    pub fn new() -> Promise<To, Eo> {
        Promise { future: Future::with_core(Core::new(None)) }
    }

    /// A handle to the `Future` completed by this `Promise`
    pub fn future(&self) -> Future<To, Eo> {
        self.future.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.future.is_complete()
    }

    pub fn resolve(&self, val: To) {
        self.complete(Ok(val));
    }

    pub fn reject(&self, err: Eo) {
        self.complete(Err(err));
    }

    /// Complete the `Future` with `result`.
    ///
    /// Returns whether this call settled the `Future`.
    pub fn complete(&self, result: Result<To, Eo>) -> bool {
        self.future.core().settle(result)
    }
}

impl<To, Eo> Default for Promise<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    fn default() -> Promise<To, Eo> {
        Promise::new()
    }
}

impl<To, Eo> fmt::Debug for Promise<To, Eo>
    where To: fmt::Debug,
          Eo: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Promise").field("future", &self.future).finish()
    }
}
