// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sequential composition of dependent futures

use super::{Future, Promise};

impl<To, Eo> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    /// Continue with another asynchronous step once this `Future` succeeded.
    ///
    /// `func` is invoked at most once, and only after this `Future` succeeded.
    /// The returned `Future` completes with the outcome of the `Future`
    /// produced by `func`. If this `Future` fails, the returned one fails with
    /// the same error and `func` is dropped without being called.
    pub fn then<Tc, F>(&self, func: F) -> Future<Tc, Eo>
        where Tc: Clone + Send + 'static,
              F: FnOnce(To) -> Future<Tc, Eo> + Send + 'static
    {
        let promise = Promise::new();
        let future = promise.future();

        self.on_completion(move |result| {
            match result {
                Ok(val) => {
                    func(val).on_completion(move |result| {
                        promise.complete(result);
                    });
                }
                Err(err) => promise.reject(err),
            }
        });

        future
    }

    /// Continue with another asynchronous step once this `Future` failed.
    ///
    /// The failure-side mirror of `then`: a success passes through unchanged,
    /// a failure is handed to `func` and the returned `Future` completes with
    /// the outcome of the `Future` it produces.
    pub fn recover<Ec, F>(&self, func: F) -> Future<To, Ec>
        where Ec: Clone + Send + 'static,
              F: FnOnce(Eo) -> Future<To, Ec> + Send + 'static
    {
        let promise = Promise::new();
        let future = promise.future();

        self.on_completion(move |result| {
            match result {
                Ok(val) => promise.resolve(val),
                Err(err) => {
                    func(err).on_completion(move |result| {
                        promise.complete(result);
                    });
                }
            }
        });

        future
    }
}
