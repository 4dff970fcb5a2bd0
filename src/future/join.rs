// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Combinators waiting on several futures at once

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Future, Promise};
use crate::sync::Spinlock;

struct ZipState<To> {
    values: Vec<Option<To>>,
    remaining: usize,
    settled: bool,
}

/// Wait for all `futures` to succeed.
///
/// The returned `Future` succeeds with the values in the order of `futures`,
/// no matter in which order they completed. It fails with the error of the
/// first input observed to fail, inputs which already failed when `zip` is
/// called are observed in input order. An empty input succeeds immediately
/// with an empty `Vec`.
pub fn zip<To, Eo, I>(futures: I) -> Future<Vec<To>, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static,
          I: IntoIterator<Item = Future<To, Eo>>
{
    let futures: Vec<_> = futures.into_iter().collect();

    if futures.is_empty() {
        return Future::resolved(Vec::new());
    }

    let promise = Arc::new(Promise::new());
    let joined = promise.future();
    let state = Arc::new(Spinlock::new(ZipState {
        values: (0..futures.len()).map(|_| None).collect(),
        remaining: futures.len(),
        settled: false,
    }));

    for (idx, future) in futures.into_iter().enumerate() {
        let promise = promise.clone();
        let state = state.clone();

        future.on_completion(move |result| {
            let outcome: Result<Vec<To>, Eo> = {
                let mut state = state.lock();

                if state.settled {
                    return;
                }

                match result {
                    Ok(val) => {
                        state.values[idx] = Some(val);
                        state.remaining -= 1;

                        if state.remaining > 0 {
                            return;
                        }

                        state.settled = true;
                        let values = mem::take(&mut state.values);
                        Ok(values.into_iter().flatten().collect())
                    }
                    Err(err) => {
                        state.settled = true;
                        state.values.clear();
                        Err(err)
                    }
                }
            };

            trace!("zip of input {} settled the joined future", idx);
            promise.complete(outcome);
        });
    }

    joined
}

/// Race `futures` against each other.
///
/// The first input to succeed wins and its value completes the returned
/// `Future` immediately. A failure only completes the returned `Future` once
/// every input has failed, it then carries the error of the last failure
/// observed. An empty input never completes.
pub fn first_finished<To, Eo, I>(futures: I) -> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static,
          I: IntoIterator<Item = Future<To, Eo>>
{
    let futures: Vec<_> = futures.into_iter().collect();
    let total = futures.len();

    let promise = Arc::new(Promise::new());
    let joined = promise.future();
    let failures = Arc::new(AtomicUsize::new(0));

    if total == 0 {
        debug!("first_finished called without inputs, the result will never complete");
    }

    for future in futures {
        let promise = promise.clone();
        let failures = failures.clone();

        future.on_completion(move |result| {
            match result {
                Ok(val) => promise.resolve(val),
                Err(err) => {
                    if failures.fetch_add(1, Ordering::AcqRel) + 1 == total {
                        trace!("all {} raced futures failed", total);
                        promise.reject(err);
                    }
                }
            }
        });
    }

    joined
}

impl<To, Eo> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    /// Wait for both this `Future` and `other` to succeed.
    ///
    /// Like `zip` for two futures with different value types.
    pub fn join<Tc>(&self, other: &Future<Tc, Eo>) -> Future<(To, Tc), Eo>
        where Tc: Clone + Send + 'static
    {
        let promise = Arc::new(Promise::new());
        let joined = promise.future();
        let slots = Arc::new(Spinlock::new((None::<To>, None::<Tc>)));

        {
            let promise = promise.clone();
            let slots = slots.clone();

            self.on_completion(move |result| {
                match result {
                    Ok(val) => {
                        let pair = {
                            let mut slots = slots.lock();
                            slots.0 = Some(val);
                            take_pair(&mut *slots)
                        };

                        if let Some(pair) = pair {
                            promise.resolve(pair);
                        }
                    }
                    Err(err) => promise.reject(err),
                }
            });
        }

        other.on_completion(move |result| {
            match result {
                Ok(val) => {
                    let pair = {
                        let mut slots = slots.lock();
                        slots.1 = Some(val);
                        take_pair(&mut *slots)
                    };

                    if let Some(pair) = pair {
                        promise.resolve(pair);
                    }
                }
                Err(err) => promise.reject(err),
            }
        });

        joined
    }
}

fn take_pair<A, B>(slots: &mut (Option<A>, Option<B>)) -> Option<(A, B)> {
    match (slots.0.take(), slots.1.take()) {
        (Some(a), Some(b)) => Some((a, b)),
        (a, b) => {
            *slots = (a, b);
            None
        }
    }
}
