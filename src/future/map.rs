// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Type-changing transforms of a single `Future`

use super::{Future, Promise};
use crate::error::MapError;

impl<To, Eo> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    /// Transform the terminal result of this `Future`.
    ///
    /// The returned `Future` completes with whatever `func` returns, so it
    /// can turn a success into a failure and vice versa.
    pub fn map_result<Tc, Ec, F>(&self, func: F) -> Future<Tc, Ec>
        where Tc: Clone + Send + 'static,
              Ec: Clone + Send + 'static,
              F: FnOnce(Result<To, Eo>) -> Result<Tc, Ec> + Send + 'static
    {
        let promise = Promise::new();
        let future = promise.future();

        self.on_completion(move |result| {
            promise.complete(func(result));
        });

        future
    }

    /// Transform the value of this `Future`, errors pass through unchanged
    pub fn map_value<Tc, F>(&self, func: F) -> Future<Tc, Eo>
        where Tc: Clone + Send + 'static,
              F: FnOnce(To) -> Tc + Send + 'static
    {
        self.map_result(move |result| result.map(func))
    }

    /// Transform the error of this `Future`, values pass through unchanged
    pub fn map_error<Ec, F>(&self, func: F) -> Future<To, Ec>
        where Ec: Clone + Send + 'static,
              F: FnOnce(Eo) -> Ec + Send + 'static
    {
        self.map_result(move |result| result.map_err(func))
    }

    /// Transform the value of this `Future` with a transform that may refuse it.
    ///
    /// If `func` returns `None` the returned `Future` fails with
    /// `MapError::MappingError` carrying the refused value. If this `Future`
    /// fails, `func` is never called and the error is wrapped in
    /// `MapError::OriginalError`.
    ///
    /// ```
    /// use promise_chain::{Future, MapError};
    ///
    /// let parsed = Future::<&str, ()>::resolved("42").flat_map(|s| s.parse::<u32>().ok());
    /// assert_eq!(parsed.value(), Some(42));
    ///
    /// let parsed = Future::<&str, ()>::resolved("x").flat_map(|s| s.parse::<u32>().ok());
    /// assert_eq!(parsed.error(), Some(MapError::MappingError("x")));
    /// ```
    pub fn flat_map<Tc, F>(&self, func: F) -> Future<Tc, MapError<To, Eo>>
        where Tc: Clone + Send + 'static,
              F: FnOnce(To) -> Option<Tc> + Send + 'static
    {
        self.map_result(move |result| {
            match result {
                Ok(val) => {
                    match func(val.clone()) {
                        Some(mapped) => Ok(mapped),
                        None => Err(MapError::MappingError(val)),
                    }
                }
                Err(err) => Err(MapError::OriginalError(err)),
            }
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::MapError;
    use crate::future::{Future, Promise};

    #[derive(Debug, Clone, PartialEq)]
    enum TestError {
        E1,
        E2,
    }

    #[test]
    fn test_map_value_success() {
        let fut = Future::<i32, TestError>::resolved(3).map_value(|x| x.to_string());
        assert_eq!(fut.value(), Some("3".to_owned()));
    }

    #[test]
    fn test_map_value_pending_source() {
        let promise = Promise::<i32, TestError>::new();
        let fut = promise.future().map_value(|x| x * 2);

        assert!(!fut.is_complete());
        promise.resolve(21);
        assert_eq!(fut.value(), Some(42));
    }

    #[test]
    fn test_map_value_passes_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let fut = Future::<i32, TestError>::rejected(TestError::E1).map_value(move |x| {
            calls2.fetch_add(1, Ordering::SeqCst);
            x.to_string()
        });

        assert_eq!(fut.error(), Some(TestError::E1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_map_error() {
        let fut = Future::<i32, TestError>::rejected(TestError::E1).map_error(|e| format!("{:?}", e));
        assert_eq!(fut.error(), Some("E1".to_owned()));

        let fut = Future::<i32, TestError>::resolved(7).map_error(|_| "unused");
        assert_eq!(fut.value(), Some(7));
    }

    #[test]
    fn test_map_result_swaps_outcome() {
        let fut = Future::<i32, TestError>::rejected(TestError::E2)
            .map_result(|r| match r {
                Ok(_) => Err(()),
                Err(e) => Ok(format!("recovered from {:?}", e)),
            });

        assert_eq!(fut.value(), Some("recovered from E2".to_owned()));
    }

    #[test]
    fn test_flat_map_some() {
        let fut = Future::<i32, TestError>::resolved(3).flat_map(|x| Some(x.to_string()));
        assert_eq!(fut.value(), Some("3".to_owned()));
    }

    #[test]
    fn test_flat_map_none() {
        let fut = Future::<i32, TestError>::resolved(3).flat_map(|_| None::<String>);
        assert_eq!(fut.error(), Some(MapError::MappingError(3)));
    }

    #[test]
    fn test_flat_map_original_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let fut = Future::<i32, TestError>::rejected(TestError::E1).flat_map(move |x| {
            calls2.fetch_add(1, Ordering::SeqCst);
            Some(x)
        });

        assert_eq!(fut.error(), Some(MapError::OriginalError(TestError::E1)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_map_chain() {
        let promise = Promise::<i32, TestError>::new();
        let fut = promise.future()
            .map_value(|x| x + 1)
            .flat_map(|x| if x % 2 == 0 { Some(x / 2) } else { None })
            .map_error(|e| format!("{:?}", e));

        promise.resolve(9);
        assert_eq!(fut.value(), Some(5));
    }
}
