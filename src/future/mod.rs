// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Most parts of this module use a certain pattern to describe template parameters.
// This pattern is "[TE][oc]" and is described as follows:
//
// T => The Ok(T) inside the stored or returned Result<T, _>
// E => The Err(E) inside the stored or returned Result<_, E>
//
// o => The o(utput) type of the current Promise/Future
// c => The c(ontinuation) type, i.e. the type of the Future returned by a
//      combinator like `.map_value()` or `.then()`

mod cores;
mod future;
mod join;
mod map;
mod promise;
mod then;

pub use self::future::*;
pub use self::join::*;
pub use self::promise::*;

/// Create a pending `Future` together with the `Promise` completing it
pub fn make<To, Eo>() -> (Promise<To, Eo>, Future<To, Eo>)
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    let promise = Promise::new();
    let future = promise.future();
    (promise, future)
}
