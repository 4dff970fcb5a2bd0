// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

//  Permission is hereby granted, free of charge, to any person obtaining a
//  copy of this software and associated documentation files (the "Software"),
//  to deal in the Software without restriction, including without limitation
//  the rights to use, copy, modify, merge, publish, distribute, sublicense,
//  and/or sell copies of the Software, and to permit persons to whom the
//  Software is furnished to do so, subject to the following conditions:
//
//  The above copyright notice and this permission notice shall be included in
//  all copies or substantial portions of the Software.
//
//  THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
//  OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
//  FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
//  DEALINGS IN THE SOFTWARE.

//! Single-assignment futures and promises with chainable callbacks
//!
//! A `Promise` is the write side of a `Future`. Whoever performs some work
//! hands out the `Future` and completes the `Promise` exactly once, either
//! with `resolve` or `reject`. Consumers attach any number of callbacks to
//! the `Future` or derive new futures from it with combinators like
//! `map_value`, `flat_map`, `then`, `zip` or `first_finished`.
//!
//! There is no executor involved: callbacks run on the thread which
//! completes the `Promise`, or right away on the attaching thread if the
//! `Future` already completed.
//!
//! ```
//! use std::thread;
//!
//! use promise_chain::{make, zip};
//!
//! let (promise, future) = make::<u32, String>();
//!
//! let doubled = future.map_value(|v| v * 2);
//! let summed = zip(vec![future.clone(), doubled]).map_value(|v| v.iter().sum::<u32>());
//!
//! thread::spawn(move || promise.resolve(21));
//!
//! assert_eq!(summed.wait(), Ok(63));
//! ```

#[macro_use]
extern crate log;

pub use crate::error::MapError;
pub use crate::future::{first_finished, make, zip, Future, Promise};

pub mod future;
pub mod sync;
mod error;
