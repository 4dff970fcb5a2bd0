// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of fallible maps

use thiserror::Error;

/// The error of a `Future` created by `Future::flat_map`.
///
/// `Ti` is the value type and `Ei` the error type of the source `Future`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MapError<Ti, Ei> {
    /// The source failed, the transform was never invoked
    #[error("source future failed: {0}")]
    OriginalError(Ei),

    /// The source succeeded but the transform rejected its value
    #[error("unable to map value {0:?}")]
    MappingError(Ti),
}

impl<Ti, Ei> MapError<Ti, Ei> {
    pub fn is_mapping_error(&self) -> bool {
        match *self {
            MapError::MappingError(..) => true,
            MapError::OriginalError(..) => false,
        }
    }

    /// The error of the source `Future`, if it failed
    pub fn original(&self) -> Option<&Ei> {
        match *self {
            MapError::OriginalError(ref err) => Some(err),
            MapError::MappingError(..) => None,
        }
    }

    /// The value the transform refused to map
    pub fn unmapped(&self) -> Option<&Ti> {
        match *self {
            MapError::MappingError(ref val) => Some(val),
            MapError::OriginalError(..) => None,
        }
    }
}
