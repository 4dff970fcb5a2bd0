// Copyright 2016 The promise-chain Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate env_logger;
extern crate promise_chain;

use std::thread;
use std::time::Duration;

use promise_chain::{first_finished, make, zip, Future, MapError};

fn fetch(id: u32, delay_ms: u64) -> Future<String, String> {
    let (promise, future) = make();

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(delay_ms));
        if id == 0 {
            promise.reject("no record with id 0".to_owned());
        } else {
            promise.resolve(format!("{}", id * 7));
        }
    });

    future
}

fn main() {
    env_logger::init();

    let parsed = fetch(3, 30)
        .flat_map(|s| s.parse::<u32>().ok())
        .map_error(|err| match err {
            MapError::OriginalError(err) => err,
            MapError::MappingError(val) => format!("not a number: {}", val),
        });

    parsed.on_success(|v| println!("parsed {}", v))
          .on_failure(|err| println!("failed: {}", err));

    let all = zip(vec![fetch(1, 20), fetch(2, 10), fetch(4, 5)]);
    println!("zip: {:?}", all.wait());

    let race = first_finished(vec![fetch(0, 1), fetch(5, 15), fetch(6, 25)]);
    println!("first finished: {:?}", race.wait());

    let chained = fetch(8, 5).then(|s| fetch(s.len() as u32, 5));
    println!("then: {:?}", chained.block(Duration::from_secs(1)).result());

    parsed.wait().ok();
}
