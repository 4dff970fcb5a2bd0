extern crate env_logger;
extern crate num_cpus;
extern crate promise_chain;
extern crate rand;

use std::sync::{Arc, Barrier, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use promise_chain::{first_finished, make, zip, Future, Promise};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn thread_count() -> usize {
    num_cpus::get().max(4)
}

#[test]
fn test_concurrent_completion_settles_once() {
    init_logger();

    for _ in 0..50 {
        let threads = thread_count();
        let promise = Arc::new(Promise::<usize, usize>::new());
        let fut = promise.future();
        let fired = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(threads));

        {
            let fired = fired.clone();
            fut.on_completion(move |_| { fired.fetch_add(1, Ordering::SeqCst); });
        }

        let handles: Vec<_> = (0..threads)
            .map(|id| {
                let promise = promise.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    if id % 2 == 0 {
                        promise.resolve(id);
                    } else {
                        promise.reject(id);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert!(fut.is_complete());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_concurrent_attach_during_completion() {
    init_logger();

    const PER_THREAD: usize = 200;

    for _ in 0..20 {
        let threads = thread_count();
        let (promise, fut) = make::<u32, ()>();
        let fired = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(threads + 1));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let fut = fut.clone();
                let fired = fired.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..PER_THREAD {
                        let fired = fired.clone();
                        fut.on_success(move |v| {
                            assert_eq!(v, 42);
                            fired.fetch_add(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();

        barrier.wait();
        promise.resolve(42);

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(fired.load(Ordering::SeqCst), threads * PER_THREAD);
    }
}

#[test]
fn test_zip_random_completion_order() {
    init_logger();

    let mut rng = rand::thread_rng();

    for _ in 0..20 {
        let count = rng.gen_range(1..32);
        let promises: Vec<_> = (0..count).map(|_| Arc::new(Promise::<usize, ()>::new())).collect();
        let joined = zip(promises.iter().map(|p| p.future()));

        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(&mut rng);

        let handles: Vec<_> = order.into_iter()
            .map(|idx| {
                let promise = promises[idx].clone();
                let delay = rng.gen_range(0..3);
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(delay));
                    promise.resolve(idx * 10);
                })
            })
            .collect();

        let values = joined.wait().unwrap();
        assert_eq!(values, (0..count).map(|i| i * 10).collect::<Vec<_>>());

        for h in handles {
            h.join().unwrap();
        }
    }
}

#[test]
fn test_first_finished_threaded_race() {
    init_logger();

    let threads = thread_count();
    let promises: Vec<_> = (0..threads).map(|_| Arc::new(Promise::<usize, usize>::new())).collect();
    let raced = first_finished(promises.iter().map(|p| p.future()));
    let winners = Arc::new(Mutex::new(Vec::new()));

    {
        let winners = winners.clone();
        raced.on_success(move |v| winners.lock().unwrap().push(v));
    }

    let handles: Vec<_> = promises.iter()
        .enumerate()
        .map(|(id, promise)| {
            let promise = promise.clone();
            thread::spawn(move || {
                // Only the last one succeeds, the race must still settle on it
                if id + 1 == threads {
                    promise.resolve(id);
                } else {
                    promise.reject(id);
                }
            })
        })
        .collect();

    assert_eq!(raced.wait(), Ok(threads - 1));

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(*winners.lock().unwrap(), vec![threads - 1]);
}

#[test]
fn test_then_across_threads() {
    init_logger();

    let (source, fut) = make::<u64, String>();

    let chained = fut.then(|v| {
        let (inner, inner_fut) = make::<u64, String>();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            inner.resolve(v + 1);
        });
        inner_fut
    });

    thread::spawn(move || source.resolve(1));

    assert_eq!(chained.wait(), Ok(2));
}

#[test]
fn test_block_gives_up_then_completes() {
    init_logger();

    let (promise, fut) = make::<&'static str, ()>();

    assert!(!fut.block(Duration::from_millis(10)).is_complete());

    let h = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        promise.resolve("done");
    });

    assert_eq!(fut.block(Duration::from_secs(10)).value(), Some("done"));
    h.join().unwrap();
}

#[test]
fn test_futures_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Future<String, String>>();
    assert_send_sync::<Promise<Vec<u8>, ()>>();
}
