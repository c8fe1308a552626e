//! Records a few kinds of measurements and prints what was retained.
//!
//! Run with: `cargo run --example measurements_basic`.
//!
//! Pass `--verbose` to also print the `tracing` events emitted by the package.

use std::thread;
use std::time::Duration;

use measurements::{Capacity, FunctionCall, FunctionTiming, PeriodicEvent, Session};

fn main() {
    if std::env::args().any(|arg| arg == "--verbose") {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .init();
    }

    let session = Session::builder()
        .default_capacity(Capacity::Bounded(100))
        .build();

    // Only the latest three frame times are interesting.
    session.set_capacity::<FunctionTiming>("frame", Capacity::Bounded(3));

    for _ in 0..5 {
        session.record("frame", PeriodicEvent);

        let _span = session.measure_elapsed("frame");
        thread::sleep(Duration::from_millis(2));
    }

    // Every worker keeps its own call log.
    session.mark_thread_split::<FunctionCall>("worker_step");

    let workers: Vec<_> = (0..3)
        .map(|steps| {
            let session = session.clone();
            thread::spawn(move || {
                for _ in 0..=steps {
                    session.record("worker_step", FunctionCall);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    let frames = session
        .fetch::<PeriodicEvent>("frame")
        .expect("frame events are not split by thread");
    println!("frame events: {}", frames.len());

    let timings = session
        .fetch::<FunctionTiming>("frame")
        .expect("frame timings are not split by thread");
    for timing in &timings {
        println!("frame time: {:?}", timing.data());
    }

    let steps = session
        .fetch_for_all_threads::<FunctionCall>("worker_step")
        .expect("worker steps are split by thread");
    for (thread_id, calls) in &steps {
        println!("{thread_id:?} recorded {} steps", calls.len());
    }
}
