//! Demonstrates keeping only the most recent readings with `BoundedHistory`.
//!
//! Run with: `cargo run --example bounded_history_basic`.

use bounded_history::BoundedHistory;

fn main() {
    let mut latest_readings = BoundedHistory::new(4);

    for reading in [12, 15, 11, 19, 23, 17] {
        latest_readings.insert(reading);
    }

    println!("Youngest to oldest: {:?}", latest_readings.iter().collect::<Vec<_>>());
    println!("Oldest retained: {:?}", latest_readings.oldest());

    match latest_readings.at(10) {
        Ok(value) => println!("Reading at age 10: {value}"),
        Err(e) => println!("No reading at age 10: {e}"),
    }
}
