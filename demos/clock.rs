//! Clock view model driven by a timer, bound to a label.
//!
//! Run with `cargo run --example clock`.

use flare::{DisposeBag, ObservableExt, PublishSubject, Variable};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Stand-in for a UI text label.
#[derive(Debug, Default)]
struct Label {
    text: Option<String>,
}

struct ClockViewModel {
    time: Variable<String>,
    ticks: PublishSubject<u64>,
}

impl ClockViewModel {
    fn new() -> Self {
        Self {
            time: Variable::new(format_time(now_seconds())),
            ticks: PublishSubject::new(),
        }
    }

    fn tick(&self, tick: u64) {
        self.time.update(format_time(now_seconds()));
        self.ticks.update(tick);
    }
}

fn now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

fn format_time(seconds: u64) -> String {
    let day = seconds % 86_400;
    format!("{:02}:{:02}:{:02} UTC", day / 3600, day % 3600 / 60, day % 60)
}

fn main() {
    println!("=== Clock ===\n");

    let view_model = ClockViewModel::new();
    let label = Arc::new(Mutex::new(Label::default()));
    let mut bag = DisposeBag::new();

    // The label is written on every change and starts with the current time.
    view_model
        .time
        .bind_to(&label, |label: &mut Label| &mut label.text)
        .disposed_by(&mut bag);
    println!("Initial label: {:?}", label.lock().text);

    // Only print when the displayed text actually changes.
    view_model
        .time
        .subscribe_distinct(|new, old| match old {
            Some(old) => println!("   {old} -> {new}"),
            None => println!("   showing {new}"),
        })
        .disposed_by(&mut bag);

    view_model
        .ticks
        .subscribe_filtered(
            |tick, _| tick % 2 == 0,
            |tick, _| println!("   [even tick {tick}]"),
        )
        .disposed_by(&mut bag);

    for tick in 1..=4 {
        thread::sleep(Duration::from_millis(500));
        view_model.tick(tick);
    }

    println!("\nReleasing subscriptions");
    drop(bag);
    view_model.tick(5);

    println!("Final label: {:?}", label.lock().text);
}
