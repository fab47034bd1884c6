//! Property tests for notification ordering, replay and distinct filtering.

use flare::{Disposable, Observable, ObservableExt, PublishSubject, Variable};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

type Events = Arc<Mutex<Vec<(u8, Option<u8>)>>>;

fn record<O: Observable<Item = u8>>(source: &O) -> (Events, Disposable) {
    let events = Events::default();
    let events_clone = events.clone();
    let subscription = source.subscribe(move |new, old| {
        events_clone.lock().push((*new, old.copied()));
    });
    (events, subscription)
}

/// Expected distinct output: keep a value when it differs from the last kept one.
fn dedup_pairs(values: &[u8]) -> Vec<(u8, Option<u8>)> {
    let mut out = Vec::new();
    let mut last: Option<u8> = None;
    for &value in values {
        if last != Some(value) {
            out.push((value, last));
            last = Some(value);
        }
    }
    out
}

proptest! {
    #[test]
    fn variable_always_holds_last_value(initial in any::<u8>(), updates in prop::collection::vec(any::<u8>(), 0..32)) {
        let variable = Variable::new(initial);
        prop_assert_eq!(variable.value(), initial);

        for &value in &updates {
            variable.update(value);
        }
        prop_assert_eq!(variable.value(), updates.last().copied().unwrap_or(initial));
    }

    #[test]
    fn variable_notifies_every_update_with_previous(initial in any::<u8>(), updates in prop::collection::vec(any::<u8>(), 0..32)) {
        let variable = Variable::new(initial);
        let (events, _subscription) = record(&variable);

        for &value in &updates {
            variable.update(value);
        }

        let mut expected = vec![(initial, None)];
        let mut previous = initial;
        for &value in &updates {
            expected.push((value, Some(previous)));
            previous = value;
        }
        prop_assert_eq!(events.lock().clone(), expected);
    }

    #[test]
    fn subscribers_agree(updates in prop::collection::vec(any::<u8>(), 0..32)) {
        let subject = PublishSubject::<u8>::new();
        let (first, _a) = record(&subject);
        let (second, _b) = record(&subject);

        for &value in &updates {
            subject.update(value);
        }

        prop_assert_eq!(first.lock().len(), updates.len());
        prop_assert_eq!(first.lock().clone(), second.lock().clone());
    }

    #[test]
    fn distinct_matches_dedup(updates in prop::collection::vec(0u8..4, 0..48)) {
        let subject = PublishSubject::<u8>::new();
        let events = Events::default();
        let events_clone = events.clone();
        let _subscription = subject.subscribe_distinct(move |new, old| {
            events_clone.lock().push((*new, old.copied()));
        });

        for &value in &updates {
            subject.update(value);
        }

        prop_assert_eq!(events.lock().clone(), dedup_pairs(&updates));
    }
}
