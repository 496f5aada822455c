use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use proptest::prelude::*;
use rxlite::{
    Disposable, DisposeBag, Event, Observable, Observer, Subscribeable, Subscriber, Subscription,
};

fn record<T: Send + 'static>(observable: &mut Observable<T>) -> Vec<Event<T>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_c = Arc::clone(&events);
    observable.subscribe_event(move |e| events_c.lock().unwrap().push(e));
    let mut events = events.lock().unwrap();
    std::mem::take(&mut *events)
}

proptest! {
    /// `from` emits every element in order, followed by exactly one completion.
    #[test]
    fn from_replays_sequence_then_completes(values in proptest::collection::vec(any::<i32>(), 0..64)) {
        let events = record(&mut Observable::from(values.clone()));

        prop_assert_eq!(events.len(), values.len() + 1);
        let elements: Vec<i32> = events.iter().filter_map(|e| e.element().copied()).collect();
        prop_assert_eq!(elements, values);
        prop_assert!(events.last().is_some_and(Event::is_completed));
    }

    /// Repeated dispose calls release the producer exactly once.
    #[test]
    fn dispose_is_idempotent(calls in 1usize..16) {
        let cleanups = Arc::new(AtomicUsize::new(0));
        let cleanups_c = Arc::clone(&cleanups);
        let mut observable = Observable::<u8>::create(move |_| {
            let cleanups = Arc::clone(&cleanups_c);
            Subscription::from_fn(move || {
                cleanups.fetch_add(1, Ordering::SeqCst);
            })
        });

        let subscription = observable.subscribe(Subscriber::empty());
        for _ in 0..calls {
            subscription.dispose();
        }

        prop_assert!(subscription.is_disposed());
        prop_assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }

    /// Nothing emitted after a terminal event reaches the observer.
    #[test]
    fn terminal_event_closes_sequence(
        before in proptest::collection::vec(any::<u16>(), 0..16),
        after in proptest::collection::vec(any::<u16>(), 0..16),
        fail in any::<bool>(),
    ) {
        let (before_c, after_c) = (before.clone(), after.clone());
        let mut observable = Observable::create(move |mut o| {
            for v in &before_c {
                o.next(*v);
            }
            if fail {
                o.error("stopped".into());
            } else {
                o.complete();
            }
            for v in &after_c {
                o.next(*v);
            }
            o.complete();
            Subscription::empty()
        });

        let events = record(&mut observable);

        prop_assert_eq!(events.len(), before.len() + 1);
        prop_assert!(events.last().is_some_and(Event::is_stop_event));
        prop_assert_eq!(events.iter().filter(|e| e.is_stop_event()).count(), 1);
    }

    /// A bag disposes its members in insertion order, once.
    #[test]
    fn bag_preserves_insertion_order(members in 0usize..32) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bag = DisposeBag::new();
        for i in 0..members {
            let log = Arc::clone(&log);
            Subscription::from_fn(move || log.lock().unwrap().push(i)).disposed_by(&bag);
        }

        bag.dispose();
        bag.dispose();

        prop_assert_eq!(log.lock().unwrap().clone(), (0..members).collect::<Vec<_>>());
    }

    /// A toggling factory alternates sequences across subscriptions.
    #[test]
    fn deferred_factory_alternates(subscriptions in 1usize..12) {
        let mut flip = false;
        let mut observable = Observable::deferred(move || {
            flip = !flip;
            if flip {
                Observable::of([1, 2, 3])
            } else {
                Observable::of([4, 5, 6])
            }
        });

        for n in 0..subscriptions {
            let elements: Vec<i32> = record(&mut observable)
                .iter()
                .filter_map(|e| e.element().copied())
                .collect();
            let expected = if n % 2 == 0 { vec![1, 2, 3] } else { vec![4, 5, 6] };
            prop_assert_eq!(elements, expected);
        }
    }
}
