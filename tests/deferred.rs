use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use rxlite::{Disposable, DisposeBag, Observable, Subscribeable};

fn alternating() -> (Observable<i32>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_c = Arc::clone(&calls);
    let mut flip = false;

    let observable = Observable::deferred(move || {
        calls_c.fetch_add(1, Ordering::SeqCst);
        flip = !flip;
        if flip {
            Observable::of([1, 2, 3])
        } else {
            Observable::of([4, 5, 6])
        }
    });
    (observable, calls)
}

#[test]
fn factory_alternates_between_subscriptions() {
    let (mut factory, calls) = alternating();
    let bag = DisposeBag::new();
    let runs = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..4 {
        let run = Arc::new(Mutex::new(Vec::new()));
        let run_c = Arc::clone(&run);
        factory
            .subscribe_next(move |v| run_c.lock().unwrap().push(v))
            .disposed_by(&bag);
        runs.lock().unwrap().push(run.lock().unwrap().clone());
    }

    assert_eq!(
        *runs.lock().unwrap(),
        vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![1, 2, 3],
            vec![4, 5, 6]
        ]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn factory_is_not_called_before_subscription() {
    let (factory, calls) = alternating();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    drop(factory);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn independent_factories_keep_separate_state() {
    let (mut first, _) = alternating();
    let (mut second, _) = alternating();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = |observable: &mut Observable<i32>| {
        let seen = Arc::clone(&seen);
        observable.subscribe_next(move |v| seen.lock().unwrap().push(v));
    };

    record(&mut first);
    record(&mut second);
    record(&mut first);

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 1, 2, 3, 4, 5, 6]);
}
