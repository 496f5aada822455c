use std::{fmt, sync::Mutex};

use log::trace;

use super::{lock, subscribe::Disposable};

/// Owns any number of disposables and releases them together.
///
/// Members are disposed in the order they were added, either by an explicit
/// `dispose` call or when the bag is dropped. Once disposed, the bag stays
/// disposed: anything added afterwards is disposed right away.
///
/// ```
/// use rxlite::{Disposable, DisposeBag, Observable, Subscribeable};
///
/// let bag = DisposeBag::new();
///
/// Observable::of(["A", "B", "C"])
///     .subscribe_event(|event| println!("{}", event))
///     .disposed_by(&bag);
///
/// // Every subscription registered with `bag` is released here.
/// drop(bag);
/// ```
#[derive(Default)]
pub struct DisposeBag {
    state: Mutex<BagState>,
}

#[derive(Default)]
struct BagState {
    disposables: Vec<Box<dyn Disposable + Send>>,
    disposed: bool,
}

impl DisposeBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        DisposeBag::default()
    }

    /// Adds `disposable` to the bag, or disposes it immediately if the bag was
    /// already disposed.
    pub fn add<D>(&self, disposable: D)
    where
        D: Disposable + Send + 'static,
    {
        let mut state = lock(&self.state);
        if state.disposed {
            drop(state);
            trace!("disposable added to a disposed bag, disposing it");
            disposable.dispose();
            return;
        }
        state.disposables.push(Box::new(disposable));
    }

    /// Number of disposables waiting to be released.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).disposables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Disposable for DisposeBag {
    fn dispose(&self) {
        let disposables = {
            let mut state = lock(&self.state);
            state.disposed = true;
            std::mem::take(&mut state.disposables)
        };
        if !disposables.is_empty() {
            trace!("disposing bag with {} disposables", disposables.len());
        }
        for disposable in disposables {
            disposable.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        lock(&self.state).disposed
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("DisposeBag")
            .field("len", &state.disposables.len())
            .field("disposed", &state.disposed)
            .finish()
    }
}
