//! First-wins selection and predicate-driven repetition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::future::{future_promise, Future};
use crate::outcome::Outcome;
use crate::promise::Promise;

struct AnyShared<T> {
    claimed: AtomicBool,
    promise: Mutex<Option<Promise<T>>>,
}

impl<T> AnyShared<T> {
    fn resolve(&self, value: T) {
        // First claimant wins; later resolutions have no observable effect.
        // The slot lock is released before the promise runs any
        // continuation.
        if !self.claimed.swap(true, Ordering::AcqRel) {
            let promise = self.promise.lock().take();

            if let Some(promise) = promise {
                promise.set(value);
            }
        }
    }
}

/// Return a `Future` resolving with the first available value from the
/// inputs.
///
/// Every other input's value is discarded. An empty input produces a future
/// that never resolves.
///
/// ```
/// # use deferred::{future_promise, when_any};
/// let (f1, p1) = future_promise();
/// let (f2, p2) = future_promise();
///
/// let first = when_any([f1, f2]);
///
/// p1.set(1000);
/// p2.set(2000);
///
/// let (tx, rx) = std::sync::mpsc::channel();
/// first.callback_unit(move |v| tx.send(v).unwrap());
/// assert_eq!(rx.try_recv(), Ok(1000));
/// ```
pub fn when_any<T, I>(futures: I) -> Future<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let (fut, prom) = future_promise();
    let shared = Arc::new(AnyShared {
        claimed: AtomicBool::new(false),
        promise: Mutex::new(Some(prom)),
    });

    for future in futures {
        let shared = Arc::clone(&shared);
        future.callback_unit(move |value| shared.resolve(value));
    }

    fut
}

/// Repeatedly run a future-returning action until its value satisfies the
/// predicate.
///
/// The returned future resolves with the first satisfying value. Each
/// repetition is armed from within the previous one's continuation, so an
/// action whose futures resolve elsewhere consumes no stack between steps.
pub fn repeat_until<A, P, V>(mut action: A, predicate: P) -> Future<V>
where
    A: FnMut() -> Future<V> + Send + 'static,
    P: Fn(&V) -> bool + Send + 'static,
    V: Send + 'static,
{
    let (fut, prom) = future_promise();

    let step = action();
    advance(step, action, predicate, prom);

    fut
}

fn advance<A, P, V>(step: Future<V>, mut action: A, predicate: P, promise: Promise<V>)
where
    A: FnMut() -> Future<V> + Send + 'static,
    P: Fn(&V) -> bool + Send + 'static,
    V: Send + 'static,
{
    step.callback_unit(move |value| {
        if predicate(&value) {
            promise.set(value);
        } else {
            let step = action();
            advance(step, action, predicate, promise);
        }
    });
}

/// Repeat a fallible asynchronous action until it succeeds.
///
/// The returned future resolves with the first successful outcome; failures
/// are discarded and the action runs again.
pub fn repeat_until_success<A, T, E>(action: A) -> Future<Outcome<T, E>>
where
    A: FnMut() -> Future<Outcome<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    repeat_until(action, |outcome| outcome.is_success())
}

/// Repeat a fallible asynchronous action until it fails.
///
/// The returned future resolves with the first failed outcome; successes
/// are discarded and the action runs again. Typical for serve-until-error
/// loops.
pub fn repeat_until_failure<A, T, E>(action: A) -> Future<Outcome<T, E>>
where
    A: FnMut() -> Future<Outcome<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    repeat_until(action, |outcome| outcome.is_failure())
}
