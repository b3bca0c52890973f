use std::fmt::{self, Debug, Formatter};

use crate::inner::{self, Shared};
use crate::promise::Promise;

/// An undetermined value.
///
/// A `Future` represents a value which may not yet be known. A corresponding
/// `Promise` resolves it exactly once. The pair is created with
/// [`future_promise()`]; a `Future` holding a known value is created with
/// [`Future::with_value`].
///
/// A `Future` is move-only and is consumed by whichever continuation
/// operation is applied to it, so at most one continuation can ever observe
/// the value.
pub struct Future<T>(Repr<T>);

enum Repr<T> {
    Ready(T),            // already resolved, value stored inline
    Pending(Shared<T>),  // resolution pending on the shared cell
}

impl<T> Future<T> {
    pub(crate) fn pending(cell: Shared<T>) -> Future<T> {
        Future(Repr::Pending(cell))
    }

    /// Construct an already resolved `Future`. It is equivalent to a
    /// `Future` whose `Promise` has already been fulfilled.
    ///
    /// ```
    /// # use deferred::Future;
    /// let (tx, rx) = std::sync::mpsc::channel();
    ///
    /// Future::with_value(123).callback_unit(move |v| tx.send(v).unwrap());
    ///
    /// assert_eq!(rx.try_recv(), Ok(123));
    /// ```
    #[inline]
    pub fn with_value(value: T) -> Future<T> {
        Future(Repr::Ready(value))
    }

    /// Set a callback to run in the resolving context.
    ///
    /// The callback receives the value together with a fresh `Promise` which
    /// is paired with the `Future` this function returns; the callback may
    /// set a value on it, chain another future into it with
    /// [`Promise::set_future`], pass it somewhere else, or drop it, leaving
    /// the returned `Future` forever pending.
    ///
    /// The callback runs on whatever thread resolves this future, or
    /// immediately on the calling thread if the value is already present.
    /// This is the most general continuation; see `then`, `flat_then` and
    /// `callback_unit` for the common cases.
    pub fn callback<U, F>(self, func: F) -> Future<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T, Promise<U>) + Send + 'static,
    {
        let (fut, prom) = future_promise();

        self.callback_unit(move |value| func(value, prom));

        fut
    }

    /// Set a callback which returns `()`.
    ///
    /// Installs a continuation run purely for its side effects. If the value
    /// is already present the callback runs immediately on the calling
    /// thread.
    pub fn callback_unit<F>(self, func: F)
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        match self.0 {
            Repr::Ready(value) => func(value),
            Repr::Pending(cell) => inner::install(&cell, func),
        }
    }

    /// Chain a synchronous function over the eventual value.
    ///
    /// When this `Future` resolves, `func` is applied to the value and its
    /// return appears in the returned `Future<U>`. The function runs in the
    /// resolving context, so it should be quick; it cannot itself be
    /// asynchronous. For a function returning another `Future` use
    /// [`flat_then`](Future::flat_then).
    ///
    /// ```
    /// # use deferred::future_promise;
    /// let (fut, prom) = future_promise();
    /// let fut = fut.then(|v: i32| v + 123);
    ///
    /// prom.set(1);
    ///
    /// let (tx, rx) = std::sync::mpsc::channel();
    /// fut.callback_unit(move |v| tx.send(v).unwrap());
    /// assert_eq!(rx.try_recv(), Ok(124));
    /// ```
    #[inline]
    pub fn then<U, F>(self, func: F) -> Future<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self.0 {
            Repr::Ready(value) => Future::with_value(func(value)),
            pending => Future(pending).callback(move |value, promise| promise.set(func(value))),
        }
    }

    /// Chain a future-returning function over the eventual value.
    ///
    /// The future returned by `func` is flattened: its eventual value, not
    /// the future itself, becomes the value of the returned `Future<U>`.
    ///
    /// ```
    /// # use deferred::{future_promise, Future};
    /// let fut = Future::with_value(2).flat_then(|i| {
    ///     let (fut, prom) = future_promise();
    ///     prom.set(i * 2);
    ///     fut
    /// });
    ///
    /// let (tx, rx) = std::sync::mpsc::channel();
    /// fut.callback_unit(move |v| tx.send(v).unwrap());
    /// assert_eq!(rx.try_recv(), Ok(4));
    /// ```
    pub fn flat_then<U, F>(self, func: F) -> Future<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        match self.0 {
            Repr::Ready(value) => func(value),
            pending => {
                Future(pending).callback(move |value, promise| promise.set_future(func(value)))
            }
        }
    }
}

impl<T: Debug> Debug for Future<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Ready(value) => write!(f, "Future(Ready({:?}))", value),
            Repr::Pending(cell) => write!(f, "Future(Pending({}))", cell.lock().state_name()),
        }
    }
}

/// Construct a bound `Future`/`Promise` pair.
///
/// The `Future` resolves when the `Promise` is fulfilled with
/// [`Promise::set`] or chained with [`Promise::set_future`]. If the
/// `Promise` is dropped unfulfilled the `Future` stays pending forever;
/// dropping the `Future` does not signal the `Promise`.
///
/// ```
/// # use deferred::future_promise;
/// let (fut, prom) = future_promise::<i32>();
/// # prom.set(1);
/// # drop(fut);
/// ```
pub fn future_promise<T>() -> (Future<T>, Promise<T>) {
    let cell = inner::new_shared();
    let fut = Future::pending(cell.clone());

    (fut, Promise::new(cell))
}
