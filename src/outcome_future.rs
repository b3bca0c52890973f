//! Composition rules for futures of outcomes.
//!
//! A `Future<Outcome<T, E>>` is the common shape of an asynchronous fallible
//! operation. The methods in this module let a continuation observe just the
//! success value or just the error, with the other case short-circuiting
//! past it unchanged, and flatten whatever the continuation returns back
//! into a `Future<Outcome<..>>`:
//!
//! | continuation | runs on | returns |
//! |---|---|---|
//! | `map_ok(T -> U)` | success | `Future<Outcome<U, E>>` |
//! | `and_then(T -> Outcome<U, E>)` | success | `Future<Outcome<U, E>>` |
//! | `map_ok_future(T -> Future<U>)` | success | `Future<Outcome<U, E>>` |
//! | `and_then_future(T -> Future<Outcome<U, E>>)` | success | `Future<Outcome<U, E>>` |
//! | `recover(E -> T)` | failure | `Future<Outcome<T, E>>` |
//! | `map_err(E -> E2)` | failure | `Future<Outcome<T, E2>>` |
//! | `or_else(E -> Outcome<T, E>)` | failure | `Future<Outcome<T, E>>` |
//! | `recover_future(E -> Future<T>)` | failure | `Future<Outcome<T, E>>` |
//! | `or_else_future(E -> Future<Outcome<T, E>>)` | failure | `Future<Outcome<T, E>>` |
//! | `always(() -> U)` | either | `Future<U>` |
//!
//! The raw outcome is still available through the ordinary
//! [`then`](crate::Future::then).

use crate::future::Future;
use crate::outcome::Outcome::{self, Failure, Success};

/// Turn an outcome holding a future inside-out.
///
/// A success holding `Future<T>` becomes a future of `Success(T)` once the
/// inner future resolves; a failure becomes an already-resolved future of
/// that failure. This is the pivot on which the success-side flattening
/// adapters turn.
pub fn flip<T, E>(outcome: Outcome<Future<T>, E>) -> Future<Outcome<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    match outcome {
        Success(future) => future.then(Success),
        Failure(error) => Future::with_value(Failure(error)),
    }
}

impl<T, E> Future<Outcome<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// An already resolved successful outcome.
    pub fn success(value: T) -> Future<Outcome<T, E>> {
        Future::with_value(Success(value))
    }

    /// An already resolved failed outcome.
    pub fn failure(error: E) -> Future<Outcome<T, E>> {
        Future::with_value(Failure(error))
    }

    /// Chain a function over the success value.
    ///
    /// A failure short-circuits past `func` unchanged.
    ///
    /// ```
    /// # use deferred::{Future, Outcome};
    /// let fut = Future::<Outcome<i32, ()>>::success(21).map_ok(|v| v * 2);
    ///
    /// let (tx, rx) = std::sync::mpsc::channel();
    /// fut.callback_unit(move |o| tx.send(o).unwrap());
    /// assert_eq!(rx.try_recv(), Ok(Outcome::Success(42)));
    /// ```
    pub fn map_ok<U, F>(self, func: F) -> Future<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.then(move |outcome| outcome.map(func))
    }

    /// Chain an outcome-returning function over the success value.
    ///
    /// The returned outcome replaces this one; a failure short-circuits
    /// past `func` unchanged.
    pub fn and_then<U, F>(self, func: F) -> Future<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'static,
    {
        self.then(move |outcome| outcome.and_then(func))
    }

    /// Chain a future-returning function over the success value.
    ///
    /// The eventual value of the returned future is wrapped back into a
    /// success; a failure short-circuits past `func` unchanged.
    pub fn map_ok_future<U, F>(self, func: F) -> Future<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        self.flat_then(move |outcome| flip(outcome.map(func)))
    }

    /// Chain an asynchronous fallible function over the success value.
    ///
    /// The returned future's outcome replaces this one, with no double
    /// wrapping; a failure short-circuits past `func` unchanged.
    pub fn and_then_future<U, F>(self, func: F) -> Future<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Future<Outcome<U, E>> + Send + 'static,
    {
        self.flat_then(move |outcome| match outcome {
            Success(value) => func(value),
            Failure(error) => Future::failure(error),
        })
    }

    /// Turn a failure into a success by computing a substitute value.
    ///
    /// A success short-circuits past `func` unchanged.
    pub fn recover<F>(self, func: F) -> Future<Outcome<T, E>>
    where
        F: FnOnce(E) -> T + Send + 'static,
    {
        self.then(move |outcome| outcome.recover(func))
    }

    /// Remap the error; a success short-circuits past `func` unchanged.
    pub fn map_err<E2, F>(self, func: F) -> Future<Outcome<T, E2>>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.then(move |outcome| outcome.map_err(func))
    }

    /// Chain an outcome-returning function over the error.
    ///
    /// The returned outcome replaces this one; a success short-circuits
    /// past `func` unchanged.
    pub fn or_else<F>(self, func: F) -> Future<Outcome<T, E>>
    where
        F: FnOnce(E) -> Outcome<T, E> + Send + 'static,
    {
        self.then(move |outcome| outcome.or_else(func))
    }

    /// Turn a failure into a success via an asynchronous substitute.
    ///
    /// The eventual value of the returned future is wrapped into a success;
    /// a success short-circuits past `func` unchanged.
    pub fn recover_future<F>(self, func: F) -> Future<Outcome<T, E>>
    where
        F: FnOnce(E) -> Future<T> + Send + 'static,
    {
        self.flat_then(move |outcome| match outcome {
            Success(value) => Future::success(value),
            Failure(error) => func(error).then(Success),
        })
    }

    /// Chain an asynchronous fallible function over the error.
    ///
    /// The returned future's outcome replaces this one; a success
    /// short-circuits past `func` unchanged.
    pub fn or_else_future<F>(self, func: F) -> Future<Outcome<T, E>>
    where
        F: FnOnce(E) -> Future<Outcome<T, E>> + Send + 'static,
    {
        self.flat_then(move |outcome| match outcome {
            Success(value) => Future::success(value),
            Failure(error) => func(error),
        })
    }

    /// Run a continuation on either outcome, discarding it.
    pub fn always<U, F>(self, func: F) -> Future<U>
    where
        U: Send + 'static,
        F: FnOnce() -> U + Send + 'static,
    {
        self.then(move |_| func())
    }
}
