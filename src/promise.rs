use std::fmt::{self, Debug, Formatter};

use crate::future::Future;
use crate::inner::{self, Shared};

/// A box for resolving a `Future`.
///
/// A `Promise` is a write-once producer handle paired with exactly one
/// `Future`. It is created with [`future_promise()`](crate::future_promise)
/// and consumed by [`set`](Promise::set) or
/// [`set_future`](Promise::set_future), so a promise can be fulfilled at
/// most once. Dropping a `Promise` unfulfilled leaves its `Future` pending
/// forever.
pub struct Promise<T>(Shared<T>);

impl<T> Promise<T> {
    pub(crate) fn new(cell: Shared<T>) -> Promise<T> {
        Promise(cell)
    }

    /// Fulfill the `Promise`, resolving the corresponding `Future`.
    ///
    /// If a continuation is installed on the future it runs synchronously on
    /// the calling thread, after the cell lock has been released.
    pub fn set(self, value: T) {
        inner::settle(&self.0, value)
    }

    /// Fulfill the `Promise` with the eventual value of another `Future`.
    ///
    /// If `other` is already resolved, its value resolves this promise
    /// immediately. Otherwise a forwarding continuation is installed on
    /// `other`, so that fulfilling `other` resolves this promise's future,
    /// whether or not that future has a continuation installed by then. This
    /// is the mechanism behind [`Future::flat_then`] flattening.
    pub fn set_future(self, other: Future<T>)
    where
        T: Send + 'static,
    {
        let Promise(target) = self;

        other.callback_unit(move |value| inner::settle(&target, value));
    }
}

impl<T> Debug for Promise<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Promise({})", self.0.lock().state_name())
    }
}
