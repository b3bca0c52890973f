//! Adapters between callback-style I/O completion and futures.
//!
//! An asynchronous I/O engine reports completion by invoking a handler with
//! an error code, possibly accompanied by a value. [`Handler`] and
//! [`StatusHandler`] bridge those two shapes onto a
//! `Future<Outcome<.., E>>`: an operation invoked with the [`UseFuture`] tag
//! constructs a handler, returns [`Handler::future`] to the caller, and
//! hands the handler (it is cheap to clone) to the engine, which may
//! complete it from any thread.
//!
//! The error type is the engine's own; the only thing required of it is the
//! [`ErrorCode`] falsiness test.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::future::{future_promise, Future};
use crate::outcome::Outcome::{self, Failure, Success};
use crate::promise::Promise;

/// Tag requesting the future-returning form of an asynchronous operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseFuture;

/// A completion code which may or may not denote an error.
pub trait ErrorCode {
    /// Returns true if the code denotes an error.
    fn is_error(&self) -> bool;
}

/// `None` is success, `Some(error)` is failure.
impl<E> ErrorCode for Option<E> {
    fn is_error(&self) -> bool {
        self.is_some()
    }
}

struct HandlerShared<T, E> {
    promise: Mutex<Option<Promise<Outcome<T, E>>>>,
    future: Mutex<Option<Future<Outcome<T, E>>>>,
}

impl<T, E> HandlerShared<T, E> {
    fn new() -> Arc<HandlerShared<T, E>> {
        let (future, promise) = future_promise();

        Arc::new(HandlerShared {
            promise: Mutex::new(Some(promise)),
            future: Mutex::new(Some(future)),
        })
    }

    fn take_future(&self) -> Future<Outcome<T, E>> {
        self.future.lock().take().expect("handler future already taken")
    }

    fn settle(&self, outcome: Outcome<T, E>) {
        // Only the first completion settles; an engine invoking the handler
        // again is ignored. The slot lock is released before the promise
        // runs any continuation.
        let promise = self.promise.lock().take();

        if let Some(promise) = promise {
            promise.set(outcome);
        }
    }
}

/// Completion handler for operations reporting `(code, value)`.
///
/// Cloneable and callable from any thread; the first call to
/// [`complete`](Handler::complete) resolves the paired future with
/// `Success(value)` when the code is not an error, or `Failure(code)` when
/// it is.
pub struct Handler<T, E> {
    shared: Arc<HandlerShared<T, E>>,
}

impl<T, E> Handler<T, E> {
    /// Construct a handler with a fresh promise/future pair.
    pub fn new() -> Handler<T, E> {
        Handler {
            shared: HandlerShared::new(),
        }
    }

    /// Take the future resolved by this handler's completion.
    ///
    /// Panics if called a second time.
    pub fn future(&self) -> Future<Outcome<T, E>> {
        self.shared.take_future()
    }

    /// Report completion.
    pub fn complete(&self, code: E, value: T)
    where
        E: ErrorCode,
    {
        if code.is_error() {
            self.shared.settle(Failure(code));
        } else {
            self.shared.settle(Success(value));
        }
    }
}

impl<T, E> Clone for Handler<T, E> {
    fn clone(&self) -> Handler<T, E> {
        Handler {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Default for Handler<T, E> {
    fn default() -> Handler<T, E> {
        Handler::new()
    }
}

impl<T, E> From<UseFuture> for Handler<T, E> {
    fn from(_: UseFuture) -> Handler<T, E> {
        Handler::new()
    }
}

/// Completion handler for operations reporting only a `(code)`.
///
/// The paired future resolves with `Success(())` or `Failure(code)`.
pub struct StatusHandler<E> {
    shared: Arc<HandlerShared<(), E>>,
}

impl<E> StatusHandler<E> {
    /// Construct a handler with a fresh promise/future pair.
    pub fn new() -> StatusHandler<E> {
        StatusHandler {
            shared: HandlerShared::new(),
        }
    }

    /// Take the future resolved by this handler's completion.
    ///
    /// Panics if called a second time.
    pub fn future(&self) -> Future<Outcome<(), E>> {
        self.shared.take_future()
    }

    /// Report completion.
    pub fn complete(&self, code: E)
    where
        E: ErrorCode,
    {
        if code.is_error() {
            self.shared.settle(Failure(code));
        } else {
            self.shared.settle(Success(()));
        }
    }
}

impl<E> Clone for StatusHandler<E> {
    fn clone(&self) -> StatusHandler<E> {
        StatusHandler {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> Default for StatusHandler<E> {
    fn default() -> StatusHandler<E> {
        StatusHandler::new()
    }
}

impl<E> From<UseFuture> for StatusHandler<E> {
    fn from(_: UseFuture) -> StatusHandler<E> {
        StatusHandler::new()
    }
}
