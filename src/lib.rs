//! Futures and Promises, chained by continuation
//! ==============================================
//!
//! Quick example:
//!
//! ```
//! use deferred::future_promise;
//! use std::sync::mpsc::channel;
//! use std::thread;
//!
//! let (fut, prom) = future_promise();
//!
//! // chain a computation over the eventual value
//! let fut = fut.then(|v: i32| v + 1);
//!
//! // route the final value somewhere observable
//! let (tx, rx) = channel();
//! fut.callback_unit(move |v| tx.send(v).unwrap());
//!
//! // some other context produces the value
//! thread::spawn(move || prom.set(123));
//!
//! assert_eq!(rx.recv(), Ok(124));
//! ```
//!
//! This crate implements a pair of concepts: [`Future`]s, a single-consumer
//! placeholder for a value which may not yet be known, and [`Promise`]s, a
//! write-once producer which sets the value. A pair is created with
//! [`future_promise()`]; a future holding a known value is created directly
//! with [`Future::with_value`].
//!
//! There is no scheduler and nothing ever blocks. A continuation attached
//! with [`Future::then`], [`Future::flat_then`], [`Future::callback`] or
//! [`Future::callback_unit`] runs synchronously on whichever thread fulfils
//! the promise, or immediately on the attaching thread if the value is
//! already present. Each operation consumes the future, so exactly one
//! continuation can observe the value, exactly once.
//!
//! A continuation may itself return a `Future`; [`Future::flat_then`]
//! flattens the nesting so the chain continues with the inner future's
//! eventual value. The same rule makes [`Promise::set_future`] accept a
//! future in place of a value.
//!
//! Fallible chains
//! ---------------
//!
//! Asynchronous operations that can fail resolve to an
//! [`Outcome`] (built on the general [`Either`] sum): `Success` carrying a
//! value or `Failure` carrying an error the library never interprets. On a
//! `Future<Outcome<T, E>>` the adapters `map_ok`, `and_then`,
//! `map_ok_future`, `and_then_future` observe only success, while `recover`,
//! `map_err`, `or_else`, `recover_future` and `or_else_future` observe only
//! failure; the other case short-circuits past them unchanged, so a chain
//! needs no per-step error plumbing and can still be rescued at any point.
//!
//! Groups of futures
//! -----------------
//!
//! [`when_any`] resolves with the first value from a group;
//! [`when_all`] gathers every value of a tuple or `Vec` of futures in
//! position order; [`when_all_success`] does the same for fallible futures,
//! short-circuiting on the first failure. [`repeat_until`] re-runs a
//! future-returning action until a predicate accepts the value, with
//! [`repeat_until_success`] and [`repeat_until_failure`] as the common
//! outcome-keyed forms.
//!
//! Completion-callback I/O engines are bridged with [`Handler`] and
//! [`StatusHandler`], which translate an `(error code, value)` invocation
//! into an outcome future (see [`ErrorCode`] and the [`UseFuture`] tag).

mod combinators;
mod either;
mod future;
mod handler;
mod inner;
mod outcome;
mod outcome_future;
mod promise;
mod task;
mod when_all;


pub use combinators::{repeat_until, repeat_until_failure, repeat_until_success, when_any};
pub use either::Either;
pub use future::{future_promise, Future};
pub use handler::{ErrorCode, Handler, StatusHandler, UseFuture};
pub use outcome::Outcome;
pub use outcome_future::flip;
pub use promise::Promise;
pub use task::PackagedTask;
pub use when_all::{when_all, when_all_success, WhenAll, WhenAllSuccess};
