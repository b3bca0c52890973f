//! Aggregation of independent futures: all values, or all successes.
//!
//! [`when_all`] accepts a tuple of futures (mixed value types, arities up to
//! eight) or a `Vec` of futures of one type, and resolves with every value
//! once the last input resolves, in position order regardless of resolution
//! order.
//!
//! [`when_all_success`] is the outcome-aware variant: all inputs succeeding
//! yields a success carrying every value; the first-resolved failure settles
//! the output immediately and everything after it is ignored.

use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::future::{future_promise, Future};
use crate::outcome::Outcome::{self, Failure, Success};
use crate::promise::Promise;

struct AllShared<S, O> {
    slots: S,
    pending: usize,
    promise: Option<Promise<O>>,
}

/// Position-indexed storage filled in by per-input continuations.
trait Slots: Default {
    type Values;

    fn collect(self) -> Self::Values;
}

impl<T> Slots for Vec<Option<T>> {
    type Values = Vec<T>;

    fn collect(self) -> Vec<T> {
        self.into_iter()
            .map(|slot| slot.expect("input future unresolved"))
            .collect()
    }
}

/// A fixed collection of futures that can be awaited together.
///
/// Implemented for tuples of futures up to arity eight and for
/// `Vec<Future<T>>`. Use through [`when_all`].
pub trait WhenAll {
    /// The aggregate of every input's value.
    type Values;

    /// See [`when_all`].
    fn when_all(self) -> Future<Self::Values>;
}

/// A fixed collection of fallible futures sharing one error type.
///
/// Implemented for tuples of `Future<Outcome<T, E>>` up to arity eight and
/// for `Vec<Future<Outcome<T, E>>>`. Use through [`when_all_success`].
pub trait WhenAllSuccess {
    /// The aggregate of every input's success value.
    type Values;
    /// The error type shared by every input.
    type Error;

    /// See [`when_all_success`].
    fn when_all_success(self) -> Future<Outcome<Self::Values, Self::Error>>;
}

/// Return a `Future` of the values of all input futures.
///
/// The i-th component of the output is the value the i-th input resolved
/// to, whatever order the inputs resolve in. The inputs are consumed.
///
/// ```
/// # use deferred::{future_promise, when_all, Future};
/// let (f1, p1) = future_promise();
/// let both = when_all((f1, Future::with_value("ready")));
///
/// p1.set(1000);
///
/// let (tx, rx) = std::sync::mpsc::channel();
/// both.callback_unit(move |values| tx.send(values).unwrap());
/// assert_eq!(rx.try_recv(), Ok((1000, "ready")));
/// ```
pub fn when_all<C: WhenAll>(futures: C) -> Future<C::Values> {
    futures.when_all()
}

/// Return a `Future` resolving once every input succeeds or any input
/// fails.
///
/// All successes yield `Success` of the collected values; the first
/// failure to resolve yields that `Failure` immediately, without waiting
/// for the remaining inputs, whose resolutions are then ignored.
pub fn when_all_success<C: WhenAllSuccess>(futures: C) -> Future<Outcome<C::Values, C::Error>> {
    futures.when_all_success()
}

impl<T> WhenAll for Vec<Future<T>>
where
    T: Send + 'static,
{
    type Values = Vec<T>;

    fn when_all(self) -> Future<Vec<T>> {
        let (fut, prom) = future_promise();

        if self.is_empty() {
            prom.set(Vec::new());
            return fut;
        }

        let shared = Arc::new(Mutex::new(AllShared {
            slots: (0..self.len()).map(|_| None).collect::<Vec<Option<T>>>(),
            pending: self.len(),
            promise: Some(prom),
        }));

        for (index, future) in self.into_iter().enumerate() {
            let shared = Arc::clone(&shared);
            future.callback_unit(move |value| {
                let finished = {
                    let mut lk = shared.lock();
                    lk.slots[index] = Some(value);
                    lk.pending -= 1;

                    if lk.pending == 0 {
                        let slots = mem::take(&mut lk.slots);
                        lk.promise.take().map(|promise| (promise, slots.collect()))
                    } else {
                        None
                    }
                };

                if let Some((promise, values)) = finished {
                    promise.set(values);
                }
            });
        }

        fut
    }
}

impl<T, E> WhenAllSuccess for Vec<Future<Outcome<T, E>>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Values = Vec<T>;
    type Error = E;

    fn when_all_success(self) -> Future<Outcome<Vec<T>, E>> {
        let (fut, prom) = future_promise();

        if self.is_empty() {
            prom.set(Success(Vec::new()));
            return fut;
        }

        let shared = Arc::new(Mutex::new(AllShared {
            slots: (0..self.len()).map(|_| None).collect::<Vec<Option<T>>>(),
            pending: self.len(),
            promise: Some(prom),
        }));

        for (index, future) in self.into_iter().enumerate() {
            let shared = Arc::clone(&shared);
            future.callback_unit(move |outcome| {
                let finished = {
                    let mut lk = shared.lock();
                    match outcome {
                        Success(value) => {
                            lk.slots[index] = Some(value);
                            lk.pending -= 1;

                            if lk.pending == 0 {
                                let slots = mem::take(&mut lk.slots);
                                lk.promise
                                    .take()
                                    .map(|promise| (promise, Success(slots.collect())))
                            } else {
                                None
                            }
                        }
                        // First failure claims the promise; everything
                        // resolving after this point is ignored.
                        Failure(error) => lk.promise.take().map(|promise| (promise, Failure(error))),
                    }
                };

                if let Some((promise, outcome)) = finished {
                    promise.set(outcome);
                }
            });
        }

        fut
    }
}

macro_rules! slots_tuple {
    ($(($T:ident, $idx:tt)),+) => {
        impl<$($T),+> Slots for ($(Option<$T>,)+) {
            type Values = ($($T,)+);

            fn collect(self) -> Self::Values {
                ($(self.$idx.expect("input future unresolved"),)+)
            }
        }
    };
}

macro_rules! when_all_tuple {
    ($len:expr; $(($T:ident, $idx:tt)),+) => {
        impl<$($T: Send + 'static),+> WhenAll for ($(Future<$T>,)+) {
            type Values = ($($T,)+);

            #[allow(non_snake_case)]
            fn when_all(self) -> Future<Self::Values> {
                let (fut, prom) = future_promise();
                let shared = Arc::new(Mutex::new(AllShared {
                    slots: ($(None::<$T>,)+),
                    pending: $len,
                    promise: Some(prom),
                }));

                let ($($T,)+) = self;
                $({
                    let shared = Arc::clone(&shared);
                    $T.callback_unit(move |value| {
                        let finished = {
                            let mut lk = shared.lock();
                            lk.slots.$idx = Some(value);
                            lk.pending -= 1;

                            if lk.pending == 0 {
                                let slots = mem::take(&mut lk.slots);
                                lk.promise.take().map(|promise| (promise, slots.collect()))
                            } else {
                                None
                            }
                        };

                        if let Some((promise, values)) = finished {
                            promise.set(values);
                        }
                    });
                })+

                fut
            }
        }
    };
}

macro_rules! when_all_success_tuple {
    ($len:expr; $(($T:ident, $idx:tt)),+) => {
        impl<Err: Send + 'static, $($T: Send + 'static),+> WhenAllSuccess
            for ($(Future<Outcome<$T, Err>>,)+)
        {
            type Values = ($($T,)+);
            type Error = Err;

            #[allow(non_snake_case)]
            fn when_all_success(self) -> Future<Outcome<Self::Values, Err>> {
                let (fut, prom) = future_promise();
                let shared = Arc::new(Mutex::new(AllShared {
                    slots: ($(None::<$T>,)+),
                    pending: $len,
                    promise: Some(prom),
                }));

                let ($($T,)+) = self;
                $({
                    let shared = Arc::clone(&shared);
                    $T.callback_unit(move |outcome| {
                        let finished = {
                            let mut lk = shared.lock();
                            match outcome {
                                Success(value) => {
                                    lk.slots.$idx = Some(value);
                                    lk.pending -= 1;

                                    if lk.pending == 0 {
                                        let slots = mem::take(&mut lk.slots);
                                        lk.promise
                                            .take()
                                            .map(|promise| (promise, Success(slots.collect())))
                                    } else {
                                        None
                                    }
                                }
                                Failure(error) => {
                                    lk.promise.take().map(|promise| (promise, Failure(error)))
                                }
                            }
                        };

                        if let Some((promise, outcome)) = finished {
                            promise.set(outcome);
                        }
                    });
                })+

                fut
            }
        }
    };
}

slots_tuple!((T0, 0));
slots_tuple!((T0, 0), (T1, 1));
slots_tuple!((T0, 0), (T1, 1), (T2, 2));
slots_tuple!((T0, 0), (T1, 1), (T2, 2), (T3, 3));
slots_tuple!((T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4));
slots_tuple!((T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5));
slots_tuple!((T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6));
slots_tuple!((T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6), (T7, 7));

when_all_tuple!(1; (T0, 0));
when_all_tuple!(2; (T0, 0), (T1, 1));
when_all_tuple!(3; (T0, 0), (T1, 1), (T2, 2));
when_all_tuple!(4; (T0, 0), (T1, 1), (T2, 2), (T3, 3));
when_all_tuple!(5; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4));
when_all_tuple!(6; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5));
when_all_tuple!(7; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6));
when_all_tuple!(8; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6), (T7, 7));

when_all_success_tuple!(1; (T0, 0));
when_all_success_tuple!(2; (T0, 0), (T1, 1));
when_all_success_tuple!(3; (T0, 0), (T1, 1), (T2, 2));
when_all_success_tuple!(4; (T0, 0), (T1, 1), (T2, 2), (T3, 3));
when_all_success_tuple!(5; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4));
when_all_success_tuple!(6; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5));
when_all_success_tuple!(7; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6));
when_all_success_tuple!(8; (T0, 0), (T1, 1), (T2, 2), (T3, 3), (T4, 4), (T5, 5), (T6, 6), (T7, 7));
