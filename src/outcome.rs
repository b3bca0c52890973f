//! The success-or-failure sum type carried through future chains.

use crate::either::Either;

/// The outcome of an operation: a success value or a failure error.
///
/// `Outcome<T, E>` is [`Either`] with its alternatives given meaning: the
/// first denotes success, the second failure. It is deliberately distinct
/// from `std::result::Result`, which stays available for ordinary fallible
/// functions; `Outcome` is the domain value that future chains route,
/// short-circuit and rescue (see the methods on
/// [`Future<Outcome<T, E>>`](crate::Future)).
///
/// Success with no payload is simply `Outcome<(), E>`.
///
/// ```
/// use deferred::Outcome;
///
/// let doubled = Outcome::<i32, String>::Success(21).map(|v| v * 2);
/// assert_eq!(doubled, Outcome::Success(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation produced a value.
    Success(T),
    /// The operation failed with an error.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns true if this is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns true if this is a `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Returns the success value, if present.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the error, if present.
    pub fn failure(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrowing view of the outcome.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Apply a function to the success value; a failure passes through
    /// unchanged.
    pub fn map<U, F>(self, func: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(func(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Apply a function to the error; a success passes through unchanged.
    pub fn map_err<F2, F>(self, func: F) -> Outcome<T, F2>
    where
        F: FnOnce(E) -> F2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(func(error)),
        }
    }

    /// Chain an outcome-returning function over the success value.
    ///
    /// The returned outcome is not wrapped again; a failure passes through
    /// unchanged.
    pub fn and_then<U, F>(self, func: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => func(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain an outcome-returning function over the error.
    ///
    /// The callback decides the replacement outcome; a success passes
    /// through unchanged.
    pub fn or_else<F>(self, func: F) -> Outcome<T, E>
    where
        F: FnOnce(E) -> Outcome<T, E>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => func(error),
        }
    }

    /// Turn a failure into a success by computing a substitute value.
    pub fn recover<F>(self, func: F) -> Outcome<T, E>
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Success(func(error)),
        }
    }

    /// Observe the error, if any, without changing the outcome.
    pub fn inspect_err<F>(self, func: F) -> Outcome<T, E>
    where
        F: FnOnce(&E),
    {
        if let Outcome::Failure(error) = &self {
            func(error);
        }

        self
    }

    /// Return the success value, or `default` on failure.
    pub fn value_or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Collapse both cases into a common type.
    ///
    /// Exactly one of the two handlers runs, selected by the stored variant.
    pub fn fold<U, FS, FF>(self, on_success: FS, on_failure: FF) -> U
    where
        FS: FnOnce(T) -> U,
        FF: FnOnce(E) -> U,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(error) => on_failure(error),
        }
    }
}

impl<T, E> From<Either<T, E>> for Outcome<T, E> {
    fn from(either: Either<T, E>) -> Outcome<T, E> {
        match either {
            Either::Left(value) => Outcome::Success(value),
            Either::Right(error) => Outcome::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Either<T, E> {
    fn from(outcome: Outcome<T, E>) -> Either<T, E> {
        match outcome {
            Outcome::Success(value) => Either::Left(value),
            Outcome::Failure(error) => Either::Right(error),
        }
    }
}
