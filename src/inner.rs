use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

/// Type-erased continuation, owning whatever downstream promise it feeds.
pub type Thunk<T> = Box<dyn FnOnce(T) + Send>;

/// The cell jointly owned by a `Promise` and the `Future` derived from it.
pub type Shared<T> = Arc<Mutex<Inner<T>>>;

pub enum Inner<T> {
    Empty,              // no value, no continuation
    Value(T),           // resolved, value not yet claimed
    Callback(Thunk<T>), // a continuation waits for the value
    Done,               // value handed to a continuation; terminal
}

impl<T> Inner<T> {
    pub fn new() -> Inner<T> {
        Inner::Empty
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Inner::Empty => "empty",
            Inner::Value(_) => "value",
            Inner::Callback(_) => "callback",
            Inner::Done => "done",
        }
    }
}

/// Resolve the cell with `value`.
///
/// An extracted continuation runs only after the lock is released. Settling
/// an already-resolved cell leaves it untouched and discards `value`.
pub fn settle<T>(cell: &Shared<T>, value: T) {
    let callback = {
        let mut lk = cell.lock();

        match mem::replace(&mut *lk, Inner::Empty) {
            Inner::Empty => {
                *lk = Inner::Value(value);
                return;
            }
            old @ Inner::Value(_) => {
                *lk = old;
                return;
            }
            Inner::Callback(callback) => {
                *lk = Inner::Done;
                callback
            }
            Inner::Done => {
                *lk = Inner::Done;
                return;
            }
        }
    };

    callback(value);
}

/// Install a continuation on the cell.
///
/// If the value is already present it is handed over immediately, after the
/// lock is released. Installing over a waiting continuation replaces it; the
/// replaced continuation never runs.
pub fn install<T, F>(cell: &Shared<T>, callback: F)
where
    F: FnOnce(T) + Send + 'static,
{
    let value = {
        let mut lk = cell.lock();

        match mem::replace(&mut *lk, Inner::Empty) {
            Inner::Empty => {
                *lk = Inner::Callback(Box::new(callback));
                return;
            }
            Inner::Value(value) => {
                *lk = Inner::Done;
                value
            }
            Inner::Callback(_) => {
                *lk = Inner::Callback(Box::new(callback));
                return;
            }
            Inner::Done => panic!("future value already delivered"),
        }
    };

    callback(value);
}

pub fn new_shared<T>() -> Shared<T> {
    Arc::new(Mutex::new(Inner::new()))
}
