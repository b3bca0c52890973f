use crate::future::{future_promise, Future};
use crate::promise::Promise;

/// A callable bundled with the promise for its return value.
///
/// Invoking the task runs the callable and fulfills the promise, resolving
/// the future obtained from [`future`](PackagedTask::future). The task is
/// move-only and one-shot: it panics if invoked twice, and the future may be
/// taken once, before or after invocation.
///
/// Arguments to the callable are closure captures.
///
/// ```
/// # use deferred::PackagedTask;
/// # use std::thread;
/// let mut task = PackagedTask::new(|| 2);
/// let fut = task.future();
///
/// let t = thread::spawn(move || task.invoke());
///
/// let (tx, rx) = std::sync::mpsc::channel();
/// fut.callback_unit(move |v| tx.send(v).unwrap());
/// t.join().unwrap();
/// assert_eq!(rx.recv(), Ok(2));
/// ```
pub struct PackagedTask<F, R> {
    func: Option<F>,
    promise: Option<Promise<R>>,
    future: Option<Future<R>>,
}

impl<F, R> PackagedTask<F, R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    /// Wrap a callable.
    pub fn new(func: F) -> PackagedTask<F, R> {
        let (future, promise) = future_promise();

        PackagedTask {
            func: Some(func),
            promise: Some(promise),
            future: Some(future),
        }
    }

    /// Take the future paired with this task's promise.
    ///
    /// Panics if called a second time.
    pub fn future(&mut self) -> Future<R> {
        self.future.take().expect("task future already taken")
    }

    /// Run the callable and fulfill the promise with its return value.
    ///
    /// Panics if the task has already been invoked.
    pub fn invoke(&mut self) {
        let func = self.func.take().expect("task already invoked");
        let promise = self.promise.take().expect("task already invoked");

        promise.set(func());
    }
}
