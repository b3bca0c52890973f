//! Cross-thread behavior: continuations run in whichever context resolves
//! the promise, and resolution is visible across threads.

use std::sync::mpsc::channel;
use std::thread;

use deferred::{future_promise, when_all, when_any, Handler, Outcome, PackagedTask};

#[test]
fn continuation_runs_on_resolving_thread() {
    let (fut, prom) = future_promise();
    let (tx, rx) = channel();

    fut.callback_unit(move |()| tx.send(thread::current().id()).unwrap());

    let handle = thread::spawn(move || prom.set(()));
    let resolver = handle.thread().id();
    handle.join().unwrap();

    assert_eq!(rx.recv(), Ok(resolver));
}

#[test]
fn ready_continuation_runs_on_installing_thread() {
    let (fut, prom) = future_promise();
    let (tx, rx) = channel();

    thread::spawn(move || prom.set(())).join().unwrap();

    fut.callback_unit(move |()| tx.send(thread::current().id()).unwrap());

    assert_eq!(rx.try_recv(), Ok(thread::current().id()));
}

#[test]
fn value_set_in_another_thread_is_observed() {
    let (fut, prom) = future_promise();
    let (tx, rx) = channel();

    fut.then(|v: i32| v + 1).callback_unit(move |v| tx.send(v).unwrap());

    thread::spawn(move || prom.set(123));

    assert_eq!(rx.recv(), Ok(124));
}

#[test]
fn chained_futures_resolve_across_threads() {
    let (outer, outer_prom) = future_promise::<i32>();
    let (inner, inner_prom) = future_promise::<i32>();
    let (tx, rx) = channel();

    outer
        .flat_then(move |_| inner)
        .callback_unit(move |v| tx.send((v, thread::current().id())).unwrap());

    thread::spawn(move || outer_prom.set(0)).join().unwrap();

    let handle = thread::spawn(move || inner_prom.set(7));
    let resolver = handle.thread().id();
    handle.join().unwrap();

    assert_eq!(rx.recv(), Ok((7, resolver)));
}

#[test]
fn packaged_task_runs_on_thread() {
    let mut task = PackagedTask::new(|| 2);
    let fut = task.future();
    let (tx, rx) = channel();

    fut.callback_unit(move |v| tx.send(v).unwrap());

    let t = thread::spawn(move || task.invoke());
    t.join().unwrap();

    assert_eq!(rx.recv(), Ok(2));
}

#[test]
fn when_any_across_threads_delivers_once() {
    let mut futures = Vec::new();
    let mut threads = Vec::new();
    let (tx, rx) = channel();

    for i in 0..4 {
        let (fut, prom) = future_promise();
        futures.push(fut);
        threads.push(thread::spawn(move || prom.set(i)));
    }

    when_any(futures).callback_unit(move |v| tx.send(v).unwrap());

    for t in threads {
        t.join().unwrap();
    }

    let winner = rx.recv().unwrap();
    assert!(winner < 4);
    assert!(rx.try_recv().is_err());
}

#[test]
fn when_all_across_threads_keeps_positions() {
    let (f1, p1) = future_promise();
    let (f2, p2) = future_promise();
    let (tx, rx) = channel();

    when_all((f1, f2)).callback_unit(move |values| tx.send(values).unwrap());

    let t1 = thread::spawn(move || p1.set(1000));
    let t2 = thread::spawn(move || p2.set(2000));
    t1.join().unwrap();
    t2.join().unwrap();

    assert_eq!(rx.recv(), Ok((1000, 2000)));
}

#[test]
fn handler_completed_from_another_thread() {
    let handler: Handler<i32, Option<&'static str>> = Handler::new();
    let fut = handler.future();
    let (tx, rx) = channel();

    fut.callback_unit(move |outcome| tx.send(outcome).unwrap());

    let t = thread::spawn(move || handler.complete(None, 5));
    t.join().unwrap();

    assert_eq!(rx.recv(), Ok(Outcome::Success(5)));
}
