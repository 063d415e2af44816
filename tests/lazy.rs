use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tacet::{Task, wait_for};

#[test]
fn lazy_body_does_not_run_until_awaited() {
    let ran = Arc::new(AtomicBool::new(false));

    let flag = ran.clone();
    let task = Task::spawn_lazy(async move {
        flag.store(true, Ordering::SeqCst);
        42
    });

    assert!(!ran.load(Ordering::SeqCst));
    assert!(!task.is_finished());

    assert_eq!(wait_for(task).unwrap(), 42);
    assert!(ran.load(Ordering::SeqCst));
}

#[test]
fn explicit_start_runs_the_body() {
    let ran = Arc::new(AtomicBool::new(false));

    let flag = ran.clone();
    let mut task = Task::spawn_lazy(async move {
        flag.store(true, Ordering::SeqCst);
        "started"
    });

    task.start();

    // The body has no suspension point, so starting ran it to completion.
    assert!(ran.load(Ordering::SeqCst));
    assert!(task.is_finished());
    assert_eq!(task.try_take().unwrap(), "started");
}

#[test]
fn starting_twice_is_a_no_op() {
    let runs = Arc::new(AtomicBool::new(false));

    let flag = runs.clone();
    let task = Task::spawn_lazy(async move {
        assert!(!flag.swap(true, Ordering::SeqCst), "body ran twice");
        1u32
    });

    task.start();
    task.start();

    assert_eq!(wait_for(task).unwrap(), 1);
}

#[test]
fn dropped_unstarted_lazy_is_a_diagnostic_only() {
    let _ = env_logger::builder().is_test(true).try_init();

    let ran = Arc::new(AtomicBool::new(false));

    let flag = ran.clone();
    let task = Task::spawn_lazy(async move {
        flag.store(true, Ordering::SeqCst);
        1u32
    });

    // Discarding an unstarted computation is permitted; it only logs.
    drop(task);

    assert!(!ran.load(Ordering::SeqCst));
}
