mod common;

use common::{Gate, SetOnDrop};
use futures_core::Stream;
use std::future::poll_fn;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tacet::{AsyncGenerator, Error, Task, wait_for};

#[test]
fn production_steps_may_await_tasks() {
    let mut doubled = AsyncGenerator::new(|yielder| async move {
        for n in 1..=3u32 {
            let value = Task::spawn(async move { n * 2 }).await?;
            yielder.yield_value(value).await;
        }
        Ok(())
    });

    assert_eq!(wait_for(doubled.next()).unwrap().unwrap(), 2);
    assert_eq!(wait_for(doubled.next()).unwrap().unwrap(), 4);
    assert_eq!(wait_for(doubled.next()).unwrap().unwrap(), 6);
    assert!(wait_for(doubled.next()).is_none());
}

#[test]
fn producer_and_consumer_alternate_directly() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let log = order.clone();
    let mut items = AsyncGenerator::new(move |yielder| async move {
        log.lock().unwrap().push("produce 1");
        yielder.yield_value(1u32).await;
        log.lock().unwrap().push("produce 2");
        yielder.yield_value(2u32).await;
        log.lock().unwrap().push("finish");
        Ok(())
    });

    assert_eq!(wait_for(items.next()).unwrap().unwrap(), 1);
    order.lock().unwrap().push("consume 1");
    assert_eq!(wait_for(items.next()).unwrap().unwrap(), 2);
    order.lock().unwrap().push("consume 2");
    assert!(wait_for(items.next()).is_none());

    assert_eq!(
        *order.lock().unwrap(),
        vec!["produce 1", "consume 1", "produce 2", "consume 2", "finish"]
    );
}

#[test]
fn pending_production_resumes_via_the_consumer_waker() {
    let gate = Gate::new();

    let body_gate = gate.clone();
    let mut items = AsyncGenerator::new(move |yielder| async move {
        // Park the production step on external work; its wake reaches the
        // consumer's waker, whose re-poll resumes the chain.
        body_gate.wait().await;
        yielder.yield_value(9u32).await;
        Ok(())
    });

    let opener = gate.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        opener.open();
    });

    assert_eq!(wait_for(items.next()).unwrap().unwrap(), 9);
    assert!(wait_for(items.next()).is_none());
    handle.join().unwrap();
}

#[test]
fn body_error_finishes_the_stream() {
    let mut faulty = AsyncGenerator::new(|yielder| async move {
        yielder.yield_value(1u32).await;
        Err(Error::failure(std::io::Error::other("exploded")))
    });

    assert_eq!(wait_for(faulty.next()).unwrap().unwrap(), 1);

    match wait_for(faulty.next()) {
        Some(Err(Error::Failed(err))) => assert_eq!(err.to_string(), "exploded"),
        other => panic!("expected the body error, got {other:?}"),
    }

    assert!(wait_for(faulty.next()).is_none());
}

#[test]
fn dropping_mid_production_unwinds_the_producer() {
    let unwound = Arc::new(AtomicBool::new(false));
    let completed = Arc::new(AtomicBool::new(false));

    let guard_flag = unwound.clone();
    let completed_flag = completed.clone();
    let mut parked = AsyncGenerator::new(move |yielder| async move {
        let _guard = SetOnDrop(guard_flag);
        yielder.yield_value(1u32).await;
        completed_flag.store(true, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(wait_for(parked.next()).unwrap().unwrap(), 1);

    // The producer is parked at its yield point; dropping the generator
    // drops the parked body without delivering any completion.
    drop(parked);

    assert!(unwound.load(Ordering::SeqCst));
    assert!(!completed.load(Ordering::SeqCst));
}

#[test]
fn stream_impl_follows_the_same_protocol() {
    let mut items = AsyncGenerator::new(|yielder| async move {
        yielder.yield_value(1u32).await;
        yielder.yield_value(2u32).await;
        Ok(())
    });

    let mut collected = Vec::new();
    while let Some(item) = wait_for(poll_fn(|cx| Pin::new(&mut items).poll_next(cx))) {
        collected.push(item.unwrap());
    }

    assert_eq!(collected, vec![1, 2]);
}
