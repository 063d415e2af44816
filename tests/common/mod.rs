//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// A manually-triggered awaitable: parks whatever awaits it until `open`
/// is called, mimicking an external adapter's completion callback.
#[derive(Clone, Default)]
pub struct Gate {
    inner: Arc<Mutex<GateInner>>,
}

#[derive(Default)]
struct GateInner {
    open: bool,
    waker: Option<Waker>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate and wakes the parked awaiter, if any.
    pub fn open(&self) {
        let waker = {
            let mut inner = self.inner.lock().unwrap();
            inner.open = true;
            inner.waker.take()
        };

        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Drops the parked waker without waking it, releasing the reference
    /// it holds to whatever registered it.
    pub fn discard_waiter(&self) {
        self.inner.lock().unwrap().waker = None;
    }

    pub fn wait(&self) -> GateWait {
        GateWait {
            inner: self.inner.clone(),
        }
    }
}

pub struct GateWait {
    inner: Arc<Mutex<GateInner>>,
}

impl Future for GateWait {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.inner.lock().unwrap();

        if inner.open {
            Poll::Ready(())
        } else {
            inner.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Sets a flag when dropped; used to observe abandonment unwinding.
pub struct SetOnDrop(pub Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}
