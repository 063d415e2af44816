use super::state::{CREATED, FINISHED, NOTIFIED, RUNNING, SUSPENDED};
use super::waker::make_waker;
use crate::error::Error;

use std::cell::UnsafeCell;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// The suspended computation owned by a control block.
pub(crate) type TaskFuture<T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send>>;

/// The control block backing a task instance.
///
/// A `RawTask` carries everything shared between the task's own execution
/// and the code waiting on it: the parked body, the result slot, the
/// lifecycle state, and the FIFO list of waiters to resume on completion.
///
/// Reference counting is provided by `Arc`. The wrapper handle owns one
/// reference; every outstanding [`Waker`] produced by [`make_waker`] owns
/// another, which is what keeps a parked task alive while an external
/// adapter holds its resume callback. When the last reference drops, the
/// parked body is dropped with it and its captured state is unwound — the
/// task is abandoned and no completion is ever delivered.
pub(crate) struct RawTask<T> {
    /// The task body. Taken (and dropped) on completion so captured state
    /// is released as soon as the result is stored.
    ///
    /// Wrapped in `UnsafeCell` for interior mutability during `poll`; the
    /// `RUNNING` state guards exclusive access.
    future: UnsafeCell<Option<TaskFuture<T>>>,

    /// Storage for the value or error produced by the body.
    ///
    /// Written at most once, on the transition into `FINISHED`.
    result: UnsafeCell<Option<Result<T, Error>>>,

    /// The current lifecycle state (CREATED, RUNNING, SUSPENDED, NOTIFIED,
    /// FINISHED).
    pub(crate) state: AtomicUsize,

    /// Wakers registered by code awaiting this task, in registration order.
    ///
    /// Append-only until the block finishes; drained exactly once, inside
    /// the `FINISHED` transition.
    pub(crate) waiters: Mutex<Vec<Waker>>,
}

unsafe impl<T: Send> Send for RawTask<T> {}
unsafe impl<T: Send> Sync for RawTask<T> {}

impl<T: Send + 'static> RawTask<T> {
    /// Creates a control block around a task body.
    ///
    /// The block starts in `CREATED`: the body has not been polled and will
    /// not be until [`start`](Self::start) claims it.
    pub(crate) fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self {
            future: UnsafeCell::new(Some(Box::pin(future))),
            result: UnsafeCell::new(None),
            state: AtomicUsize::new(CREATED),
            waiters: Mutex::new(Vec::new()),
        }
    }

    /// Begins executing a task that has never run.
    ///
    /// The body is polled synchronously on the calling thread, up to its
    /// first suspension point or completion. No-op if the task has already
    /// been started by someone else.
    pub(crate) fn start(self: &Arc<Self>) {
        if self
            .state
            .compare_exchange(CREATED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.clone().run();
        }
    }

    /// Polls the body until it parks or completes.
    ///
    /// The caller must have transitioned the state to `RUNNING`, which
    /// grants exclusive access to the future slot. On `Poll::Pending` the
    /// task parks as `SUSPENDED`, unless a wake arrived mid-poll
    /// (`NOTIFIED`), in which case the body is polled again immediately.
    pub(crate) fn run(self: Arc<Self>) {
        loop {
            let waker = make_waker(self.clone());
            let mut cx = Context::from_waker(&waker);

            // Safety: the RUNNING state guarantees no other thread touches
            // the future slot.
            let poll = unsafe {
                match (*self.future.get()).as_mut() {
                    Some(future) => future.as_mut().poll(&mut cx),
                    None => return,
                }
            };

            match poll {
                Poll::Pending => {
                    if self
                        .state
                        .compare_exchange(RUNNING, SUSPENDED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }

                    // A wake arrived while the body was being polled; run it
                    // again instead of parking.
                    self.state.store(RUNNING, Ordering::Release);
                }
                Poll::Ready(output) => {
                    self.complete(output);
                    return;
                }
            }
        }
    }

    /// Resumes a parked task.
    ///
    /// There is no scheduler: a `SUSPENDED` task is polled inline on the
    /// calling thread. Waking a `RUNNING` task records `NOTIFIED` so the
    /// run loop re-polls once the current poll returns. Waking a `CREATED`
    /// task does nothing — only the wrapper handle starts a lazy task.
    pub(crate) fn wake(self: Arc<Self>) {
        loop {
            let state = self.state.load(Ordering::Acquire);

            match state {
                SUSPENDED => {
                    if self
                        .state
                        .compare_exchange(SUSPENDED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        self.run();
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    /// Finalizes the block with the body's output.
    ///
    /// Writes the result slot, transitions to `FINISHED`, drops the body,
    /// then resumes every registered waiter in FIFO order. The whole waiter
    /// list is detached before the first wake, so the list is drained
    /// exactly once and is permanently empty afterwards.
    fn complete(&self, output: Result<T, Error>) {
        // Safety: called from the run loop while RUNNING, which is the only
        // state that touches these slots.
        unsafe {
            *self.result.get() = Some(output);
            *self.future.get() = None;
        }

        self.state.store(FINISHED, Ordering::Release);

        let waiters = mem::take(&mut *self.waiters.lock().unwrap());
        for waiter in waiters {
            waiter.wake();
        }
    }

    /// Whether the block has transitioned into `FINISHED`.
    pub(crate) fn is_finished(&self) -> bool {
        self.state.load(Ordering::Acquire) == FINISHED
    }

    /// Registers a waiter to resume when the block completes.
    ///
    /// Returns `true` if the block is already finished, in which case the
    /// caller should retrieve the result instead of suspending. The state
    /// is re-checked after the push: a completion racing the registration
    /// has already drained the list, so the entry just pushed is stale and
    /// is removed, keeping the list permanently empty after the drain.
    pub(crate) fn add_waiter(&self, waker: &Waker) -> bool {
        if self.is_finished() {
            return true;
        }

        self.waiters.lock().unwrap().push(waker.clone());

        if self.is_finished() {
            self.waiters.lock().unwrap().clear();
            return true;
        }

        false
    }

    /// Takes the stored result out of the block.
    ///
    /// Returns [`Error::NotReady`] while the task is still running; after
    /// completion, returns the stored value or re-raises the stored error.
    ///
    /// # Panics
    ///
    /// Panics if the result has already been taken.
    pub(crate) fn try_take(&self) -> Result<T, Error> {
        if !self.is_finished() {
            return Err(Error::NotReady);
        }

        // Safety: FINISHED means no poll is in flight and the run loop will
        // never touch the slot again; the caller holds the only handle.
        unsafe { (*self.result.get()).take() }.expect("task result already taken")
    }
}
