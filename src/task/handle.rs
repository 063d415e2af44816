use super::raw::RawTask;
use super::state::CREATED;
use crate::error::Error;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::task::{Context, Poll};

/// Whether a task starts running at construction or on first await.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Flavor {
    Eager,
    Lazy,
}

/// A handle to a suspendable computation producing exactly one value or error.
///
/// A `Task` owns exactly one reference to its control block. It is move-only:
/// moving the handle transfers that reference, and dropping it releases it.
/// Dropping the last reference to a task that has not finished abandons the
/// computation — the parked body is dropped, its captured state is unwound,
/// and no result is ever delivered. This is fire-and-forget semantics, not
/// cancellation signaling.
///
/// `Task` implements [`Future`]; awaiting it resolves to the body's value or
/// re-raises the body's error.
///
/// # Examples
///
/// ```
/// use tacet::{Task, wait_for};
///
/// let task = Task::spawn(async { 41 + 1 });
/// assert!(task.is_finished());
/// assert_eq!(wait_for(task).unwrap(), 42);
/// ```
pub struct Task<T> {
    pub(crate) raw: Arc<RawTask<T>>,
    pub(crate) flavor: Flavor,
}

impl<T: Send + 'static> Task<T> {
    /// Spawns an eager task from an infallible body.
    ///
    /// The body is polled synchronously before `spawn` returns: a body with
    /// no suspension point runs to completion inside this call.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::try_spawn(async move { Ok(future.await) })
    }

    /// Spawns an eager task from a fallible body.
    ///
    /// An error returned by the body is captured in the control block and
    /// re-raised to whichever code next retrieves the result.
    pub fn try_spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        let task = Self {
            raw: Arc::new(RawTask::new(future)),
            flavor: Flavor::Eager,
        };
        task.raw.start();
        task
    }

    /// Spawns a lazy task from an infallible body.
    ///
    /// The body does not run until the handle is first awaited or
    /// [`start`](Self::start) is called.
    pub fn spawn_lazy<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::try_spawn_lazy(async move { Ok(future.await) })
    }

    /// Spawns a lazy task from a fallible body.
    pub fn try_spawn_lazy<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self {
            raw: Arc::new(RawTask::new(future)),
            flavor: Flavor::Lazy,
        }
    }

    /// Builds a task of the given flavor from an already-wrapped body.
    ///
    /// Continuation composition uses this so a composed task inherits the
    /// flavor of its source.
    pub(crate) fn compose<F>(future: F, flavor: Flavor) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        match flavor {
            Flavor::Eager => Self::try_spawn(future),
            Flavor::Lazy => Self::try_spawn_lazy(future),
        }
    }

    /// Begins executing the task now, without awaiting it.
    ///
    /// The body runs synchronously up to its first suspension point or
    /// completion. No-op if the task has already started.
    pub fn start(&self) {
        self.raw.start();
    }

    /// Whether the task has run to completion.
    pub fn is_finished(&self) -> bool {
        self.raw.is_finished()
    }

    /// Retrieves the result without suspending.
    ///
    /// Returns [`Error::NotReady`] if the task has not finished yet; the
    /// handle stays valid and the result can be retrieved later. After
    /// completion, returns the stored value or re-raises the stored error.
    ///
    /// # Panics
    ///
    /// Panics if the result has already been taken.
    pub fn try_take(&mut self) -> Result<T, Error> {
        self.raw.try_take()
    }
}

impl<T: Send + 'static> Future for Task<T> {
    type Output = Result<T, Error>;

    /// Polls the handle.
    ///
    /// A lazy task is started inline on its first poll. If the task has
    /// already finished, the result is delivered without suspending.
    /// Otherwise the waker is registered and the state re-checked, so a
    /// completion racing with registration is never missed.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.raw.state.load(Ordering::Acquire) == CREATED {
            this.raw.start();
        }

        if this.raw.add_waiter(cx.waker()) {
            return Poll::Ready(this.raw.try_take());
        }

        Poll::Pending
    }
}

impl<T> Drop for Task<T> {
    /// Releases the handle's reference to the control block.
    ///
    /// A lazy task dropped before it was ever started is flagged with a
    /// diagnostic warning: the computation was created but never driven.
    /// Semantics otherwise permit discarding an unstarted body, so this is
    /// an observability signal, not an error.
    fn drop(&mut self) {
        if self.flavor == Flavor::Lazy && self.raw.state.load(Ordering::Acquire) == CREATED {
            log::warn!("lazy task dropped before it was ever started");
        }
    }
}
