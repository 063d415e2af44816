use super::handle::Task;
use crate::error::Error;

use std::future::Future;

/// Continuation composition.
///
/// Each combinator consumes the source handle and returns a new task of the
/// same flavor: composing onto an eager task yields an eager task, onto a
/// lazy task a lazy one. Callbacks run inside the composed task's own
/// execution, so they may themselves suspend.
impl<T: Send + 'static> Task<T> {
    /// Runs `on_success` with the source's value once it completes.
    ///
    /// The callback returns a future, which the composed task awaits.
    /// Because [`Task`] is itself a future resolving to its result, a
    /// callback that returns another task is awaited too — the composed
    /// result equals the inner task's result, never a task-of-task.
    ///
    /// If the source completes with an error, `on_success` is not invoked
    /// and the error propagates to whoever awaits the composed task.
    pub fn then<U, F, Fut>(self, on_success: F) -> Task<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, Error>> + Send + 'static,
    {
        let flavor = self.flavor;
        Task::compose(
            async move {
                match self.await {
                    Ok(value) => on_success(value).await,
                    Err(err) => Err(err),
                }
            },
            flavor,
        )
    }

    /// Runs `on_success` on a value, or `on_error` on an error.
    ///
    /// Exactly one of the two callbacks runs. The error callback receives
    /// the source's error and its awaited output becomes the composed
    /// result, so it can recover with a value or re-raise.
    pub fn then_or_else<U, F, Fut, G, Gut>(self, on_success: F, on_error: G) -> Task<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, Error>> + Send + 'static,
        G: FnOnce(Error) -> Gut + Send + 'static,
        Gut: Future<Output = Result<U, Error>> + Send + 'static,
    {
        let flavor = self.flavor;
        Task::compose(
            async move {
                match self.await {
                    Ok(value) => on_success(value).await,
                    Err(err) => on_error(err).await,
                }
            },
            flavor,
        )
    }

    /// Transforms the source's value with a plain (non-suspending) callback.
    ///
    /// Errors pass through untouched.
    pub fn map<U, F>(self, f: F) -> Task<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let flavor = self.flavor;
        Task::compose(async move { self.await.map(f) }, flavor)
    }
}
