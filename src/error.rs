use std::sync::Arc;

use thiserror::Error;

/// Errors surfaced by the runtime when retrieving a task or generator result.
///
/// A computation error raised inside a task body is captured where it occurs,
/// stored in the task's control block, and re-raised to whichever code next
/// retrieves the result — an await, a generator pull, [`Task::try_take`], or a
/// continuation's error callback. It is never delivered more than once.
///
/// [`Task::try_take`]: crate::Task::try_take
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The result was requested before the task finished.
    ///
    /// This is a caller contract violation, not a failure of the task itself;
    /// the task keeps running and the result can be retrieved later.
    #[error("task result requested before completion")]
    NotReady,

    /// The task body failed with an error.
    ///
    /// The original error is shared behind an `Arc` so it can move cheaply
    /// through waiter fan-out and continuation chains without being cloned.
    #[error("{0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wraps an arbitrary error raised inside a task or generator body.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let err = Error::failure(io::Error::other("connection reset"));
    /// ```
    pub fn failure<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed(Arc::new(source))
    }
}
