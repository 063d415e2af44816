/// Task has been constructed but never polled.
///
/// Eager tasks leave this state inside their constructor; lazy tasks stay
/// here until the first await or an explicit start.
pub(crate) const CREATED: usize = 0;

/// Task body is currently being polled.
///
/// At most one thread may observe this state at a time; it guards exclusive
/// access to the future slot.
pub(crate) const RUNNING: usize = 1;

/// Task is parked at a suspension point.
///
/// Nothing happens until a waker resumes it.
pub(crate) const SUSPENDED: usize = 2;

/// Task was woken while it was still running.
///
/// The run loop re-polls the body once the current poll returns, instead of
/// parking it.
pub(crate) const NOTIFIED: usize = 3;

/// Task has completed.
///
/// The result slot is populated, the waiter list has been drained, and the
/// body will never be polled again.
pub(crate) const FINISHED: usize = 4;
