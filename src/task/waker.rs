use crate::task::raw::RawTask;

use std::mem;
use std::sync::Arc;
use std::task::{RawWaker, RawWakerVTable, Waker};

/// Returns the `RawWakerVTable` for a control block of type `T`.
///
/// The vtable maps the four waker operations onto the control block's
/// reference count and resume logic:
/// - cloning the waker takes a reference,
/// - waking resumes the parked body inline,
/// - dropping releases the reference (the last release destroys the block
///   and unwinds any still-parked state).
fn vtable<T: Send + 'static>() -> &'static RawWakerVTable {
    &RawWakerVTable::new(
        clone_raw::<T>,
        wake_raw::<T>,
        wake_by_ref_raw::<T>,
        drop_raw::<T>,
    )
}

/// Creates a [`Waker`] that resumes the given control block when woken.
///
/// # Safety
///
/// The pointer stored inside the `RawWaker` originates from `Arc::into_raw`
/// and every vtable function restores it with `Arc::from_raw`, so the
/// reference count stays balanced. The waker itself counts as one reference:
/// a task parked inside an external adapter stays alive for as long as the
/// adapter holds the waker, even after every wrapper handle is gone.
pub(crate) fn make_waker<T: Send + 'static>(task: Arc<RawTask<T>>) -> Waker {
    unsafe {
        Waker::from_raw(RawWaker::new(
            Arc::into_raw(task) as *const (),
            vtable::<T>(),
        ))
    }
}

/// Clones the raw waker, taking one additional reference to the control block.
fn clone_raw<T: Send + 'static>(ptr: *const ()) -> RawWaker {
    let arc = unsafe { Arc::<RawTask<T>>::from_raw(ptr as *const RawTask<T>) };
    let cloned = arc.clone();
    mem::forget(arc);

    RawWaker::new(Arc::into_raw(cloned) as *const (), vtable::<T>())
}

/// Wakes the task and consumes the waker's reference.
///
/// There is no scheduler to hand the task to; waking resumes the body
/// directly on the calling thread via [`RawTask::wake`].
fn wake_raw<T: Send + 'static>(ptr: *const ()) {
    let arc = unsafe { Arc::<RawTask<T>>::from_raw(ptr as *const RawTask<T>) };
    arc.wake();
}

/// Wakes the task without consuming the waker.
///
/// The reference is cloned first so the original count is preserved.
fn wake_by_ref_raw<T: Send + 'static>(ptr: *const ()) {
    let arc = unsafe { Arc::<RawTask<T>>::from_raw(ptr as *const RawTask<T>) };
    arc.clone().wake();
    mem::forget(arc);
}

/// Releases the waker's reference to the control block.
fn drop_raw<T: Send + 'static>(ptr: *const ()) {
    unsafe { Arc::<RawTask<T>>::from_raw(ptr as *const RawTask<T>) };
}
