use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll, Wake, Waker};
use std::thread::{self, Thread};

/// Wake state shared between the blocking caller and the futures it drives.
struct WaitSignal {
    /// Set by any wake; cleared by the wait loop just before re-polling.
    woken: AtomicBool,

    /// The blocked thread, unparked on wake so the default bridge does not
    /// rely on the injected step returning on its own.
    thread: Thread,
}

impl Wake for WaitSignal {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.woken.store(true, Ordering::Release);
        self.thread.unpark();
    }
}

/// Blocks the current thread until the future completes, then returns its
/// output.
///
/// This is the bridge for non-cooperative callers: it parks the thread
/// between polls and relies on the future's waker to unpark it. Awaiting a
/// [`Task`] this way returns the task's value or re-raises its error; a
/// lazy task is started by the first poll.
///
/// # Examples
///
/// ```
/// use tacet::{Task, wait_for};
///
/// let task = Task::spawn_lazy(async { "ready" });
/// assert_eq!(wait_for(task).unwrap(), "ready");
/// ```
///
/// [`Task`]: crate::Task
pub fn wait_for<F: Future>(future: F) -> F::Output {
    wait_for_with(future, thread::park)
}

/// Blocks until the future completes, running `wait_one` between polls.
///
/// `wait_one` is the embedder-supplied "run one iteration of waiting"
/// primitive — typically one turn of an event loop, or a short sleep for a
/// plain poll loop. It is called whenever the future is pending and no wake
/// has arrived; the future is only re-polled after a wake.
pub fn wait_for_with<F: Future>(future: F, mut wait_one: impl FnMut()) -> F::Output {
    let signal = Arc::new(WaitSignal {
        woken: AtomicBool::new(true),
        thread: thread::current(),
    });
    let waker = Waker::from(signal.clone());
    let mut cx = Context::from_waker(&waker);
    let mut future = pin!(future);

    loop {
        if signal.woken.swap(false, Ordering::AcqRel) {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }

        wait_one();
    }
}
