use crate::error::Error;

use futures_core::Stream;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

/// An asynchronous pull-based lazy sequence.
///
/// Production and consumption are independently suspendable: a production
/// step may await other tasks. Pulling via [`next`](Self::next) (or the
/// [`Stream`] impl) transfers control directly to the producer — it is
/// polled inline with the consumer's own context, runs until it yields a
/// value, awaits external work, or finishes, and control transfers directly
/// back. There is no scheduler callback in between; when the producer parks
/// on external work, that work's wake reaches the consumer's waker and the
/// next pull resumes the chain.
///
/// Dropping the generator while the producer is parked mid-production drops
/// the parked body, unwinding its captured state; no completion is ever
/// delivered.
pub struct AsyncGenerator<T> {
    /// The producer body; `None` once it has completed or failed.
    future: Option<Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>>,

    /// Slot holding the most recently produced value.
    ///
    /// Non-empty iff the body's last poll parked exactly at a yield point.
    slot: Arc<Mutex<Option<T>>>,
}

/// The producer-side handle used to emit values from an async generator body.
pub struct AsyncYielder<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T: Send> AsyncYielder<T> {
    /// Produces one value and parks the body until the next pull.
    pub fn yield_value(&self, value: T) -> impl Future<Output = ()> + Send + use<T> {
        YieldValue {
            slot: self.slot.clone(),
            value: Some(value),
        }
    }
}

/// First poll stores the value and hands control back to the consumer; the
/// second poll — the next pull — resumes the body past the yield point.
struct YieldValue<T> {
    slot: Arc<Mutex<Option<T>>>,
    value: Option<T>,
}

impl<T: Send> Future for YieldValue<T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Safety: neither field is structurally pinned.
        let this = unsafe { self.get_unchecked_mut() };

        match this.value.take() {
            Some(value) => {
                *this.slot.lock().unwrap() = Some(value);
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

impl<T: Send + 'static> AsyncGenerator<T> {
    /// Creates an async generator from a producer body.
    ///
    /// The body receives an [`AsyncYielder`] and finishes by returning
    /// `Result<(), Error>`; an error is delivered once, at the pull that
    /// observes it, after which the generator is finished.
    ///
    /// # Examples
    ///
    /// ```
    /// use tacet::{AsyncGenerator, Task, wait_for};
    ///
    /// let mut doubled = AsyncGenerator::new(|yielder| async move {
    ///     for n in 1..=2 {
    ///         let value = Task::spawn(async move { n * 2 }).await?;
    ///         yielder.yield_value(value).await;
    ///     }
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(wait_for(doubled.next()).unwrap().unwrap(), 2);
    /// assert_eq!(wait_for(doubled.next()).unwrap().unwrap(), 4);
    /// assert!(wait_for(doubled.next()).is_none());
    /// ```
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(AsyncYielder<T>) -> Fut,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(None));
        let future = producer(AsyncYielder { slot: slot.clone() });

        Self {
            future: Some(Box::pin(future)),
            slot,
        }
    }

    /// Returns an awaitable that resolves to the next produced value,
    /// `Some(Err(_))` if the body failed, or `None` once it has completed.
    pub fn next(&mut self) -> Next<'_, T> {
        Next { generator: self }
    }
}

impl<T: Send + 'static> Stream for AsyncGenerator<T> {
    type Item = Result<T, Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        let Some(future) = this.future.as_mut() else {
            return Poll::Ready(None);
        };

        match future.as_mut().poll(cx) {
            Poll::Pending => match this.slot.lock().unwrap().take() {
                Some(value) => Poll::Ready(Some(Ok(value))),
                // The producer parked on external work; its wake goes to
                // the consumer's waker, which re-polls us.
                None => Poll::Pending,
            },
            Poll::Ready(Ok(())) => {
                this.future = None;
                Poll::Ready(None)
            }
            Poll::Ready(Err(err)) => {
                this.future = None;
                Poll::Ready(Some(Err(err)))
            }
        }
    }
}

/// Future returned by [`AsyncGenerator::next`].
pub struct Next<'a, T> {
    generator: &'a mut AsyncGenerator<T>,
}

impl<T: Send + 'static> Future for Next<'_, T> {
    type Output = Option<Result<T, Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut *self.get_mut().generator).poll_next(cx)
    }
}
