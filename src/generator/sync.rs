use crate::error::Error;

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// A synchronous pull-based lazy sequence.
///
/// The producer is an async body that parks itself at each
/// [`Yielder::yield_value`] call; every [`Iterator::next`] resumes it until
/// the next produced value or completion. Nothing runs until the first pull.
///
/// Ownership is single and strictly nested: the generator owns its body
/// directly and dropping the generator drops the parked body, unwinding any
/// state captured on it. No atomic reference counting is involved.
///
/// The body must suspend only at yield points — a synchronous generator has
/// no one to wake it, so awaiting anything else inside the body panics at
/// the pull that observes it. Use [`AsyncGenerator`] for producers that
/// await other work.
///
/// # Examples
///
/// ```
/// use tacet::Generator;
///
/// let mut numbers = Generator::new(|yielder| async move {
///     yielder.yield_value(1).await;
///     yielder.yield_value(2).await;
///     Ok(())
/// });
///
/// assert_eq!(numbers.next().unwrap().unwrap(), 1);
/// assert_eq!(numbers.next().unwrap().unwrap(), 2);
/// assert!(numbers.next().is_none());
/// ```
///
/// [`AsyncGenerator`]: crate::AsyncGenerator
pub struct Generator<T> {
    /// The producer body; `None` once it has completed or failed.
    future: Option<Pin<Box<dyn Future<Output = Result<(), Error>>>>>,

    /// Slot holding the most recently produced value.
    ///
    /// Non-empty iff the body's last poll parked exactly at a yield point.
    slot: Rc<RefCell<Option<T>>>,
}

/// The producer-side handle used to emit values from a generator body.
pub struct Yielder<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> Yielder<T> {
    /// Produces one value and parks the body until the next pull.
    pub fn yield_value(&self, value: T) -> impl Future<Output = ()> + use<T> {
        YieldValue {
            slot: self.slot.clone(),
            value: Some(value),
        }
    }
}

/// Future returned by [`Yielder::yield_value`].
///
/// The first poll stores the value in the shared slot and parks (control
/// returns to the consumer holding the generator); the second poll — the
/// next pull — completes, resuming the body past the yield point.
struct YieldValue<T> {
    slot: Rc<RefCell<Option<T>>>,
    value: Option<T>,
}

impl<T> Future for YieldValue<T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Safety: neither field is structurally pinned.
        let this = unsafe { self.get_unchecked_mut() };

        match this.value.take() {
            Some(value) => {
                *this.slot.borrow_mut() = Some(value);
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

impl<T: 'static> Generator<T> {
    /// Creates a generator from a producer body.
    ///
    /// The body receives a [`Yielder`] and finishes by returning
    /// `Result<(), Error>`; an error is delivered once, at the pull that
    /// observes it, after which the generator is finished.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(Yielder<T>) -> Fut,
        Fut: Future<Output = Result<(), Error>> + 'static,
    {
        let slot = Rc::new(RefCell::new(None));
        let future = producer(Yielder { slot: slot.clone() });

        Self {
            future: Some(Box::pin(future)),
            slot,
        }
    }
}

impl<T: 'static> Iterator for Generator<T> {
    type Item = Result<T, Error>;

    /// Resumes the body until its next production or completion.
    ///
    /// Returns `None` once the body has completed; the first pull after a
    /// body error yields that error, and every pull after that is `None`.
    ///
    /// # Panics
    ///
    /// Panics if the body suspended anywhere other than a yield point.
    fn next(&mut self) -> Option<Self::Item> {
        let future = self.future.as_mut()?;
        let mut cx = Context::from_waker(Waker::noop());

        match future.as_mut().poll(&mut cx) {
            Poll::Pending => match self.slot.borrow_mut().take() {
                Some(value) => Some(Ok(value)),
                None => panic!("generator body suspended outside of a yield point"),
            },
            Poll::Ready(Ok(())) => {
                self.future = None;
                None
            }
            Poll::Ready(Err(err)) => {
                self.future = None;
                Some(Err(err))
            }
        }
    }
}
