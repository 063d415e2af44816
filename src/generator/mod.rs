//! Pull-based lazy sequences.
//!
//! Two flavors share the same protocol — the consumer pulls, the producer
//! body runs until its next yield or completion, and the produced value
//! crosses a single shared slot:
//!
//! - [`Generator`] is synchronous: driving it never suspends the consumer,
//!   and the body may suspend only at yield points.
//! - [`AsyncGenerator`] lets a production step await other asynchronous
//!   work; pulling is itself awaitable and the type implements
//!   [`futures_core::Stream`].
//!
//! In both cases control moves between producer and consumer directly,
//! with no scheduler in between.

mod stream;
mod sync;

pub use stream::{AsyncGenerator, AsyncYielder, Next};
pub use sync::{Generator, Yielder};
