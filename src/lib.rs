//! # Tacet
//!
//! **Tacet** is a cooperative, single-threaded task and generator runtime: a
//! small set of primitives that let ordinary sequential-looking `async` code
//! suspend at well-defined points and resume later without blocking a thread.
//!
//! There is no background scheduler. A suspended computation does nothing
//! until something explicitly resumes it — an await, a generator pull, or a
//! wake delivered by whatever it was waiting on — and resumption happens
//! inline on the resuming thread. That makes the runtime a good fit as the
//! orchestration core under an embedding event loop, which supplies the I/O
//! and timer adapters and simply wakes parked tasks when their work is done.
//!
//! The primitives:
//!
//! - [`Task::spawn`] — an **eager task** that begins running inside the
//!   constructor, up to its first suspension point.
//! - [`Task::spawn_lazy`] — a **lazy task** that begins running only when
//!   first awaited or explicitly started.
//! - [`Task::then`] / [`Task::then_or_else`] / [`Task::map`] — continuation
//!   composition; a callback returning another task is flattened.
//! - [`Generator`] — a synchronous pull-based lazy sequence.
//! - [`AsyncGenerator`] — an asynchronous lazy sequence whose production
//!   steps may themselves await, with direct producer/consumer handoff.
//! - [`wait_for`] / [`wait_for_with`] — a blocking bridge for
//!   non-cooperative callers.
//!
//! ## Quick start
//!
//! ```
//! use tacet::{Task, wait_for};
//!
//! // Eager: the body runs to its first suspension point immediately.
//! let task = Task::spawn(async { 6 * 7 });
//! assert!(task.is_finished());
//!
//! // Continuations compose without a scheduler in between.
//! let chained = task.map(|n| n + 1);
//! assert_eq!(wait_for(chained).unwrap(), 43);
//! ```
//!
//! ## Error handling
//!
//! An error raised in a task body is captured where it occurs and re-raised
//! to whichever code next retrieves the result; see [`Error`]. Dropping the
//! last handle to an unfinished task abandons it — the parked body is
//! unwound and any stored error is discarded with it, by design.

mod bridge;
mod error;
mod generator;
mod task;

pub use bridge::{wait_for, wait_for_with};
pub use error::Error;
pub use generator::{AsyncGenerator, AsyncYielder, Generator, Next, Yielder};
pub use task::Task;
