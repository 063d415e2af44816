//! Cooperative task primitives.
//!
//! This module defines the runtime's single-result computations:
//!
//! - the control block shared between a task's execution and its awaiters,
//! - lifecycle state management,
//! - the waker that resumes a parked body inline (there is no scheduler),
//! - the move-only [`Task`] handle, eager and lazy,
//! - continuation composition (`then`, `then_or_else`, `map`).
//!
//! Most users interact with this module through [`Task::spawn`] and
//! [`Task::spawn_lazy`]; the lower-level pieces back the generator types
//! and the blocking bridge as well.

mod state;
mod then;
mod waker;

pub(crate) mod handle;
pub(crate) mod raw;

pub use handle::Task;
