//! Core runtime for Ember text fields.
//!
//! Provides the single-threaded event loop plumbing the input layer relies on:
//! a host-implemented [`RuntimeScheduler`], a local queue for work that must
//! run on a later turn of the UI loop, and observable [`MutableState`] cells.

mod platform;
mod runtime;
mod state;

pub use platform::RuntimeScheduler;
pub use runtime::{current_runtime_handle, DefaultScheduler, Runtime, RuntimeHandle};
pub use state::{ListenerId, MutableState};
