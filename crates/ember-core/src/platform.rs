//! Platform abstraction traits for the Ember runtime.
//!
//! The host event loop implements these so the runtime can ask for another
//! turn without depending on a particular windowing or mobile toolkit.

/// Schedules work for the Ember runtime.
///
/// Implementations are responsible for waking the host event loop so it
/// drains queued UI work and re-renders. They must be safe to use from
/// multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
