//! Attachment of overlay handlers to host hook points.
//!
//! [`HookRegistry`] remembers which hook points the overlay is attached to so
//! the controller can detach and re-attach them on toggles. [`LocalEventHub`]
//! is an in-process [`HostEvents`](crate::api::HostEvents) used by the
//! simulator and tests.

mod local;
mod registry;

pub use local::LocalEventHub;
pub use registry::HookRegistry;
