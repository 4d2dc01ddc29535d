//! Public overlay API surface.
//!
//! This module gathers the types exchanged with the host so the other modules
//! can stay focused on orchestration and locking.

pub mod errors;
pub mod events;
pub mod host;

pub use errors::{OverlayError, Result};
pub use events::{
    ButtonsHandler, Handler, HookPoint, HookPoints, HookToken, HostEvents, RenderHandler,
    TickEvent, TickHandler, TileCanvas, TileTint,
};
pub use host::{
    BuildingDescriptor, BuildingKind, ButtonState, ContextKey, HostWorld, ItemDescriptor, ItemId,
};
