//! Host event hooks and the render target.
//!
//! The host owns the game loop. The overlay attaches handlers to three hook
//! points and must be able to detach and re-attach them at any time.

use std::sync::Arc;

use bitflags::bitflags;
use range_core::Tile;

use super::host::{ButtonState, ContextKey};

/// One update tick of the host driver, delivered per context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    pub context: ContextKey,
    pub tick: u64,
}

impl TickEvent {
    pub const fn new(context: ContextKey, tick: u64) -> Self {
        Self { context, tick }
    }
}

/// Colour bucket of a highlighted tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileTint {
    /// In range of exactly one side (drawn white).
    Range,
    /// In range of the targeted item and another item (drawn red).
    Overlap,
}

/// Render target for highlighted tiles.
pub trait TileCanvas {
    fn draw_tile(&mut self, tile: Tile, tint: TileTint);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookPoint {
    Tick,
    Render,
    Buttons,
}

bitflags! {
    /// Set of attached hook points.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct HookPoints: u8 {
        const TICK    = 1 << 0;
        const RENDER  = 1 << 1;
        const BUTTONS = 1 << 2;
    }
}

impl HookPoint {
    pub const fn flag(self) -> HookPoints {
        match self {
            HookPoint::Tick => HookPoints::TICK,
            HookPoint::Render => HookPoints::RENDER,
            HookPoint::Buttons => HookPoints::BUTTONS,
        }
    }
}

pub type TickHandler = Arc<dyn Fn(TickEvent) + Send + Sync>;
pub type RenderHandler = Arc<dyn Fn(ContextKey, &mut dyn TileCanvas) + Send + Sync>;
pub type ButtonsHandler = Arc<dyn Fn(ContextKey, ButtonState) + Send + Sync>;

/// Callback registered at a hook point.
///
/// Handlers are reference counted so hosts can clone them out of their
/// registry and invoke them without holding a lock.
#[derive(Clone)]
pub enum Handler {
    Tick(TickHandler),
    Render(RenderHandler),
    Buttons(ButtonsHandler),
}

impl Handler {
    pub fn point(&self) -> HookPoint {
        match self {
            Handler::Tick(_) => HookPoint::Tick,
            Handler::Render(_) => HookPoint::Render,
            Handler::Buttons(_) => HookPoint::Buttons,
        }
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Handler").field(&self.point()).finish()
    }
}

/// Opaque registration handle returned by [`HostEvents::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookToken(pub u64);

/// Registration points offered by the host.
pub trait HostEvents: Send + Sync {
    fn register(&self, handler: Handler) -> HookToken;

    /// Removes a handler. Returns false if the token was not registered.
    fn unregister(&self, token: HookToken) -> bool;
}
