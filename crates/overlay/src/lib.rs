//! Runtime that keeps an item range overlay in sync with a host game.
//!
//! The host owns the game loop and calls into the overlay through three hook
//! points. Every few ticks the overlay recomputes which tiles the targeted
//! item would affect, compares them with same-family items already placed,
//! and publishes the result for the render hook.
//!
//! Modules are organized by responsibility:
//! - [`api`] holds the host capability traits and exchanged types
//! - [`orchestrator`] runs the per-context cycle and render pass
//! - [`context`] owns per-context locked state
//! - [`trigger`] tracks the show-range keys
//! - [`hooks`] and [`controller`] manage host registrations
//! - [`config`] loads user options
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod context;
pub mod controller;
pub mod hooks;
pub mod orchestrator;
pub mod trigger;

mod workers;

pub use api::{
    BuildingDescriptor, BuildingKind, ButtonState, ContextKey, Handler, HookPoint, HookPoints,
    HookToken, HostEvents, HostWorld, ItemDescriptor, ItemId, OverlayError, Result, TickEvent,
    TileCanvas, TileTint,
};
pub use config::OverlayConfig;
pub use context::{ContextRegistry, CyclePhase, OverlayContext};
pub use controller::OverlayController;
pub use hooks::{HookRegistry, LocalEventHub};
pub use orchestrator::{
    CycleOutcome, CycleSummary, FrameOrchestrator, RenderOutcome, SkipReason, TargetSource,
    Targeted,
};
pub use trigger::{ShowRangeTriggers, TriggerState};
pub use workers::TickDriver;
