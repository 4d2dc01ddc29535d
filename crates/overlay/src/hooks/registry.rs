//! Tracks the overlay's registrations with the host.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::api::{Handler, HookPoint, HookPoints, HookToken, HostEvents};

/// Tracks the overlay's handler registrations with a [`HostEvents`] source.
///
/// The registry holds at most one handler per [`HookPoint`]. Attaching at an
/// occupied point unregisters the previous handler first, so toggling an
/// option on twice never leaves two handlers firing.
///
/// # Design Pattern
///
/// The registry is the only owner of [`HookToken`]s. Callers name hook points
/// and never see tokens, which keeps detach idempotent.
pub struct HookRegistry {
    events: Arc<dyn HostEvents>,
    attached: HashMap<HookPoint, HookToken>,
}

impl HookRegistry {
    /// Creates a registry with nothing attached to `events`.
    pub fn new(events: Arc<dyn HostEvents>) -> Self {
        Self {
            events,
            attached: HashMap::new(),
        }
    }

    /// Registers `handler`, replacing whatever was attached at its point.
    pub fn attach(&mut self, handler: Handler) {
        let point = handler.point();
        self.detach(point);

        let token = self.events.register(handler);
        self.attached.insert(point, token);
        debug!(target: "overlay::hooks", ?point, token = token.0, "hook attached");
    }

    /// Returns whether a handler was attached at `point`.
    pub fn detach(&mut self, point: HookPoint) -> bool {
        let Some(token) = self.attached.remove(&point) else {
            return false;
        };

        let removed = self.events.unregister(token);
        debug!(target: "overlay::hooks", ?point, token = token.0, removed, "hook detached");
        true
    }

    /// Detaches the tick, render and buttons handlers.
    pub fn detach_all(&mut self) {
        for point in [HookPoint::Tick, HookPoint::Render, HookPoint::Buttons] {
            self.detach(point);
        }
    }

    /// Returns the set of hook points that currently hold a handler.
    pub fn attached(&self) -> HookPoints {
        self.attached
            .keys()
            .fold(HookPoints::empty(), |points, point| points | point.flag())
    }

    pub fn is_attached(&self, point: HookPoint) -> bool {
        self.attached.contains_key(&point)
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("attached", &self.attached())
            .finish_non_exhaustive()
    }
}
