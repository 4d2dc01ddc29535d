//! User-facing switches and hook lifecycle.

use std::sync::Arc;

use tracing::info;

use crate::api::{Handler, HookPoint, HookPoints, HostEvents, HostWorld, TileCanvas};
use crate::config::OverlayConfig;
use crate::hooks::HookRegistry;
use crate::orchestrator::FrameOrchestrator;

/// Owns the orchestrator and its host registrations.
///
/// Dropping the controller detaches every hook.
#[derive(Debug)]
pub struct OverlayController {
    orchestrator: Arc<FrameOrchestrator>,
    hooks: HookRegistry,
}

impl OverlayController {
    /// Creates a controller with no hooks attached.
    pub fn new(orchestrator: Arc<FrameOrchestrator>, events: Arc<dyn HostEvents>) -> Self {
        Self {
            orchestrator,
            hooks: HookRegistry::new(events),
        }
    }

    /// Builds the orchestrator and applies every switch from `config`.
    pub fn from_config(
        world: Arc<dyn HostWorld>,
        events: Arc<dyn HostEvents>,
        config: &OverlayConfig,
    ) -> Self {
        let orchestrator = Arc::new(FrameOrchestrator::new(world, config));
        let mut controller = Self::new(orchestrator, events);

        controller.toggle(config.show_ranges);
        if config.show_ranges {
            controller.toggle_button_control(config.button_control_show);
        }
        controller.toggle_bomb_range(config.show_bomb_range);

        info!(
            target: "overlay::controller",
            show_ranges = config.show_ranges,
            button_control = config.button_control_show,
            show_bomb_range = config.show_bomb_range,
            cadence = config.tick_cadence,
            "overlay configured"
        );
        controller
    }

    /// Returns the orchestrator the hooks drive.
    ///
    /// Hosts that run their own loop can call into it directly, e.g. for
    /// [`FrameOrchestrator::snapshot`].
    pub fn orchestrator(&self) -> &Arc<FrameOrchestrator> {
        &self.orchestrator
    }

    /// Hook points with a registered handler.
    pub fn attached(&self) -> HookPoints {
        self.hooks.attached()
    }

    /// Master switch. Enabling re-attaches the tick and render hooks and the
    /// buttons hook; disabling detaches all three.
    pub fn toggle(&mut self, enabled: bool) {
        self.toggle_button_control(enabled);

        self.hooks.detach(HookPoint::Render);
        self.hooks.detach(HookPoint::Tick);

        if enabled {
            let orchestrator = Arc::clone(&self.orchestrator);
            self.hooks
                .attach(Handler::Render(Arc::new(move |ctx, canvas: &mut dyn TileCanvas| {
                    orchestrator.render(ctx, canvas);
                })));

            let orchestrator = Arc::clone(&self.orchestrator);
            self.hooks.attach(Handler::Tick(Arc::new(move |event| {
                orchestrator.on_tick(event);
            })));
        }
    }

    /// Hover mode: show the range of the object under the cursor while a
    /// show-range key is pressed.
    pub fn toggle_button_control(&mut self, enabled: bool) {
        self.orchestrator.set_button_control(enabled);

        self.hooks.detach(HookPoint::Buttons);
        if enabled {
            let orchestrator = Arc::clone(&self.orchestrator);
            self.hooks
                .attach(Handler::Buttons(Arc::new(move |ctx, buttons| {
                    orchestrator.on_buttons_changed(ctx, buttons);
                })));
        }
    }

    /// Whether a held bomb shows its blast radius. Hovered bombs never do.
    ///
    /// Takes effect on the next published cycle; no hooks change.
    pub fn toggle_bomb_range(&mut self, enabled: bool) {
        self.orchestrator.set_show_bomb_range(enabled);
    }

    /// Detaches every hook. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.toggle(false);
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.dispose();
    }
}
