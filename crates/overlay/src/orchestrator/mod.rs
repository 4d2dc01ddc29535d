//! Per-frame cycle driving: clear, accumulate, resolve, publish.
//!
//! [`FrameOrchestrator`] is the single writer for every context's containers.
//! It runs on the host's tick hook and publishes results the render hook reads
//! without blocking.

mod targets;

pub use targets::{TargetSource, Targeted, item_shape};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use range_core::EffectiveArea;
use tracing::{debug, trace};

use crate::api::{ButtonState, ContextKey, HostWorld, TickEvent, TileCanvas, TileTint};
use crate::config::OverlayConfig;
use crate::context::{ContextRegistry, CyclePhase, OverlayContext};
use targets::{Accumulated, Accumulation, CycleInputs};

/// Why a tick did not produce a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Tick is not a multiple of the cadence.
    OffCadence,
    /// No area is loaded.
    NoArea,
    /// A blocking menu is open or the display is not rendering normally.
    NotEligible,
}

/// Container sizes after a published cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleSummary {
    pub current: usize,
    pub other: usize,
    pub intersection: usize,
    pub junimo_huts: usize,
    pub targeted: Option<Targeted>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Containers keep their previous contents.
    Skipped(SkipReason),
    Published(CycleSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn { tiles: usize },
    /// A cycle held the lock; nothing was drawn this frame.
    Skipped,
}

/// Options the controller can flip while hooks are attached.
#[derive(Debug, Default)]
struct RuntimeOptions {
    button_control: AtomicBool,
    show_bomb_range: AtomicBool,
}

/// Owns every context and runs their cycles.
///
/// The orchestrator is the only writer of each context's containers. A cycle
/// moves the context through [`CyclePhase::Accumulating`],
/// [`CyclePhase::Resolving`] and [`CyclePhase::Published`], then back to
/// [`CyclePhase::Idle`]. Containers are built and resolved off-lock and
/// swapped in with a single lock acquisition, so [`render`](Self::render)
/// always sees a complete cycle.
///
/// Options flipped by the controller are atomics and apply from the next
/// cycle on.
pub struct FrameOrchestrator {
    world: Arc<dyn HostWorld>,
    contexts: ContextRegistry,
    options: RuntimeOptions,
    tick_cadence: u64,
}

impl FrameOrchestrator {
    /// Creates an orchestrator with no contexts.
    ///
    /// # Arguments
    ///
    /// * `world` - Host queries used during accumulation and gating
    /// * `config` - Initial switches; a cadence of 0 is treated as 1
    pub fn new(world: Arc<dyn HostWorld>, config: &OverlayConfig) -> Self {
        let options = RuntimeOptions::default();
        options
            .button_control
            .store(config.button_control_show, Ordering::Relaxed);
        options
            .show_bomb_range
            .store(config.show_bomb_range, Ordering::Relaxed);

        Self {
            world,
            contexts: ContextRegistry::new(),
            options,
            tick_cadence: u64::from(config.tick_cadence.max(1)),
        }
    }

    pub fn contexts(&self) -> &ContextRegistry {
        &self.contexts
    }

    /// Returns the context for `key`, creating it on first use.
    pub fn context(&self, key: ContextKey) -> Arc<OverlayContext> {
        self.contexts.get_or_create(key)
    }

    /// Ticks between cycles.
    pub fn tick_cadence(&self) -> u64 {
        self.tick_cadence
    }

    pub fn button_control(&self) -> bool {
        self.options.button_control.load(Ordering::Relaxed)
    }

    pub fn set_button_control(&self, enabled: bool) {
        self.options.button_control.store(enabled, Ordering::Relaxed);
    }

    pub fn show_bomb_range(&self) -> bool {
        self.options.show_bomb_range.load(Ordering::Relaxed)
    }

    pub fn set_show_bomb_range(&self, enabled: bool) {
        self.options.show_bomb_range.store(enabled, Ordering::Relaxed);
    }

    /// Runs one cycle for the tick's context if the tick is on cadence and
    /// the host allows it.
    ///
    /// Gating is checked in order: cadence, then a loaded area, then overlay
    /// eligibility. A skipped tick leaves the previous containers and any
    /// armed triggers untouched.
    pub fn on_tick(&self, event: TickEvent) -> CycleOutcome {
        if event.tick % self.tick_cadence != 0 {
            return CycleOutcome::Skipped(SkipReason::OffCadence);
        }

        let key = event.context;
        if !self.world.has_current_area(key) {
            trace!(target: "overlay::orchestrator", ctx = %key, tick = event.tick, "no current area");
            return CycleOutcome::Skipped(SkipReason::NoArea);
        }
        if !self.world.is_overlay_eligible(key) {
            trace!(target: "overlay::orchestrator", ctx = %key, tick = event.tick, "overlay not eligible");
            return CycleOutcome::Skipped(SkipReason::NotEligible);
        }

        let context = self.context(key);
        let summary = self.run_cycle(&context);

        debug!(
            target: "overlay::orchestrator",
            ctx = %key,
            tick = event.tick,
            current = summary.current,
            other = summary.other,
            intersection = summary.intersection,
            targeted = ?summary.targeted.map(|t| t.kind),
            "cycle published"
        );
        CycleOutcome::Published(summary)
    }

    fn run_cycle(&self, context: &OverlayContext) -> CycleSummary {
        context.set_phase(CyclePhase::Accumulating);

        let triggers = context.control().triggers;
        let inputs = CycleInputs {
            button_control: self.button_control(),
            show_bomb_range: self.show_bomb_range(),
            triggers,
        };
        let Accumulated {
            mut area,
            junimo_huts,
            targeted,
        } = Accumulation::new(self.world.as_ref(), context.key()).run(inputs);

        context.set_phase(CyclePhase::Resolving);
        area.resolve();
        let summary = CycleSummary {
            current: area.current().len(),
            other: area.other().len(),
            intersection: area.intersection().len(),
            junimo_huts,
            targeted,
        };

        context.set_phase(CyclePhase::Published);
        context.publish(area);
        context.consume_triggers(triggers);
        context.set_phase(CyclePhase::Idle);

        summary
    }

    /// Feeds a buttons-changed notification into the context's triggers.
    pub fn on_buttons_changed(&self, key: ContextKey, buttons: ButtonState) {
        self.context(key).observe_buttons(buttons);
    }

    /// Draws the published tiles without waiting for the lock.
    ///
    /// Other tiles are drawn first, then intersection tiles on top.
    pub fn render(&self, key: ContextKey, canvas: &mut dyn TileCanvas) -> RenderOutcome {
        let Some(context) = self.contexts.get(key) else {
            return RenderOutcome::Drawn { tiles: 0 };
        };

        context
            .try_read(|area| {
                for &tile in area.other() {
                    canvas.draw_tile(tile, TileTint::Range);
                }
                for &tile in area.intersection() {
                    canvas.draw_tile(tile, TileTint::Overlap);
                }
                RenderOutcome::Drawn {
                    tiles: area.other().len() + area.intersection().len(),
                }
            })
            .unwrap_or(RenderOutcome::Skipped)
    }

    /// Non-blocking copy of a context's containers.
    pub fn snapshot(&self, key: ContextKey) -> Option<EffectiveArea> {
        self.contexts.get(key)?.try_read(EffectiveArea::clone)
    }
}

impl std::fmt::Debug for FrameOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameOrchestrator")
            .field("contexts", &self.contexts.keys())
            .field("options", &self.options)
            .field("tick_cadence", &self.tick_cadence)
            .finish_non_exhaustive()
    }
}
