//! Per-context state and its locks.
//!
//! Every execution context owns one [`OverlayContext`]: the three tile
//! containers behind an exclusive lock, plus the trigger and phase state.
//! Contexts never share mutable state with each other.
//!
//! Lock discipline:
//! - the tick cycle builds its containers off-lock and takes the area lock
//!   once, to swap them in
//! - the render pass only ever `try_lock`s and drops the frame on contention
//! - a poisoned lock is recovered, since the containers are rebuilt from
//!   scratch every cycle

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};

use range_core::{AreaTarget, EffectiveArea, Mask, Shape, Tile, TileOffset};

use crate::api::{ButtonState, ContextKey};
use crate::trigger::ShowRangeTriggers;

/// Lifecycle of one accumulation cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CyclePhase {
    #[default]
    Idle,
    Accumulating,
    Resolving,
    Published,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub phase: CyclePhase,
    pub triggers: ShowRangeTriggers,
}

/// State of a single execution context.
///
/// Containers and control state sit behind separate locks, so recording a key
/// press never waits on a reader of the containers. The orchestrator publishes
/// whole cycles through this type; the `add_*` methods are the locked,
/// single-mutation entry points for hosts that fill a context directly.
#[derive(Debug)]
pub struct OverlayContext {
    key: ContextKey,
    area: Mutex<EffectiveArea>,
    control: Mutex<ControlState>,
}

impl OverlayContext {
    pub fn new(key: ContextKey) -> Self {
        Self {
            key,
            area: Mutex::new(EffectiveArea::new()),
            control: Mutex::new(ControlState::default()),
        }
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn add_offsets<I>(&self, offsets: I, target: AreaTarget, anchor: Tile)
    where
        I: IntoIterator<Item = TileOffset>,
    {
        self.lock_area().add_offsets(offsets, target, anchor);
    }

    pub fn add_mask(&self, mask: &Mask, target: AreaTarget, anchor: Tile) {
        self.lock_area().add_mask(mask, target, anchor);
    }

    pub fn add_shape(&self, shape: &Shape, target: AreaTarget, anchor: Tile) {
        self.lock_area().add_shape(shape, target, anchor);
    }

    /// Runs `read` against the containers without waiting.
    ///
    /// Returns `None` when a writer holds the lock.
    pub fn try_read<R>(&self, read: impl FnOnce(&EffectiveArea) -> R) -> Option<R> {
        match self.area.try_lock() {
            Ok(area) => Some(read(&area)),
            Err(TryLockError::Poisoned(poisoned)) => Some(read(&poisoned.into_inner())),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Blocking clone of the containers.
    pub fn area(&self) -> EffectiveArea {
        self.lock_area().clone()
    }

    pub fn control(&self) -> ControlState {
        *self.lock_control()
    }

    pub fn phase(&self) -> CyclePhase {
        self.lock_control().phase
    }

    pub(crate) fn set_phase(&self, phase: CyclePhase) {
        self.lock_control().phase = phase;
    }

    pub fn observe_buttons(&self, buttons: ButtonState) {
        self.lock_control().triggers.observe(buttons);
    }

    /// Disarms the triggers a cycle read at its start.
    ///
    /// A key press observed while the cycle ran carries a newer press number
    /// and stays armed for the next cycle.
    pub(crate) fn consume_triggers(&self, seen: ShowRangeTriggers) {
        self.lock_control().triggers.consume_seen(seen);
    }

    /// Replaces the containers with a resolved cycle in one locked step.
    pub(crate) fn publish(&self, area: EffectiveArea) {
        let previous = std::mem::replace(&mut *self.lock_area(), area);
        drop(previous);
    }

    pub(crate) fn lock_area(&self) -> MutexGuard<'_, EffectiveArea> {
        self.area.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_control(&self) -> MutexGuard<'_, ControlState> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lookup of contexts by key, creating them on first use.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: RwLock<HashMap<ContextKey, Arc<OverlayContext>>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context for `key`, creating it if needed.
    pub fn get_or_create(&self, key: ContextKey) -> Arc<OverlayContext> {
        if let Some(context) = self.get(key) {
            return context;
        }

        let mut contexts = self
            .contexts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            contexts
                .entry(key)
                .or_insert_with(|| Arc::new(OverlayContext::new(key))),
        )
    }

    pub fn get(&self, key: ContextKey) -> Option<Arc<OverlayContext>> {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Drops a context, e.g. when a split-screen player leaves.
    pub fn remove(&self, key: ContextKey) -> Option<Arc<OverlayContext>> {
        self.contexts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
    }

    pub fn keys(&self) -> Vec<ContextKey> {
        let mut keys: Vec<_> = self
            .contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
