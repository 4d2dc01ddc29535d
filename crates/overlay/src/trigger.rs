//! Edge-triggered "show range" keys.
//!
//! A key press arms a trigger; the next published cycle consumes it. Holding
//! the key keeps re-arming it through the host's buttons-changed events, so
//! the overlay stays up only as long as input keeps arriving.
//!
//! Every press carries a sequence number. A cycle consumes only the presses it
//! read when it started, so input that lands mid-cycle survives to the next.

use crate::api::ButtonState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerState {
    #[default]
    Idle,
    /// Armed by the `press`-th observed key press of its context.
    Armed { press: u64 },
}

impl TriggerState {
    pub fn arm(&mut self, press: u64) {
        *self = TriggerState::Armed { press };
    }

    pub const fn is_armed(self) -> bool {
        matches!(self, TriggerState::Armed { .. })
    }

    /// Returns to [`TriggerState::Idle`]. Returns whether it was armed.
    pub fn consume(&mut self) -> bool {
        std::mem::take(self).is_armed()
    }

    /// Consumes only if still in the `seen` state. Returns whether it did.
    pub fn consume_if(&mut self, seen: TriggerState) -> bool {
        if *self != seen {
            return false;
        }
        self.consume()
    }
}

/// The two independent show-range triggers of one context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowRangeTriggers {
    /// Show the hovered object's range.
    pub one: TriggerState,
    /// Show the hovered object's range and every same-family object's.
    pub all: TriggerState,
    presses: u64,
}

impl ShowRangeTriggers {
    /// Arms triggers for keys held down while the player is free.
    pub fn observe(&mut self, buttons: ButtonState) {
        if !buttons.player_free || !(buttons.show_one_down || buttons.show_all_down) {
            return;
        }

        self.presses = self.presses.wrapping_add(1);
        if buttons.show_one_down {
            self.one.arm(self.presses);
        }
        if buttons.show_all_down {
            self.all.arm(self.presses);
        }
    }

    pub const fn any_armed(&self) -> bool {
        self.one.is_armed() || self.all.is_armed()
    }

    /// Consumes the triggers a cycle read into `seen`.
    ///
    /// A trigger re-armed since then keeps its newer press.
    pub fn consume_seen(&mut self, seen: ShowRangeTriggers) {
        self.one.consume_if(seen.one);
        self.all.consume_if(seen.all);
    }
}
