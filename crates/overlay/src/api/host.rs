//! Capabilities the overlay needs from the host game.
//!
//! The overlay never inspects the world directly. Everything it knows about
//! the player, the active area and the objects in it comes through
//! [`HostWorld`], keyed by the execution context asking.

use std::fmt;

use range_core::{Tile, TileOffset};

/// Identifier of an independent execution context (one per split-screen player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContextKey(pub u32);

impl ContextKey {
    /// The main screen.
    pub const PRIMARY: Self = Self(0);
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Identity of an item instance. Two descriptors with the same id refer to
/// the same object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

/// Snapshot of an item as the host sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub name: String,
    /// Tile the item occupies, for items already placed in the area.
    pub tile: Option<Tile>,
    pub placeable: bool,
    /// Radius configured on a placed scarecrow.
    pub scarecrow_radius: Option<u32>,
    pub has_pressure_nozzle: bool,
    /// Watered tiles relative to the item, when the host computes them.
    pub footprint: Option<Vec<TileOffset>>,
}

impl ItemDescriptor {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tile: None,
            placeable: true,
            scarecrow_radius: None,
            has_pressure_nozzle: false,
            footprint: None,
        }
    }

    #[must_use]
    pub fn placed_at(mut self, tile: Tile) -> Self {
        self.tile = Some(tile);
        self
    }

    #[must_use]
    pub fn placeable(mut self, placeable: bool) -> Self {
        self.placeable = placeable;
        self
    }

    #[must_use]
    pub fn with_scarecrow_radius(mut self, radius: u32) -> Self {
        self.scarecrow_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_pressure_nozzle(mut self, has_pressure_nozzle: bool) -> Self {
        self.has_pressure_nozzle = has_pressure_nozzle;
        self
    }

    #[must_use]
    pub fn with_footprint(mut self, footprint: Vec<TileOffset>) -> Self {
        self.footprint = Some(footprint);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    JunimoHut,
    Other,
}

/// A building in the active area, identified by its origin (top-left) tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildingDescriptor {
    pub id: ItemId,
    pub kind: BuildingKind,
    pub tile: Tile,
}

/// Read-only view of the host world for one cycle.
///
/// `held_item` and `hovered_item` together answer "what is the player
/// targeting": the hovered placed object when a show-range key was pressed,
/// the held item otherwise.
pub trait HostWorld: Send + Sync {
    /// False while no area is loaded (e.g. back on the title screen).
    fn has_current_area(&self, ctx: ContextKey) -> bool;

    /// True when no blocking menu is open and the display renders normally.
    fn is_overlay_eligible(&self, ctx: ContextKey) -> bool;

    fn held_item(&self, ctx: ContextKey) -> Option<ItemDescriptor>;

    /// The placed object under the cursor or gamepad target tile.
    fn hovered_item(&self, ctx: ContextKey) -> Option<ItemDescriptor>;

    /// Placed objects whose name contains `needle`, compared case-insensitively.
    fn placed_items_in_area(&self, ctx: ContextKey, needle: &str) -> Vec<ItemDescriptor>;

    /// Snapped tile `item` would occupy if placed now.
    fn valid_placement_tile(&self, ctx: ContextKey, item: &ItemDescriptor) -> Tile;

    fn building_at_placement_tile(&self, _ctx: ContextKey) -> Option<BuildingDescriptor> {
        None
    }

    fn buildings_in_area(&self, _ctx: ContextKey) -> Vec<BuildingDescriptor> {
        Vec::new()
    }
}

/// Input state delivered with each buttons-changed notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub show_one_down: bool,
    pub show_all_down: bool,
    /// Player is free to act (no menu, no event, not mid-animation).
    pub player_free: bool,
}
