//! In-memory host world built from a [`Scenario`].
use range_core::Tile;
use range_overlay::{
    BuildingDescriptor, BuildingKind, ContextKey, HostWorld, ItemDescriptor, ItemId,
};

use crate::scenario::Scenario;

/// Single-screen world; every context sees the same scene.
pub struct ScenarioWorld {
    cursor: Tile,
    held: Option<ItemDescriptor>,
    hovered: Option<ItemDescriptor>,
    placed: Vec<ItemDescriptor>,
    huts: Vec<BuildingDescriptor>,
    on_hut: bool,
}

impl ScenarioWorld {
    pub fn new(scenario: &Scenario) -> Self {
        let placed: Vec<_> = scenario
            .placed
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.descriptor(100 + index as u64))
            .collect();
        let huts = scenario
            .junimo_huts
            .iter()
            .enumerate()
            .map(|(index, &tile)| BuildingDescriptor {
                id: ItemId(1000 + index as u64),
                kind: BuildingKind::JunimoHut,
                tile,
            })
            .collect();

        Self {
            cursor: scenario.cursor,
            held: scenario.held.as_ref().map(|spec| spec.descriptor(1)),
            hovered: scenario.hovered.as_ref().map(|spec| spec.descriptor(2)),
            placed,
            huts,
            on_hut: scenario.on_hut,
        }
    }
}

impl HostWorld for ScenarioWorld {
    fn has_current_area(&self, _ctx: ContextKey) -> bool {
        true
    }

    fn is_overlay_eligible(&self, _ctx: ContextKey) -> bool {
        true
    }

    fn held_item(&self, _ctx: ContextKey) -> Option<ItemDescriptor> {
        self.held.clone()
    }

    fn hovered_item(&self, _ctx: ContextKey) -> Option<ItemDescriptor> {
        self.hovered.clone()
    }

    fn placed_items_in_area(&self, _ctx: ContextKey, needle: &str) -> Vec<ItemDescriptor> {
        let needle = needle.to_lowercase();
        self.placed
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn valid_placement_tile(&self, _ctx: ContextKey, item: &ItemDescriptor) -> Tile {
        item.tile.unwrap_or(self.cursor)
    }

    fn building_at_placement_tile(&self, _ctx: ContextKey) -> Option<BuildingDescriptor> {
        if self.on_hut {
            self.huts.first().copied()
        } else {
            None
        }
    }

    fn buildings_in_area(&self, _ctx: ContextKey) -> Vec<BuildingDescriptor> {
        self.huts.clone()
    }
}
