//! Discovery of the targeted item and its same-family neighbours.
//!
//! Everything here runs during the Accumulating phase. The cycle is built
//! into a private [`EffectiveArea`] that no reader can see; the orchestrator
//! swaps it into the context once it is resolved. Host queries never
//! run under the area lock.

use range_core::{
    AreaTarget, EffectiveArea, ItemFamily, JUNIMO_HUT_CENTER, RangeCatalog, RangeKind,
    RangeParams, Shape,
};
use tracing::trace;

use crate::api::{BuildingKind, ContextKey, HostWorld, ItemDescriptor};
use crate::trigger::ShowRangeTriggers;

/// How the targeted item was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetSource {
    /// Placed object under the cursor, inspected via a show-range key.
    Hovered { show_all: bool },
    /// Item in the player's hand, about to be placed.
    Held,
}

/// Inputs fixed at the start of a cycle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CycleInputs {
    pub button_control: bool,
    pub show_bomb_range: bool,
    pub triggers: ShowRangeTriggers,
}

/// What a cycle ended up targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Targeted {
    pub kind: RangeKind,
    pub source: TargetSource,
    /// Same-family items written to Other.
    pub others: usize,
}

/// Unresolved output of one Accumulating phase.
#[derive(Debug)]
pub(crate) struct Accumulated {
    pub area: EffectiveArea,
    pub junimo_huts: usize,
    pub targeted: Option<Targeted>,
}

pub(crate) struct Accumulation<'a> {
    world: &'a dyn HostWorld,
    key: ContextKey,
    area: EffectiveArea,
}

impl<'a> Accumulation<'a> {
    /// Starts from empty containers, which is the Accumulating phase's clear.
    pub fn new(world: &'a dyn HostWorld, key: ContextKey) -> Self {
        Self {
            world,
            key,
            area: EffectiveArea::new(),
        }
    }

    fn key(&self) -> ContextKey {
        self.key
    }

    /// Writes every range relevant this cycle into the private area.
    pub fn run(mut self, inputs: CycleInputs) -> Accumulated {
        let junimo_huts = self.add_junimo_huts();

        let targeted = if inputs.button_control && inputs.triggers.any_armed() {
            let source = TargetSource::Hovered {
                show_all: inputs.triggers.all.is_armed(),
            };
            self.world
                .hovered_item(self.key())
                .and_then(|item| self.add_target(&item, source, inputs))
        } else {
            self.world
                .held_item(self.key())
                .filter(|item| item.placeable)
                .and_then(|item| self.add_target(&item, TargetSource::Held, inputs))
        };

        Accumulated {
            area: self.area,
            junimo_huts,
            targeted,
        }
    }

    /// Junimo huts are buildings, not objects: when the placement tile is on
    /// one, every hut in the area is shown.
    fn add_junimo_huts(&mut self) -> usize {
        let on_hut = self
            .world
            .building_at_placement_tile(self.key())
            .is_some_and(|building| building.kind == BuildingKind::JunimoHut);
        if !on_hut {
            return 0;
        }

        let mask = RangeCatalog::mask(RangeKind::JunimoHut, &RangeParams::default());
        let mut shown = 0;
        for hut in self
            .world
            .buildings_in_area(self.key())
            .into_iter()
            .filter(|building| building.kind == BuildingKind::JunimoHut)
        {
            self.area
                .add_mask(&mask, AreaTarget::Other, hut.tile + JUNIMO_HUT_CENTER);
            shown += 1;
        }
        shown
    }

    fn add_target(
        &mut self,
        item: &ItemDescriptor,
        source: TargetSource,
        inputs: CycleInputs,
    ) -> Option<Targeted> {
        let Some(family) = ItemFamily::classify(&item.name) else {
            trace!(target: "overlay::targets", ctx = %self.key(), item = %item.name, "item has no range");
            return None;
        };
        let allowed = match (family, source) {
            (ItemFamily::Bomb, TargetSource::Held) => inputs.show_bomb_range,
            (ItemFamily::Bomb, TargetSource::Hovered { .. }) => false,
            _ => true,
        };
        if !allowed {
            return None;
        }

        let kind = RangeKind::for_item(family, &item.name);
        let anchor = self.world.valid_placement_tile(self.key(), item);
        self.area
            .add_shape(&item_shape(item, kind), AreaTarget::Current, anchor);

        let include_others = match source {
            TargetSource::Hovered { show_all } => show_all && family.shows_placed_members(),
            TargetSource::Held => family.shows_placed_members(),
        };
        let others = if include_others {
            self.add_same_family(item, family)
        } else {
            0
        };

        Some(Targeted {
            kind,
            source,
            others,
        })
    }

    fn add_same_family(&mut self, target: &ItemDescriptor, family: ItemFamily) -> usize {
        let mut added = 0;
        for other in self.world.placed_items_in_area(self.key(), family.needle()) {
            if other.id == target.id {
                continue;
            }
            let Some(tile) = other.tile else {
                continue;
            };
            let kind = RangeKind::for_item(family, &other.name);
            self.area
                .add_shape(&item_shape(&other, kind), AreaTarget::Other, tile);
            added += 1;
        }
        added
    }
}

/// Shape of a single item: the host's sprinkler footprint when it supplies
/// one, the catalog mask otherwise.
pub fn item_shape(item: &ItemDescriptor, kind: RangeKind) -> Shape {
    if kind.is_sprinkler()
        && let Some(footprint) = &item.footprint
    {
        return Shape::Footprint(footprint.clone());
    }

    let params = RangeParams {
        instance_radius: item.scarecrow_radius,
        has_pressure_nozzle: item.has_pressure_nozzle,
    };
    Shape::Disk(RangeCatalog::mask(kind, &params))
}
