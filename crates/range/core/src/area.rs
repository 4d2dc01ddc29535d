//! Per-cycle accumulation of affected tiles.

use std::collections::HashSet;

use crate::mask::Mask;
use crate::overlap::resolve_overlap;
use crate::shape::Shape;
use crate::tile::{Tile, TileOffset};

/// Which container an accumulation call writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaTarget {
    /// The item being placed or inspected.
    Current,
    /// Every other matching item in the area.
    Other,
}

impl From<bool> for AreaTarget {
    /// `true` selects [`AreaTarget::Current`].
    fn from(into_current: bool) -> Self {
        if into_current {
            AreaTarget::Current
        } else {
            AreaTarget::Other
        }
    }
}

/// The three tile containers rebuilt every cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectiveArea {
    current: Vec<Tile>,
    other: HashSet<Tile>,
    intersection: HashSet<Tile>,
}

impl EffectiveArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles of the targeted item, duplicates kept.
    pub fn current(&self) -> &[Tile] {
        &self.current
    }

    /// Tiles of same-family items.
    ///
    /// After [`resolve`](Self::resolve) this holds the symmetric difference
    /// with Current: tiles covered by exactly one side.
    pub fn other(&self) -> &HashSet<Tile> {
        &self.other
    }

    /// Tiles covered by both the targeted item and another item. Empty until
    /// [`resolve`](Self::resolve) runs.
    pub fn intersection(&self) -> &HashSet<Tile> {
        &self.intersection
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.other.is_empty() && self.intersection.is_empty()
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.other.clear();
        self.intersection.clear();
    }

    /// Adds `anchor + offset` for every offset.
    pub fn add_offsets<I>(&mut self, offsets: I, target: AreaTarget, anchor: Tile)
    where
        I: IntoIterator<Item = TileOffset>,
    {
        let tiles = offsets.into_iter().map(|offset| anchor + offset);
        match target {
            AreaTarget::Current => self.current.extend(tiles),
            AreaTarget::Other => self.other.extend(tiles),
        }
    }

    /// Adds every in-range cell of `mask`, centred on `anchor`.
    pub fn add_mask(&mut self, mask: &Mask, target: AreaTarget, anchor: Tile) {
        self.add_offsets(mask.offsets(), target, anchor);
    }

    pub fn add_shape(&mut self, shape: &Shape, target: AreaTarget, anchor: Tile) {
        self.add_offsets(shape.offsets(), target, anchor);
    }

    /// Replaces Other and Intersection with the resolved overlap.
    ///
    /// Current is left as accumulated.
    pub fn resolve(&mut self) {
        let overlap = resolve_overlap(&self.current, &self.other);
        self.intersection = overlap.intersection;
        self.other = overlap.revised_other;
    }
}
