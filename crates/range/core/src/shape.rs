//! Range geometry shared by every item kind.
//!
//! Most kinds describe their range with a [`ShapeRule`] evaluated by the mask
//! generator. Some (sprinklers placed in the world) come with an explicit list
//! of watered tiles instead. [`Shape`] unifies both as "a sequence of relative
//! tile offsets" so accumulation never needs to know which one it received.

use crate::mask::{Mask, build_circular_mask};
use crate::tile::TileOffset;

/// Parameters driving [`build_circular_mask`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeRule {
    pub primary_radius: f64,
    pub secondary_radius: Option<f64>,
    pub axis_only_secondary: bool,
    pub hard_cap_radius: Option<u32>,
}

impl ShapeRule {
    /// Smooth disk of the given radius.
    pub const fn disk(primary_radius: f64) -> Self {
        Self {
            primary_radius,
            secondary_radius: None,
            axis_only_secondary: false,
            hard_cap_radius: None,
        }
    }

    /// Full `(2n + 1)²` square, expressed as an oversized disk capped at `n`.
    pub const fn square(half_side: u32) -> Self {
        Self::disk(Self::UNBOUNDED).capped(half_side)
    }

    /// Adds an exact-distance ring (builder pattern).
    #[must_use]
    pub const fn with_exact_ring(mut self, secondary_radius: f64, axis_only: bool) -> Self {
        self.secondary_radius = Some(secondary_radius);
        self.axis_only_secondary = axis_only;
        self
    }

    /// Clamps the rendered radius (builder pattern).
    #[must_use]
    pub const fn capped(mut self, hard_cap_radius: u32) -> Self {
        self.hard_cap_radius = Some(hard_cap_radius);
        self
    }

    /// Radius large enough that a capped disk always fills its square.
    pub const UNBOUNDED: f64 = 100.0;

    pub fn build_mask(&self) -> Mask {
        build_circular_mask(
            self.primary_radius,
            self.secondary_radius,
            self.axis_only_secondary,
            self.hard_cap_radius,
        )
    }
}

/// Footprint of a single item, relative to the tile it is anchored on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Distance-formula footprint.
    Disk(Mask),
    /// Irregular footprint given tile by tile.
    Footprint(Vec<TileOffset>),
}

impl Shape {
    /// Iterates over the relative offsets covered by this shape.
    ///
    /// Footprint offsets are yielded as given, duplicates included.
    pub fn offsets(&self) -> Box<dyn Iterator<Item = TileOffset> + '_> {
        match self {
            Shape::Disk(mask) => Box::new(mask.offsets()),
            Shape::Footprint(offsets) => Box::new(offsets.iter().copied()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Shape::Disk(mask) => mask.len(),
            Shape::Footprint(offsets) => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Mask> for Shape {
    fn from(mask: Mask) -> Self {
        Shape::Disk(mask)
    }
}

impl From<ShapeRule> for Shape {
    fn from(rule: ShapeRule) -> Self {
        Shape::Disk(rule.build_mask())
    }
}

impl From<Vec<TileOffset>> for Shape {
    fn from(offsets: Vec<TileOffset>) -> Self {
        Shape::Footprint(offsets)
    }
}
