//! Item kinds with an effect range and the shape rules that describe them.
//!
//! The table below holds product constants. Structural behaviour (caps,
//! exact rings, per-instance radius) lives in [`ShapeRule`].

use std::str::FromStr;

use crate::error::{ErrorSeverity, RangeError};
use crate::mask::Mask;
use crate::shape::ShapeRule;
use crate::tile::TileOffset;

/// Distance subtracted from scarecrow radii so tiles exactly on the edge are
/// not counted by two adjacent scarecrows.
pub const SCARECROW_EDGE_EPSILON: f64 = 0.01;

pub const DEFAULT_SCARECROW_RADIUS: u32 = 9;
pub const DEFAULT_DELUXE_SCARECROW_RADIUS: u32 = 17;

/// Offset from a Junimo hut's origin tile to the tile its range is centred on.
pub const JUNIMO_HUT_CENTER: TileOffset = TileOffset::new(1, 1);

/// Every item kind the catalog knows a range for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeKind {
    JunimoHut,
    BeeHouse,
    Scarecrow,
    DeluxeScarecrow,
    Sprinkler,
    QualitySprinkler,
    IridiumSprinkler,
    PrismaticSprinkler,
    MushroomLog,
    MossySeed,
    CherryBomb,
    Bomb,
    MegaBomb,
}

impl RangeKind {
    /// Resolves the concrete kind of an item already classified into `family`.
    pub fn for_item(family: ItemFamily, name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        match family {
            ItemFamily::Scarecrow if name.contains("eluxe") => RangeKind::DeluxeScarecrow,
            ItemFamily::Scarecrow => RangeKind::Scarecrow,
            ItemFamily::Sprinkler => SprinklerTier::from_name(&name).kind(),
            ItemFamily::BeeHouse => RangeKind::BeeHouse,
            ItemFamily::MushroomLog => RangeKind::MushroomLog,
            ItemFamily::MossySeed => RangeKind::MossySeed,
            ItemFamily::Bomb if name.contains("ega") => RangeKind::MegaBomb,
            ItemFamily::Bomb if name.contains("herry") => RangeKind::CherryBomb,
            ItemFamily::Bomb => RangeKind::Bomb,
        }
    }

    pub const fn is_sprinkler(self) -> bool {
        matches!(
            self,
            RangeKind::Sprinkler
                | RangeKind::QualitySprinkler
                | RangeKind::IridiumSprinkler
                | RangeKind::PrismaticSprinkler
        )
    }
}

/// Per-instance inputs to a catalog lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeParams {
    /// Radius configured on a placed scarecrow, if any.
    pub instance_radius: Option<u32>,
    pub has_pressure_nozzle: bool,
}

impl RangeParams {
    #[must_use]
    pub const fn with_instance_radius(mut self, radius: u32) -> Self {
        self.instance_radius = Some(radius);
        self
    }

    #[must_use]
    pub const fn with_pressure_nozzle(mut self, has_pressure_nozzle: bool) -> Self {
        self.has_pressure_nozzle = has_pressure_nozzle;
        self
    }
}

/// Errors raised while resolving identifiers against the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The identifier names no kind in the table.
    #[error("no range is defined for item kind '{0}'")]
    UnknownKind(String),
}

impl RangeError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::UnknownKind(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::UnknownKind(_) => "CATALOG_UNKNOWN_KIND",
        }
    }
}

/// Fixed lookup table from [`RangeKind`] to shape rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeCatalog;

impl RangeCatalog {
    /// Parses a kind identifier such as `"mega_bomb"`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownKind`] if the identifier is not in the table.
    pub fn parse_kind(identifier: &str) -> Result<RangeKind, CatalogError> {
        RangeKind::from_str(identifier)
            .map_err(|_| CatalogError::UnknownKind(identifier.to_owned()))
    }

    pub fn shape_rule(kind: RangeKind, params: &RangeParams) -> ShapeRule {
        let nozzle = params.has_pressure_nozzle;
        match kind {
            RangeKind::JunimoHut => ShapeRule::square(8),
            RangeKind::BeeHouse => ShapeRule::disk(4.19).with_exact_ring(5.0, true),
            RangeKind::Scarecrow => scarecrow_rule(params, DEFAULT_SCARECROW_RADIUS),
            RangeKind::DeluxeScarecrow => scarecrow_rule(params, DEFAULT_DELUXE_SCARECROW_RADIUS),
            RangeKind::Sprinkler if nozzle => ShapeRule::square(1),
            RangeKind::Sprinkler => ShapeRule::disk(1.0),
            RangeKind::QualitySprinkler if nozzle => ShapeRule::square(2),
            RangeKind::QualitySprinkler => ShapeRule::square(1),
            RangeKind::IridiumSprinkler if nozzle => ShapeRule::square(3),
            RangeKind::IridiumSprinkler => ShapeRule::square(2),
            RangeKind::PrismaticSprinkler => ShapeRule::disk(3.69).with_exact_ring(18f64.sqrt(), false),
            RangeKind::MushroomLog => ShapeRule::square(7),
            RangeKind::MossySeed => ShapeRule::square(5),
            RangeKind::CherryBomb => ShapeRule::disk(3.39),
            RangeKind::Bomb => ShapeRule::disk(5.52),
            RangeKind::MegaBomb => ShapeRule::disk(7.45),
        }
    }

    pub fn mask(kind: RangeKind, params: &RangeParams) -> Mask {
        Self::shape_rule(kind, params).build_mask()
    }
}

fn scarecrow_rule(params: &RangeParams, default_radius: u32) -> ShapeRule {
    let radius = params.instance_radius.unwrap_or(default_radius);
    ShapeRule::disk(f64::from(radius) - SCARECROW_EDGE_EPSILON)
}

/// Name-based grouping of items whose ranges are shown together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemFamily {
    Scarecrow,
    Sprinkler,
    BeeHouse,
    MushroomLog,
    MossySeed,
    Bomb,
}

impl ItemFamily {
    /// Lowercase substring identifying members of this family by name.
    pub const fn needle(self) -> &'static str {
        match self {
            ItemFamily::Scarecrow => "arecrow",
            ItemFamily::Sprinkler => "sprinkler",
            ItemFamily::BeeHouse => "bee house",
            ItemFamily::MushroomLog => "mushroom log",
            ItemFamily::MossySeed => "mossy seed",
            ItemFamily::Bomb => "bomb",
        }
    }

    /// Classifies an item by case-insensitive substring match on its name.
    ///
    /// Families are tried in declaration order; `None` means the item has no
    /// range to show.
    pub fn classify(name: &str) -> Option<Self> {
        use strum::IntoEnumIterator;

        let name = name.to_ascii_lowercase();
        Self::iter().find(|family| name.contains(family.needle()))
    }

    /// Whether already-placed members of this family are shown alongside a
    /// held item of the same family.
    pub const fn shows_placed_members(self) -> bool {
        matches!(self, ItemFamily::Scarecrow | ItemFamily::Sprinkler)
    }
}

/// Sprinkler tiers and the host game's watering pattern for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SprinklerTier {
    Basic,
    Quality,
    Iridium,
    Prismatic,
}

impl SprinklerTier {
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("prismatic") {
            SprinklerTier::Prismatic
        } else if name.contains("iridium") {
            SprinklerTier::Iridium
        } else if name.contains("quality") {
            SprinklerTier::Quality
        } else {
            SprinklerTier::Basic
        }
    }

    pub const fn kind(self) -> RangeKind {
        match self {
            SprinklerTier::Basic => RangeKind::Sprinkler,
            SprinklerTier::Quality => RangeKind::QualitySprinkler,
            SprinklerTier::Iridium => RangeKind::IridiumSprinkler,
            SprinklerTier::Prismatic => RangeKind::PrismaticSprinkler,
        }
    }

    pub const fn base_radius(self) -> u32 {
        match self {
            SprinklerTier::Basic => 0,
            SprinklerTier::Quality => 1,
            SprinklerTier::Iridium => 2,
            SprinklerTier::Prismatic => 3,
        }
    }

    /// Tiles watered relative to the sprinkler, excluding its own tile.
    ///
    /// Radius 0 waters the four orthogonal neighbours; radius `r > 0` waters
    /// the surrounding `(2r + 1)²` square. A pressure nozzle adds one.
    pub fn footprint(self, has_pressure_nozzle: bool) -> Vec<TileOffset> {
        let radius = self.base_radius() + u32::from(has_pressure_nozzle);
        if radius == 0 {
            return vec![
                TileOffset::new(0, -1),
                TileOffset::new(1, 0),
                TileOffset::new(0, 1),
                TileOffset::new(-1, 0),
            ];
        }

        let r = radius as i32;
        let mut offsets = Vec::with_capacity(((2 * r + 1) * (2 * r + 1) - 1) as usize);
        for dx in -r..=r {
            for dy in -r..=r {
                if dx != 0 || dy != 0 {
                    offsets.push(TileOffset::new(dx, dy));
                }
            }
        }
        offsets
    }
}
