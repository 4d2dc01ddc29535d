//! TOML scenario describing the world the simulator hosts.
use std::path::Path;

use anyhow::{Context, Result};
use range_core::{CatalogError, ItemFamily, RangeCatalog, RangeKind, SprinklerTier, Tile};
use range_overlay::{ItemDescriptor, ItemId};
use serde::Deserialize;

/// Scenario used when no file is given: a quality sprinkler held next to
/// two placed sprinklers, one of them overlapping.
pub const BUILTIN: &str = r#"
ticks = 8
period_ms = 16
preview = ["bee_house", "prismatic_sprinkler"]

cursor = { x = 6, y = 5 }

[held]
name = "Quality Sprinkler"

[[placed]]
name = "Quality Sprinkler"
tile = { x = 5, y = 5 }

[[placed]]
name = "Sprinkler"
tile = { x = 10, y = 5 }
"#;

#[derive(Clone, Debug, Deserialize)]
pub struct ItemSpec {
    pub id: Option<u64>,
    pub name: String,
    pub tile: Option<Tile>,
    pub scarecrow_radius: Option<u32>,
    #[serde(default)]
    pub pressure_nozzle: bool,
}

impl ItemSpec {
    /// Host-side view of the item. Sprinklers carry their watering footprint.
    pub fn descriptor(&self, fallback_id: u64) -> ItemDescriptor {
        let mut item = ItemDescriptor::new(ItemId(self.id.unwrap_or(fallback_id)), &self.name)
            .with_pressure_nozzle(self.pressure_nozzle);
        if let Some(tile) = self.tile {
            item = item.placed_at(tile);
        }
        if let Some(radius) = self.scarecrow_radius {
            item = item.with_scarecrow_radius(radius);
        }
        if ItemFamily::classify(&self.name) == Some(ItemFamily::Sprinkler) {
            item = item.with_footprint(
                SprinklerTier::from_name(&self.name).footprint(self.pressure_nozzle),
            );
        }
        item
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Ticks to run before rendering.
    pub ticks: u64,
    pub period_ms: u64,
    /// Catalog kinds to print on their own, by identifier.
    pub preview: Vec<String>,
    pub cursor: Tile,
    pub held: Option<ItemSpec>,
    pub hovered: Option<ItemSpec>,
    /// Press show-all instead of show-one while hovering.
    pub show_all: bool,
    pub placed: Vec<ItemSpec>,
    pub junimo_huts: Vec<Tile>,
    /// Whether the cursor rests on a Junimo hut.
    pub on_hut: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ticks: 8,
            period_ms: 16,
            preview: Vec::new(),
            cursor: Tile::ORIGIN,
            held: None,
            hovered: None,
            show_all: false,
            placed: Vec::new(),
            junimo_huts: Vec::new(),
            on_hut: false,
        }
    }
}

impl Scenario {
    pub fn builtin() -> Result<Self> {
        toml::from_str(BUILTIN).context("builtin scenario is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn preview_kinds(&self) -> std::result::Result<Vec<RangeKind>, CatalogError> {
        self.preview
            .iter()
            .map(|identifier| RangeCatalog::parse_kind(identifier))
            .collect()
    }
}
