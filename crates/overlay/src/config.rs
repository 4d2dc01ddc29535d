//! Overlay configuration structures and loaders.
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::api::{OverlayError, Result};

/// User-facing overlay options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Master switch for the range overlay.
    pub show_ranges: bool,
    /// Show the hovered object's range while a show-range key is pressed.
    pub button_control_show: bool,
    /// Show blast radii while holding a bomb.
    pub show_bomb_range: bool,
    /// Recompute once every this many host ticks.
    pub tick_cadence: u32,
}

impl OverlayConfig {
    pub const DEFAULT_TICK_CADENCE: u32 = 4;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OVERLAY_SHOW_RANGES` - Master switch (default: true)
    /// - `OVERLAY_BUTTON_CONTROL` - Hover mode on key press (default: false)
    /// - `OVERLAY_SHOW_BOMB_RANGE` - Bomb blast radii (default: false)
    /// - `OVERLAY_TICK_CADENCE` - Ticks between cycles (default: 4, min: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enable) = read_env::<bool>("OVERLAY_SHOW_RANGES") {
            config.show_ranges = enable;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_BUTTON_CONTROL") {
            config.button_control_show = enable;
        }
        if let Some(enable) = read_env::<bool>("OVERLAY_SHOW_BOMB_RANGE") {
            config.show_bomb_range = enable;
        }
        if let Some(cadence) = read_env::<u32>("OVERLAY_TICK_CADENCE") {
            config.tick_cadence = cadence;
        }

        config.normalized()
    }

    /// Parse configuration from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigParse`] on malformed TOML or mistyped values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigRead`] if the file cannot be read and
    /// [`OverlayError::ConfigParse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| OverlayError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn normalized(mut self) -> Self {
        self.tick_cadence = self.tick_cadence.max(1);
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_ranges: true,
            button_control_show: false,
            show_bomb_range: false,
            tick_cadence: Self::DEFAULT_TICK_CADENCE,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
