//! Text rendering of highlighted tiles.
use std::collections::HashMap;
use std::fmt;

use range_core::{Mask, Tile};
use range_overlay::{TileCanvas, TileTint};

/// Collects drawn tiles and prints them as a character grid.
///
/// `o` marks a plain range tile, `#` an overlap, `.` an untouched tile.
#[derive(Debug, Default)]
pub struct AsciiCanvas {
    tiles: HashMap<Tile, TileTint>,
}

impl AsciiCanvas {
    /// Canvas showing a mask on its own, centred on the origin.
    pub fn from_mask(mask: &Mask) -> Self {
        let mut canvas = Self::default();
        for offset in mask.offsets() {
            canvas.draw_tile(Tile::ORIGIN + offset, TileTint::Range);
        }
        canvas
    }

    pub fn count(&self, tint: TileTint) -> usize {
        self.tiles.values().filter(|&&drawn| drawn == tint).count()
    }
}

impl TileCanvas for AsciiCanvas {
    fn draw_tile(&mut self, tile: Tile, tint: TileTint) {
        // Overlap is drawn last and wins.
        let entry = self.tiles.entry(tile).or_insert(tint);
        if tint == TileTint::Overlap {
            *entry = tint;
        }
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.tiles.keys().next() else {
            return writeln!(f, "(nothing to draw)");
        };
        let (mut min, mut max) = (*first, *first);
        for tile in self.tiles.keys() {
            min = Tile::new(min.x.min(tile.x), min.y.min(tile.y));
            max = Tile::new(max.x.max(tile.x), max.y.max(tile.y));
        }

        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let glyph = match self.tiles.get(&Tile::new(x, y)) {
                    Some(TileTint::Range) => 'o',
                    Some(TileTint::Overlap) => '#',
                    None => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
