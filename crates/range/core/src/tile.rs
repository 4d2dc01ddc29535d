use std::fmt;
use std::ops::{Add, Sub};

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this tile viewed as a displacement from [`Tile::ORIGIN`].
    pub const fn as_offset(self) -> TileOffset {
        TileOffset::new(self.x, self.y)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Relative displacement between two tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileOffset {
    pub dx: i32,
    pub dy: i32,
}

impl TileOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add<TileOffset> for Tile {
    type Output = Tile;

    fn add(self, rhs: TileOffset) -> Tile {
        Tile::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Tile> for Tile {
    type Output = TileOffset;

    fn sub(self, rhs: Tile) -> TileOffset {
        TileOffset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for TileOffset {
    type Output = TileOffset;

    fn add(self, rhs: TileOffset) -> TileOffset {
        TileOffset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}
