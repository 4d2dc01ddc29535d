//! Square in-range masks built from Euclidean distance.
//!
//! A [`Mask`] of radius `r` is a `(2r + 1) × (2r + 1)` grid centred on local
//! cell `(r, r)`. Cell `(i, j)` covers the tile offset `(i - r, j - r)` from
//! whatever anchor the mask is placed on.

use crate::tile::TileOffset;

/// Square boolean grid describing which offsets from a centre are in range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mask {
    radius: u32,
    /// Row-major by `i`, i.e. `cells[i * side + j]`.
    cells: Vec<bool>,
}

impl Mask {
    /// Mask containing only the centre cell.
    pub fn origin() -> Self {
        Self {
            radius: 0,
            cells: vec![true],
        }
    }

    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Side length of the grid, always `2 * radius + 1`.
    pub const fn side(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Returns whether local cell `(i, j)` is in range.
    ///
    /// Cells outside the grid are reported as out of range.
    pub fn get(&self, i: usize, j: usize) -> bool {
        let side = self.side();
        i < side && j < side && self.cells[i * side + j]
    }

    /// Returns whether the tile at `offset` from the centre is in range.
    pub fn contains(&self, offset: TileOffset) -> bool {
        let r = self.radius as i64;
        let i = offset.dx as i64 + r;
        let j = offset.dy as i64 + r;
        i >= 0 && j >= 0 && self.get(i as usize, j as usize)
    }

    /// Number of in-range cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the in-range cells as offsets from the centre.
    pub fn offsets(&self) -> impl Iterator<Item = TileOffset> + '_ {
        let side = self.side();
        let r = self.radius as i32;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(move |(index, _)| {
                let i = (index / side) as i32;
                let j = (index % side) as i32;
                TileOffset::new(i - r, j - r)
            })
    }
}

/// Builds a circular mask.
///
/// The grid radius is `ceil(max(primary, secondary))`, clamped to `hard_cap`
/// when given. A cell is in range when its distance `d` from the centre
/// satisfies `d <= primary`, or when `d` equals `secondary` exactly. With
/// `axis_only_secondary` the exact ring only counts on the horizontal and
/// vertical axes through the centre.
pub fn build_circular_mask(
    primary: f64,
    secondary: Option<f64>,
    axis_only_secondary: bool,
    hard_cap: Option<u32>,
) -> Mask {
    debug_assert!(primary >= 0.0, "primary radius must be non-negative");
    debug_assert!(
        secondary.is_none_or(|s| s >= 0.0),
        "secondary radius must be non-negative"
    );

    let uncapped = primary.max(secondary.unwrap_or(0.0)).ceil() as u32;
    let radius = hard_cap.map_or(uncapped, |cap| uncapped.min(cap));
    let side = 2 * radius as usize + 1;
    let r = radius as i64;

    let mut cells = Vec::with_capacity(side * side);
    for i in 0..side as i64 {
        for j in 0..side as i64 {
            let distance = (((r - i) * (r - i) + (r - j) * (r - j)) as f64).sqrt();
            let on_axis = i == r || j == r;
            // Exact equality is intended: the ring picks out lattice points
            // whose distance is exactly the secondary radius.
            #[allow(clippy::float_cmp)]
            let on_ring = secondary.is_some_and(|s| distance == s)
                && (!axis_only_secondary || on_axis);
            cells.push(distance <= primary || on_ring);
        }
    }

    Mask { radius, cells }
}
