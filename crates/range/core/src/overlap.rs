//! Splitting accumulated ranges into overlap and non-overlap tiles.

use std::collections::HashSet;

use crate::tile::Tile;

/// Result of [`resolve_overlap`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlap {
    /// Tiles covered by both the targeted item and some other item.
    pub intersection: HashSet<Tile>,
    /// Tiles covered by exactly one side.
    pub revised_other: HashSet<Tile>,
}

/// Computes the overlap between the targeted item's tiles and everyone else's.
///
/// `revised_other` is the symmetric difference of the two sides, not
/// `other \ current`: tiles only the targeted item reaches are drawn in the
/// same colour as tiles only other items reach. Only tiles on both sides end
/// up in `intersection`. Duplicates in `current` collapse.
pub fn resolve_overlap(current: &[Tile], other: &HashSet<Tile>) -> Overlap {
    let current: HashSet<Tile> = current.iter().copied().collect();

    Overlap {
        intersection: other.intersection(&current).copied().collect(),
        revised_other: other.symmetric_difference(&current).copied().collect(),
    }
}
