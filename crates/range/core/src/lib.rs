//! Deterministic range geometry for placeable items.
//!
//! `range-core` answers "which tiles does this item affect?" and "where do the
//! ranges of several items overlap?". It exposes pure APIs reused by the
//! overlay runtime:
//! - [`mask`] builds circular in-range masks
//! - [`catalog`] maps item kinds to shape rules
//! - [`shape`] unifies masks and explicit footprints
//! - [`area`] accumulates tiles per cycle
//! - [`overlap`] splits them into overlap and non-overlap sets
pub mod area;
pub mod catalog;
pub mod error;
pub mod mask;
pub mod overlap;
pub mod shape;
pub mod tile;

pub use area::{AreaTarget, EffectiveArea};
pub use catalog::{
    CatalogError, DEFAULT_DELUXE_SCARECROW_RADIUS, DEFAULT_SCARECROW_RADIUS, ItemFamily,
    JUNIMO_HUT_CENTER, RangeCatalog, RangeKind, RangeParams, SCARECROW_EDGE_EPSILON,
    SprinklerTier,
};
pub use error::{ErrorSeverity, RangeError};
pub use mask::{Mask, build_circular_mask};
pub use overlap::{Overlap, resolve_overlap};
pub use shape::{Shape, ShapeRule};
pub use tile::{Tile, TileOffset};
