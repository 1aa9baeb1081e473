//! footprint-morph - Run-length morphology for footprints
//!
//! This crate grows (dilates) and shrinks (erodes) footprints directly on
//! their span lists, without rasterizing:
//!
//! - [`StructuringElement`] - disk, diamond or directional cross
//! - [`grow_footprint`] / [`grow_footprint_directional`] - dilation
//! - [`shrink_footprint`] / [`shrink_footprint_directional`] - erosion
//!
//! Both operations cost `O(spans x element rows)` plus a sort.

mod error;
pub mod grow;
pub mod sel;
pub mod shrink;

pub use error::{MorphError, MorphResult};
pub use grow::{grow_footprint, grow_footprint_directional, grow_with};
pub use sel::{Directions, Metric, StructuringElement};
pub use shrink::{shrink_footprint, shrink_footprint_directional, shrink_with};
