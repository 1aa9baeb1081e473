//! Footprint - Run-length encoded pixel regions for Rust
//!
//! A [`Footprint`] describes the set of pixels belonging to a detected
//! object as a list of horizontal runs ("spans"), independent of any
//! particular image's pixel values.
//!
//! # Overview
//!
//! - Construction from boxes, circles, ellipses and span lists
//! - Normalization, clipping, shifting and masking
//! - Centroids and second moments
//! - Morphology: isotropic, Manhattan and directional grow/shrink
//! - Set algebra: merging two footprints, including many footprints
//! - Stamping footprints into masks and id images
//! - Table persistence of spans and peaks
//!
//! # Example
//!
//! ```
//! use footprint::{Box2I, Footprint, Point2I};
//!
//! let foot = Footprint::from_box(
//!     Box2I::from_corners(Point2I::new(0, 0), Point2I::new(2, 2)),
//!     Box2I::default(),
//! );
//! assert_eq!(foot.area(), 9);
//! assert_eq!(foot.spans().len(), 3);
//!
//! let grown = footprint::morph::grow_footprint(&foot, 1, footprint::morph::Metric::Manhattan)
//!     .unwrap();
//! assert_eq!(grown.area(), 21);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use footprint_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use footprint_morph as morph;
pub use footprint_region as region;
