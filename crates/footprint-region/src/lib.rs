//! footprint-region - Region labeling and set algebra for footprints
//!
//! This crate provides the operations that combine footprints or derive
//! them from masks:
//!
//! - **Connected components** - [`find_footprints`] turns the set bits of
//!   a mask into one footprint per component
//! - **Merge** - [`merge_footprints`] is the union of two normalized
//!   footprints by a single sweep over their spans
//! - **Include** - [`FootprintIncludeExt::include`] is the union of a
//!   footprint with any number of others, through a scratch mask
//! - **Nearest footprint** - [`nearest_footprint`] is a Manhattan distance
//!   map to a list of footprints
//!
//! # Examples
//!
//! ## Merging two footprints
//!
//! ```
//! use footprint_core::{Box2I, Footprint};
//! use footprint_region::merge_footprints;
//!
//! let a = Footprint::from_box(Box2I::new_unchecked(0, 0, 3, 1), Box2I::default());
//! let b = Footprint::from_box(Box2I::new_unchecked(3, 0, 2, 2), Box2I::default());
//! let merged = merge_footprints(&a, &b).unwrap();
//! assert_eq!(merged.area(), 7);
//! assert_eq!(merged.spans().len(), 2);
//! ```
//!
//! ## Including several footprints
//!
//! ```
//! use footprint_core::{Box2I, Footprint};
//! use footprint_region::FootprintIncludeExt;
//!
//! let mut foot = Footprint::from_box(Box2I::new_unchecked(0, 0, 2, 2), Box2I::default());
//! let others = [Footprint::from_box(Box2I::new_unchecked(4, 0, 1, 1), Box2I::default())];
//! foot.include(&others, false).unwrap();
//! assert_eq!(foot.area(), 5);
//! ```

pub mod conncomp;
pub mod error;
pub mod include;
pub mod merge;
pub mod nearest;

// Re-export core types
pub use footprint_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::{ConnectivityType, find_footprints};
pub use include::FootprintIncludeExt;
pub use merge::{merge_footprints, merge_footprints_mut};
pub use nearest::{NO_FOOTPRINT, nearest_footprint};
