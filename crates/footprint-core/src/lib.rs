//! Footprint Core - run-length encoded pixel regions
//!
//! This crate provides the data structures shared by the footprint
//! crates:
//!
//! - [`Span`] - a horizontal run of pixels on one row
//! - [`Footprint`] - a set of spans with cached area, bounding box and peaks
//! - [`PeakCatalog`] / [`PeakRecord`] / [`PeakSchema`] - peaks attached to a footprint
//! - [`Image`] / [`Mask`] - pixel buffers positioned in the parent frame
//! - [`Box2I`] / [`Point2I`] / [`Ellipse`] - geometry primitives
//! - [`Catalog`] / [`Schema`] - columnar tables used for persistence
//!
//! Morphology lives in `footprint-morph`; merging, inclusion and
//! connected-component detection live in `footprint-region`.

pub mod error;
pub mod footprint;
pub mod geom;
pub mod image;
pub mod peak;
pub mod span;
pub mod table;

pub use error::{Error, Result};
pub use footprint::{Footprint, footprint_and_mask};
pub use footprint::raster::{
    InsertOptions, clear_mask_from_footprint, copy_within_footprint, footprint_to_bbox_list,
    set_footprint_array_ids, set_footprint_id, set_image_from_footprint,
    set_image_from_footprint_list, set_mask_from_footprint, set_mask_from_footprint_list,
};
pub use geom::{
    AffineProjection, Box2D, Box2I, Ellipse, PixelRegion, Point2D, Point2I, Projection,
    Quadrupole, SkyPoint,
};
pub use image::{Image, Mask, MaskPixel, Pixel};
pub use peak::{MINIMAL_PEAK_FIELDS, PeakCatalog, PeakKey, PeakRecord, PeakSchema};
pub use span::Span;
pub use table::{Catalog, Field, FieldType, FieldValue, Schema};
