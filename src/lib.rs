//! Larch - winding-number point-to-region lookup
//!
//! Given a lat/long coordinate and a precomputed set of region borders,
//! resolve which region contains the point. The geometry kernel and locator
//! are pure and synchronous; loading the borders dataset is the job of the
//! data-preparation layer in [`dataset`].

pub mod dataset;
pub mod geometry;
pub mod locator;
pub mod models;

pub use geometry::{orientation, winding_number, Edge, Geopoint};
pub use locator::{LocateStats, RegionLocator};
pub use models::{BordersDataset, BoundingBox, Polygon, Region};
