//! Region lookup: bounding-box prefilter plus per-polygon winding numbers.

use tracing::info;

use crate::geometry::{winding_number, Geopoint};
use crate::models::BordersDataset;

/// Work counters for a single lookup, exposed so callers (and tests) can
/// observe how much of the dataset the prefilter skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateStats {
    /// Regions whose bounding box the prefilter rejected outright.
    pub bbox_rejections: usize,
    /// Winding-number evaluations actually performed.
    pub winding_tests: usize,
}

/// Point-to-region lookup over an immutable borders dataset.
///
/// The dataset is never mutated after construction, so a shared
/// `RegionLocator` can serve lookups from any number of threads without
/// locking.
pub struct RegionLocator {
    dataset: BordersDataset,
}

impl RegionLocator {
    pub fn new(dataset: BordersDataset) -> Self {
        info!("Region locator ready with {} regions", dataset.len());
        Self { dataset }
    }

    /// Code of the region containing `point`, or `None` when no region
    /// does. `None` is an ordinary outcome (a point outside the dataset's
    /// coverage), not an error.
    ///
    /// Regions are scanned in sorted code order. For each region whose
    /// bounding box contains the point, polygons are tested in turn; the
    /// first non-zero winding number settles the lookup. A region composed
    /// of several disjoint rings therefore matches when the point falls in
    /// any one of them.
    pub fn locate(&self, point: Geopoint) -> Option<&str> {
        self.locate_inner(point, &mut LocateStats::default())
    }

    /// Same lookup as [`locate`](Self::locate), also reporting how many
    /// regions the prefilter rejected and how many winding numbers were
    /// computed.
    pub fn locate_with_stats(&self, point: Geopoint) -> (Option<&str>, LocateStats) {
        let mut stats = LocateStats::default();
        let code = self.locate_inner(point, &mut stats);
        (code, stats)
    }

    fn locate_inner(&self, point: Geopoint, stats: &mut LocateStats) -> Option<&str> {
        for region in self.dataset.iter() {
            if !region.bbox.contains(point) {
                stats.bbox_rejections += 1;
                continue;
            }

            for polygon in &region.polygons {
                stats.winding_tests += 1;
                if winding_number(point, polygon.vertices()) != 0 {
                    return Some(&region.code);
                }
            }
        }

        None
    }

    pub fn dataset(&self) -> &BordersDataset {
        &self.dataset
    }
}
