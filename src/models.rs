//! Borders data model: polygons, bounding boxes, regions, and the dataset
//! mapping region codes to geometry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::Geopoint;

/// Closed polygon ring. The closing edge from the last vertex back to the
/// first is implicit; a repeated first vertex at the end is tolerated but
/// not required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon(pub Vec<Geopoint>);

impl Polygon {
    pub fn vertices(&self) -> &[Geopoint] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Axis-aligned extent of a region in lat/long: the rectangle spanned by the
/// northernmost, southernmost, easternmost and westernmost vertex across all
/// of the region's polygons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Extent of a single point.
    pub fn from_point(p: Geopoint) -> Self {
        Self {
            north: p.lat,
            south: p.lat,
            east: p.long,
            west: p.long,
        }
    }

    /// Grow to include `p`.
    pub fn expand(&mut self, p: Geopoint) {
        if p.lat > self.north {
            self.north = p.lat;
        }
        if p.lat < self.south {
            self.south = p.lat;
        }
        if p.long > self.east {
            self.east = p.long;
        }
        if p.long < self.west {
            self.west = p.long;
        }
    }

    /// Closed-interval containment test; the O(1) prefilter predicate.
    pub fn contains(&self, p: Geopoint) -> bool {
        !(p.lat > self.north || p.lat < self.south || p.long > self.east || p.long < self.west)
    }
}

/// A named region: a short code plus one or more polygon rings and their
/// union bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub polygons: Vec<Polygon>,
    pub bbox: BoundingBox,
}

impl Region {
    /// Build a region, computing the bounding box as the union of the
    /// extents of every vertex of every polygon. Returns `None` when the
    /// polygons hold no vertices at all — such a region has no defined
    /// extent and cannot participate in lookups.
    pub fn new(code: impl Into<String>, polygons: Vec<Polygon>) -> Option<Self> {
        let mut vertices = polygons.iter().flat_map(|p| p.vertices().iter().copied());

        let mut bbox = BoundingBox::from_point(vertices.next()?);
        for v in vertices {
            bbox.expand(v);
        }

        Some(Self {
            code: code.into(),
            polygons,
            bbox,
        })
    }
}

/// Mapping from region code to region geometry. Built once by the data
/// preparation layer and read-only afterwards; iteration is sorted by code,
/// so lookup results are reproducible even for overlapping geometries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BordersDataset {
    regions: BTreeMap<String, Region>,
}

impl BordersDataset {
    /// Collect regions into a dataset. A later region with a duplicate code
    /// replaces the earlier one.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        Self {
            regions: regions.into_iter().map(|r| (r.code.clone(), r)).collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Region> {
        self.regions.get(code)
    }

    /// Regions in sorted code order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coords: &[(f64, f64)]) -> Polygon {
        Polygon(coords.iter().map(|&(lat, long)| Geopoint::new(lat, long)).collect())
    }

    #[test]
    fn bbox_spans_all_polygons() {
        let region = Region::new(
            "IS",
            vec![
                poly(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0)]),
                poly(&[(30.0, 40.0), (32.0, 40.0), (32.0, 42.0), (30.0, 42.0)]),
            ],
        )
        .unwrap();

        assert_eq!(region.bbox.south, 10.0);
        assert_eq!(region.bbox.west, 10.0);
        assert_eq!(region.bbox.north, 32.0);
        assert_eq!(region.bbox.east, 42.0);
        assert!(region.bbox.north >= region.bbox.south);
        assert!(region.bbox.east >= region.bbox.west);
    }

    #[test]
    fn bbox_contains_is_closed() {
        let region = Region::new("SQ", vec![poly(&[(1.0, 1.0), (5.0, 1.0), (5.0, 6.0), (1.0, 6.0)])])
            .unwrap();

        assert!(region.bbox.contains(Geopoint::new(3.0, 3.0)));
        assert!(region.bbox.contains(Geopoint::new(1.0, 1.0))); // corner
        assert!(region.bbox.contains(Geopoint::new(5.0, 6.0))); // corner
        assert!(!region.bbox.contains(Geopoint::new(0.0, 0.0)));
        assert!(!region.bbox.contains(Geopoint::new(3.0, 6.5)));
    }

    #[test]
    fn region_without_vertices_has_no_extent() {
        assert!(Region::new("XX", vec![]).is_none());
        assert!(Region::new("XX", vec![Polygon(vec![])]).is_none());
    }

    #[test]
    fn dataset_iterates_in_code_order() {
        let mk = |code: &str| {
            Region::new(code, vec![poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])]).unwrap()
        };
        let dataset = BordersDataset::new(vec![mk("TX"), mk("AK"), mk("PA")]);

        let codes: Vec<_> = dataset.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["AK", "PA", "TX"]);
        assert_eq!(dataset.len(), 3);
        assert!(dataset.get("PA").is_some());
        assert!(dataset.get("ZZ").is_none());
    }
}
