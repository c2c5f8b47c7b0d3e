//! Loader for the borders exchange format.
//!
//! The data-preparation pipeline (shapefile download and conversion) emits a
//! JSON document mapping each region code to its polygon rings:
//!
//! ```json
//! { "PA": { "polygons": [ [ [40.1, -75.2], [40.9, -75.0], ... ] ] } }
//! ```
//!
//! Coordinate pairs are `[lat, long]`. Bounding boxes are recomputed here at
//! load time, so the format carries geometry only. The lookup core never
//! touches files; this module is the boundary between it and the data
//! producer.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::geometry::Geopoint;
use crate::models::{BordersDataset, Polygon, Region};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read borders file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse borders file")]
    Parse(#[from] serde_json::Error),

    #[error("region {code} has no vertices")]
    EmptyRegion { code: String },
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    /// Rings as `[lat, long]` pairs.
    polygons: Vec<Vec<[f64; 2]>>,
}

/// Read and parse a borders file from disk.
pub fn load_borders(path: impl AsRef<Path>) -> Result<BordersDataset, DatasetError> {
    let path = path.as_ref();
    info!("Reading borders data from {}", path.display());
    let file = File::open(path)?;
    parse_borders(BufReader::new(file))
}

/// Parse the borders exchange format from any reader.
pub fn parse_borders(reader: impl Read) -> Result<BordersDataset, DatasetError> {
    let raw: BTreeMap<String, RawRegion> = serde_json::from_reader(reader)?;

    let mut regions = Vec::with_capacity(raw.len());
    let mut vertex_count = 0usize;

    for (code, raw_region) in raw {
        let polygons: Vec<Polygon> = raw_region
            .polygons
            .into_iter()
            .map(|ring| {
                vertex_count += ring.len();
                Polygon(ring.into_iter().map(|[lat, long]| Geopoint::new(lat, long)).collect())
            })
            .collect();

        let region =
            Region::new(code.clone(), polygons).ok_or(DatasetError::EmptyRegion { code })?;
        regions.push(region);
    }

    let dataset = BordersDataset::new(regions);
    info!(
        "Loaded {} regions ({} vertices total)",
        dataset.len(),
        vertex_count
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let json = r#"{
            "SQ": { "polygons": [ [ [1, 1], [5, 1], [5, 6], [1, 6] ] ] },
            "IS": { "polygons": [
                [ [10, 10], [20, 10], [20, 20], [10, 20] ],
                [ [30, 40], [32, 40], [32, 42], [30, 42] ]
            ] }
        }"#;

        let dataset = parse_borders(json.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);

        let sq = dataset.get("SQ").unwrap();
        assert_eq!(sq.polygons.len(), 1);
        assert_eq!(sq.polygons[0].vertices()[0], Geopoint::new(1.0, 1.0));
        assert_eq!(sq.bbox.north, 5.0);
        assert_eq!(sq.bbox.east, 6.0);

        let is = dataset.get("IS").unwrap();
        assert_eq!(is.polygons.len(), 2);
        assert_eq!(is.bbox.east, 42.0);
    }

    #[test]
    fn rejects_region_without_vertices() {
        let json = r#"{ "XX": { "polygons": [] } }"#;
        let err = parse_borders(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyRegion { ref code } if code == "XX"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_borders(&b"not json"[..]).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn loaded_dataset_supports_lookup() {
        use crate::locator::RegionLocator;

        let json = r#"{ "SQ": { "polygons": [ [ [1, 1], [5, 1], [5, 6], [1, 6] ] ] } }"#;
        let locator = RegionLocator::new(parse_borders(json.as_bytes()).unwrap());

        assert_eq!(locator.locate(Geopoint::new(2.0, 3.0)), Some("SQ"));
        assert_eq!(locator.locate(Geopoint::new(0.0, 0.0)), None);
    }
}
