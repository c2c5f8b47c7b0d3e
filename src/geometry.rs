//! Winding-number point-in-polygon primitives.
//!
//! Orientation test and winding number per <http://geomalgorithms.com/a03-_inclusion.html>,
//! with x and y swapped for the conventional lat/long ordering of
//! geocoordinates (lat = y, long = x).

use serde::{Deserialize, Serialize};

/// Geographic point (lat/long).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geopoint {
    pub lat: f64,
    pub long: f64,
}

impl Geopoint {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// Directed edge from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub p1: Geopoint,
    pub p2: Geopoint,
}

impl Edge {
    pub fn new(p1: Geopoint, p2: Geopoint) -> Self {
        Self { p1, p2 }
    }
}

/// Tests if a point is left, on, or right of the infinite line through
/// `edge`, directed from `edge.p1` to `edge.p2`.
///
/// Returns `> 0` for left of the line, `= 0` for on the line, `< 0` for
/// right of the line. Inputs are assumed finite; NaN/infinity yield
/// unspecified results.
pub fn orientation(point: Geopoint, edge: Edge) -> f64 {
    (edge.p2.long - edge.p1.long) * (point.lat - edge.p1.lat)
        - (point.long - edge.p1.long) * (edge.p2.lat - edge.p1.lat)
}

/// Winding number of `ring` around `point`. Zero means the point is
/// outside; any other value means inside.
///
/// The ring is implicitly closed: edge `i` runs from vertex `i - 1` (the
/// last vertex when `i` is 0) to vertex `i`, so the caller need not repeat
/// the first point at the end — and a ring that does repeat it produces the
/// same result, since the extra zero-length edge can never cross.
///
/// Crossings follow the half-open rule: an upward edge counts when
/// `start.lat <= point.lat < end.lat` and the point is strictly left of the
/// edge, a downward edge when `end.lat <= point.lat < start.lat` and the
/// point is strictly right. Points exactly on an edge or vertex are
/// classified deterministically by those comparisons but may land on either
/// side; that is the standard trade-off of the method. Degenerate rings
/// (fewer than 3 distinct vertices) always come out 0.
pub fn winding_number(point: Geopoint, ring: &[Geopoint]) -> i32 {
    let mut wn = 0;

    for i in 0..ring.len() {
        let start = ring[if i == 0 { ring.len() - 1 } else { i - 1 }];
        let end = ring[i];

        if start.lat <= point.lat {
            // an upward crossing, point left of the edge
            if end.lat > point.lat && orientation(point, Edge::new(start, end)) > 0.0 {
                wn += 1;
            }
        } else {
            // a downward crossing, point right of the edge
            if end.lat <= point.lat && orientation(point, Edge::new(start, end)) < 0.0 {
                wn -= 1;
            }
        }
    }

    wn
}
