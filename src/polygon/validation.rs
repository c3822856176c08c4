//! Polygon input validation
//!
//! Classifies raw boundary data instead of failing:
//! - Too few points per ring
//! - Non-finite (NaN/Inf) coordinates
//! - Repeated consecutive points and spikes
//! - Crossing or touching edges
//! - Ring winding order
//! - Holes outside the boundary or inside each other

use std::fmt;

use geo::{Contains, Intersects, Line, Point};

use crate::geometry::convert::{to_coord, to_line_string};
use crate::geometry::{Vec2, signed_ring_area};

/// Squared distance below which two points count as the same point
const DUPLICATE_EPSILON_SQ: f64 = 1e-20;

/// Relative tolerance for collinearity in spike detection
const SPIKE_EPSILON: f64 = 1e-12;

/// Classification of a polygon input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonFailureType {
    /// The input is a valid polygon
    Ok,
    /// The outer boundary or a hole has fewer than 3 points
    FewPoints,
    /// A coordinate is NaN or infinite
    InvalidCoordinates,
    /// Two consecutive points of a ring coincide
    DuplicatePoints,
    /// The boundary turns back on itself at a vertex
    Spikes,
    /// Two edges cross or touch
    SelfIntersections,
    /// The outer boundary is not counter-clockwise or a hole is not clockwise
    WrongOrientation,
    /// A hole is not inside the outer boundary
    HoleOutsideOuter,
    /// A hole lies inside another hole
    HolesOverlap,
}

impl PolygonFailureType {
    pub fn is_ok(&self) -> bool {
        *self == PolygonFailureType::Ok
    }
}

impl fmt::Display for PolygonFailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolygonFailureType::Ok => "OK",
            PolygonFailureType::FewPoints => "FewPoints",
            PolygonFailureType::InvalidCoordinates => "InvalidCoordinates",
            PolygonFailureType::DuplicatePoints => "DuplicatePoints",
            PolygonFailureType::Spikes => "Spikes",
            PolygonFailureType::SelfIntersections => "SelfIntersections",
            PolygonFailureType::WrongOrientation => "WrongOrientation",
            PolygonFailureType::HoleOutsideOuter => "HoleOutsideOuter",
            PolygonFailureType::HolesOverlap => "HolesOverlap",
        };
        f.write_str(name)
    }
}

/// Classify an outer boundary with optional holes
///
/// Checks run in a fixed order and the first failure is returned.
pub fn validate(outer: &[Vec2], holes: &[Vec<Vec2>]) -> PolygonFailureType {
    let rings: Vec<&[Vec2]> = std::iter::once(outer)
        .chain(holes.iter().map(|h| h.as_slice()))
        .collect();

    if rings.iter().any(|r| r.len() < 3) {
        return PolygonFailureType::FewPoints;
    }

    if rings.iter().any(|r| has_invalid_coords(r)) {
        return PolygonFailureType::InvalidCoordinates;
    }

    if rings.iter().any(|r| has_duplicate_points(r)) {
        return PolygonFailureType::DuplicatePoints;
    }

    if rings.iter().any(|r| has_spikes(r)) {
        return PolygonFailureType::Spikes;
    }

    if has_intersections(&rings) {
        return PolygonFailureType::SelfIntersections;
    }

    if signed_ring_area(outer) <= 0.0 || holes.iter().any(|h| signed_ring_area(h) >= 0.0) {
        return PolygonFailureType::WrongOrientation;
    }

    if holes.is_empty() {
        return PolygonFailureType::Ok;
    }

    // Edges no longer cross, so one vertex decides containment for a whole ring
    let boundary = geo::Polygon::new(to_line_string(outer), vec![]);
    if holes
        .iter()
        .any(|h| !boundary.contains(&Point::from(to_coord(h[0]))))
    {
        return PolygonFailureType::HoleOutsideOuter;
    }

    let hole_polygons: Vec<geo::Polygon<f64>> = holes
        .iter()
        .map(|h| geo::Polygon::new(to_line_string(h), vec![]))
        .collect();
    for (i, a) in hole_polygons.iter().enumerate() {
        for (j, b) in holes.iter().enumerate() {
            if i != j && a.contains(&Point::from(to_coord(b[0]))) {
                return PolygonFailureType::HolesOverlap;
            }
        }
    }

    PolygonFailureType::Ok
}

fn has_invalid_coords(ring: &[Vec2]) -> bool {
    ring.iter().any(|p| !p.is_finite())
}

fn has_duplicate_points(ring: &[Vec2]) -> bool {
    ring.iter()
        .enumerate()
        .any(|(i, p)| p.distance_squared(ring[(i + 1) % ring.len()]) < DUPLICATE_EPSILON_SQ)
}

/// A spike is a vertex where the incoming and outgoing edges are collinear
/// and point in opposite directions
fn has_spikes(ring: &[Vec2]) -> bool {
    let n = ring.len();
    (0..n).any(|i| {
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let next = ring[(i + 1) % n];

        let e1 = cur - prev;
        let e2 = next - cur;
        let scale = e1.length() * e2.length();

        e1.perp_dot(e2).abs() <= SPIKE_EPSILON * scale && e1.dot(e2) < 0.0
    })
}

fn has_intersections(rings: &[&[Vec2]]) -> bool {
    // (ring index, edge index within ring, ring length, edge)
    let edges: Vec<(usize, usize, usize, Line<f64>)> = rings
        .iter()
        .enumerate()
        .flat_map(|(r, ring)| {
            let n = ring.len();
            (0..n).map(move |i| {
                (
                    r,
                    i,
                    n,
                    Line::new(to_coord(ring[i]), to_coord(ring[(i + 1) % n])),
                )
            })
        })
        .collect();

    for (a, &(ring_a, i, n, line_a)) in edges.iter().enumerate() {
        for &(ring_b, j, _, line_b) in &edges[a + 1..] {
            if ring_a == ring_b && are_adjacent(i, j, n) {
                continue;
            }
            if line_a.intersects(&line_b) {
                return true;
            }
        }
    }

    false
}

/// Edges sharing a vertex within a ring of `n` edges (`i < j`)
fn are_adjacent(i: usize, j: usize, n: usize) -> bool {
    j == i + 1 || (i == 0 && j == n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Vec2> {
        points.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    fn square(min: f64, max: f64) -> Vec<Vec2> {
        ring(&[(min, min), (max, min), (max, max), (min, max)])
    }

    #[test]
    fn test_valid_triangle() {
        let tri = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(validate(&tri, &[]), PolygonFailureType::Ok);
    }

    #[test]
    fn test_few_points() {
        let line = ring(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(validate(&line, &[]), PolygonFailureType::FewPoints);

        let bad_hole = ring(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            validate(&square(0.0, 10.0), &[bad_hole]),
            PolygonFailureType::FewPoints
        );
    }

    #[test]
    fn test_bow_tie_self_intersects() {
        let bow_tie = ring(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(validate(&bow_tie, &[]), PolygonFailureType::SelfIntersections);
    }

    #[test]
    fn test_invalid_coords() {
        let tri = ring(&[(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)]);
        assert_eq!(validate(&tri, &[]), PolygonFailureType::InvalidCoordinates);

        let tri = ring(&[(0.0, 0.0), (f64::INFINITY, 0.0), (0.0, 1.0)]);
        assert_eq!(validate(&tri, &[]), PolygonFailureType::InvalidCoordinates);
    }

    #[test]
    fn test_duplicate_points() {
        let quad = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(validate(&quad, &[]), PolygonFailureType::DuplicatePoints);

        // Explicitly closed ring repeats the first point
        let closed = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(validate(&closed, &[]), PolygonFailureType::DuplicatePoints);
    }

    #[test]
    fn test_spike() {
        // Thin but not folded back onto itself
        let thin = ring(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (2.0, 0.0001), (0.0, 2.0)]);
        assert_eq!(validate(&thin, &[]), PolygonFailureType::Ok);

        let spike = ring(&[(0.0, 0.0), (2.0, 0.0), (3.0, 0.0), (1.0, 0.0), (1.0, 2.0)]);
        assert_eq!(validate(&spike, &[]), PolygonFailureType::Spikes);
    }

    #[test]
    fn test_wrong_orientation() {
        let mut outer = square(0.0, 10.0);
        outer.reverse();
        assert_eq!(validate(&outer, &[]), PolygonFailureType::WrongOrientation);

        // Hole wound the same way as the outer boundary
        let hole = square(2.0, 4.0);
        assert_eq!(
            validate(&square(0.0, 10.0), &[hole]),
            PolygonFailureType::WrongOrientation
        );
    }

    #[test]
    fn test_valid_with_hole() {
        let mut hole = square(2.0, 8.0);
        hole.reverse();
        assert_eq!(
            validate(&square(0.0, 10.0), &[hole]),
            PolygonFailureType::Ok
        );
    }

    #[test]
    fn test_hole_outside_outer() {
        let mut hole = square(20.0, 30.0);
        hole.reverse();
        assert_eq!(
            validate(&square(0.0, 10.0), &[hole]),
            PolygonFailureType::HoleOutsideOuter
        );
    }

    #[test]
    fn test_hole_crossing_outer() {
        let mut hole = square(5.0, 15.0);
        hole.reverse();
        assert_eq!(
            validate(&square(0.0, 10.0), &[hole]),
            PolygonFailureType::SelfIntersections
        );
    }

    #[test]
    fn test_nested_holes() {
        let mut big = square(1.0, 9.0);
        big.reverse();
        let mut small = square(3.0, 5.0);
        small.reverse();
        assert_eq!(
            validate(&square(0.0, 10.0), &[big, small]),
            PolygonFailureType::HolesOverlap
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PolygonFailureType::Ok.to_string(), "OK");
        assert_eq!(
            PolygonFailureType::SelfIntersections.to_string(),
            "SelfIntersections"
        );
        assert!(PolygonFailureType::Ok.is_ok());
        assert!(!PolygonFailureType::Spikes.is_ok());
    }
}
