//! Conversions between open `Vec2` rings and `geo` geometries

use geo::orient::{Direction, Orient};
use geo::{Coord, LineString, MultiPolygon};

use super::Vec2;

pub fn to_coord(p: Vec2) -> Coord<f64> {
    geo::coord! { x: p.x, y: p.y }
}

pub fn to_line_string(ring: &[Vec2]) -> LineString<f64> {
    // geo::Polygon::new closes the ring itself
    ring.iter().map(|&p| to_coord(p)).collect()
}

pub fn to_geo_polygon(outer: &[Vec2], holes: &[Vec<Vec2>]) -> geo::Polygon<f64> {
    geo::Polygon::new(
        to_line_string(outer),
        holes.iter().map(|h| to_line_string(h)).collect(),
    )
}

/// Open ring from a closed `geo` ring
pub fn from_line_string(line: &LineString<f64>) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = line.0.iter().map(|c| Vec2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Outer ring and holes of a `geo` polygon, outer counter-clockwise and
/// holes clockwise
pub fn from_geo_polygon(polygon: &geo::Polygon<f64>) -> (Vec<Vec2>, Vec<Vec<Vec2>>) {
    let oriented = polygon.orient(Direction::Default);
    let outer = from_line_string(oriented.exterior());
    let holes = oriented
        .interiors()
        .iter()
        .map(from_line_string)
        .filter(|h| h.len() >= 3)
        .collect();
    (outer, holes)
}

pub fn single(polygon: geo::Polygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::signed_ring_area;

    #[test]
    fn test_round_trip_orientation() {
        // Clockwise outer, counter-clockwise hole
        let outer = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
        ];
        let hole = vec![
            Vec2::new(2.0, 2.0),
            Vec2::new(8.0, 2.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(2.0, 8.0),
        ];

        let polygon = to_geo_polygon(&outer, &[hole]);
        let (outer, holes) = from_geo_polygon(&polygon);

        assert_eq!(outer.len(), 4);
        assert_eq!(holes.len(), 1);
        assert!(signed_ring_area(&outer) > 0.0);
        assert!(signed_ring_area(&holes[0]) < 0.0);
    }

    #[test]
    fn test_from_line_string_drops_closing_point() {
        let line: LineString<f64> = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)].into();
        assert_eq!(from_line_string(&line).len(), 3);
    }
}
