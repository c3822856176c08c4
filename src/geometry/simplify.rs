use geo::{LineString, Simplify};

use super::Vec2;

/// Douglas-Peucker simplification of a closed ring
///
/// The ring is stored open. It is closed for simplification and reopened on
/// return. Returns `None` when the result would have fewer than 3 points.
pub fn simplify_ring(ring: &[Vec2], epsilon: f64) -> Option<Vec<Vec2>> {
    if ring.len() < 3 {
        return None;
    }
    if ring.len() < 4 || epsilon <= 0.0 {
        return Some(ring.to_vec());
    }

    let line: LineString<f64> = ring
        .iter()
        .chain(std::iter::once(&ring[0]))
        .map(|p| geo::coord! { x: p.x, y: p.y })
        .collect();

    let simplified = line.simplify(&epsilon);

    let mut points: Vec<Vec2> = simplified.0.into_iter().map(|c| Vec2::new(c.x, c.y)).collect();
    points.pop();

    if points.len() < 3 {
        return None;
    }

    Some(points)
}
