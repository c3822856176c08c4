//! Outward/inward offsetting of polygon boundaries
//!
//! The boundary is swept by a stroke of half-width `|distance|`: one
//! rectangle per edge plus a join piece per vertex. The stroke is merged
//! with `geo` boolean operations and then added to (positive distance) or
//! subtracted from (negative distance) the polygon.

use std::f64::consts::TAU;

use geo::orient::{Direction, Orient};
use geo::{Area, BooleanOps, MultiPolygon};

use crate::geometry::Vec2;
use crate::geometry::convert::{from_geo_polygon, single, to_geo_polygon, to_line_string};

/// Default ratio of miter length to buffer distance before falling back to a bevel
pub const DEFAULT_MITER_LIMIT: f64 = 5.0;

/// Default number of segments approximating a full circle for round joins
pub const DEFAULT_ROUND_SEGMENTS: u32 = 32;

const MIN_EDGE_LENGTH: f64 = 1e-12;
const PARALLEL_EPSILON: f64 = 1e-12;

/// How offset edges are connected at polygon vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineJoin {
    /// Extend edges until they meet, beveling beyond `limit * distance`
    Miter { limit: f64 },
    /// Connect edges with circular arcs of `segments` per full turn
    Round { segments: u32 },
}

/// Parameters for a buffer operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferStyle {
    /// Positive grows the polygon, negative shrinks it
    pub distance: f64,
    pub join: LineJoin,
}

impl BufferStyle {
    pub fn mitered(distance: f64) -> Self {
        Self {
            distance,
            join: LineJoin::Miter {
                limit: DEFAULT_MITER_LIMIT,
            },
        }
    }

    pub fn round(distance: f64) -> Self {
        Self {
            distance,
            join: LineJoin::Round {
                segments: DEFAULT_ROUND_SEGMENTS,
            },
        }
    }

    /// Set the miter limit (only affects mitered styles)
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        if let LineJoin::Miter { .. } = self.join {
            self.join = LineJoin::Miter {
                limit: limit.max(1.0),
            };
        }
        self
    }

    /// Set the circle resolution (only affects round styles)
    pub fn with_round_segments(mut self, segments: u32) -> Self {
        if let LineJoin::Round { .. } = self.join {
            self.join = LineJoin::Round {
                segments: segments.max(4),
            };
        }
        self
    }
}

/// Buffer an outer ring with holes
///
/// Returns the largest resulting component as `(outer, holes)`, or `None`
/// when nothing is left.
pub fn buffer_rings(
    outer: &[Vec2],
    holes: &[Vec<Vec2>],
    style: &BufferStyle,
) -> Option<(Vec<Vec2>, Vec<Vec<Vec2>>)> {
    if outer.len() < 3 {
        return None;
    }

    if style.distance == 0.0 {
        return Some((outer.to_vec(), holes.to_vec()));
    }

    let base = single(to_geo_polygon(outer, holes).orient(Direction::Default));
    let half_width = style.distance.abs();
    let mut pieces = Vec::new();
    for ring in std::iter::once(outer).chain(holes.iter().map(|h| h.as_slice())) {
        stroke_ring(ring, half_width, style.join, &mut pieces);
    }

    let stroke = union_all(pieces);
    let result = if style.distance > 0.0 {
        base.union(&stroke)
    } else {
        base.difference(&stroke)
    };

    let largest = result
        .0
        .into_iter()
        .map(|p| (p.unsigned_area(), p))
        .filter(|(area, _)| *area > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)?;

    let (outer, holes) = from_geo_polygon(&largest);
    if outer.len() < 3 {
        return None;
    }

    Some((outer, holes))
}

/// Push one rectangle per edge and one join piece per vertex of `ring`
fn stroke_ring(
    ring: &[Vec2],
    half_width: f64,
    join: LineJoin,
    pieces: &mut Vec<MultiPolygon<f64>>,
) {
    let n = ring.len();
    if n < 2 {
        return;
    }

    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let dir = b - a;
        let len = dir.length();
        if len < MIN_EDGE_LENGTH {
            continue;
        }

        let offset = dir.perp() / len * half_width;
        push_piece(pieces, &[a + offset, a - offset, b - offset, b + offset]);
    }

    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let next = ring[(i + 1) % n];

        let piece = match join {
            LineJoin::Round { segments } => Some(circle(cur, half_width, segments)),
            LineJoin::Miter { limit } => miter_piece(prev, cur, next, half_width, limit),
        };

        if let Some(piece) = piece {
            push_piece(pieces, &piece);
        }
    }
}

/// Wedge filling the gap between two edge rectangles on the outer side of a turn
fn miter_piece(
    prev: Vec2,
    cur: Vec2,
    next: Vec2,
    half_width: f64,
    limit: f64,
) -> Option<Vec<Vec2>> {
    let e1 = (cur - prev).normalize_or_zero();
    let e2 = (next - cur).normalize_or_zero();
    if e1 == Vec2::ZERO || e2 == Vec2::ZERO {
        return None;
    }

    let cross = e1.perp_dot(e2);
    let dot = e1.dot(e2);
    if cross.abs() < PARALLEL_EPSILON && dot > 0.0 {
        return None;
    }

    // Left turns open a gap on the right side and vice versa
    let (n1, n2) = if cross > 0.0 {
        (-e1.perp(), -e2.perp())
    } else {
        (e1.perp(), e2.perp())
    };

    let p1 = cur + n1 * half_width;
    let p2 = cur + n2 * half_width;
    let denom = 1.0 + n1.dot(n2);

    if denom < PARALLEL_EPSILON {
        // Full reversal: square cap ahead of the vertex
        let ahead = e1 * half_width;
        return Some(vec![p1, p1 + ahead, p2 + ahead, p2]);
    }

    if (2.0 / denom).sqrt() <= limit {
        let miter = cur + (n1 + n2) * (half_width / denom);
        Some(vec![cur, p1, miter, p2])
    } else {
        Some(vec![cur, p1, p2])
    }
}

fn circle(center: Vec2, radius: f64, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(4);
    (0..segments)
        .map(|k| {
            let angle = TAU * k as f64 / segments as f64;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn push_piece(pieces: &mut Vec<MultiPolygon<f64>>, ring: &[Vec2]) {
    let polygon = geo::Polygon::new(to_line_string(ring), vec![]);
    if polygon.unsigned_area() <= 0.0 {
        return;
    }
    pieces.push(single(polygon.orient(Direction::Default)));
}

/// Merge pieces pairwise so each union works on similarly sized inputs
fn union_all(mut parts: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    while parts.len() > 1 {
        parts = parts
            .chunks(2)
            .map(|pair| pair[1..].iter().fold(pair[0].clone(), |acc, p| acc.union(p)))
            .collect();
    }
    parts.pop().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}
