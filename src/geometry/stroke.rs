//! Thick-line outlines for polylines and rings

use super::{Float2, TriangleIndex};

/// Left and right outline points of a polyline stroked to `width`
///
/// Interior points use the averaged direction of their two segments (miter
/// join). Closed polylines treat the first and last point as neighbours.
pub fn stroke_edges(points: &[Float2], width: f32, closed: bool) -> Vec<(Float2, Float2)> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let half_width = width / 2.0;
    let direction = |from: Float2, to: Float2| unit_or_x(to - from);

    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let prev = if closed || i > 0 { Some(points[(i + n - 1) % n]) } else { None };
            let next = if closed || i + 1 < n { Some(points[(i + 1) % n]) } else { None };

            let dir = match (prev, next) {
                (Some(a), Some(b)) => unit_or_x(direction(a, p) + direction(p, b)),
                (None, Some(b)) => direction(p, b),
                (Some(a), None) => direction(a, p),
                (None, None) => Float2::X,
            };

            let side = dir.perp() * half_width;
            (p + side, p - side)
        })
        .collect()
}

/// Index pairs of the segments making up a polyline of `n` points
pub fn segments(n: usize, closed: bool) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }

    let mut segments: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    if closed && n > 2 {
        segments.push((n - 1, 0));
    }
    segments
}

/// Triangulated stroke: two vertices per input point, two triangles per segment
///
/// Vertex `2 * i` is the left outline point of input point `i` and `2 * i + 1`
/// the right one.
pub fn stroke_triangulation(
    points: &[Float2],
    width: f32,
    closed: bool,
) -> (Vec<Float2>, Vec<TriangleIndex>) {
    let edges = stroke_edges(points, width, closed);
    let vertices: Vec<Float2> = edges.iter().flat_map(|&(l, r)| [l, r]).collect();

    let indices = segments(edges.len(), closed)
        .into_iter()
        .flat_map(|(i, j)| {
            let (l0, r0) = (2 * i as u32, 2 * i as u32 + 1);
            let (l1, r1) = (2 * j as u32, 2 * j as u32 + 1);
            [TriangleIndex::new(l0, r0, r1), TriangleIndex::new(l0, r1, l1)]
        })
        .collect();

    (vertices, indices)
}

fn unit_or_x(v: Float2) -> Float2 {
    let len = v.length();
    if len > 1e-10 { v / len } else { Float2::X }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_edges_width() {
        let points = vec![Float2::new(0.0, 0.0), Float2::new(10.0, 0.0)];
        let edges = stroke_edges(&points, 2.0, false);

        assert_eq!(edges.len(), 2);
        let (left, right) = edges[0];
        assert!((left.distance(right) - 2.0).abs() < 1e-6);
        assert!((left.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_stroke_edges_single_point() {
        assert!(stroke_edges(&[Float2::ZERO], 1.0, true).is_empty());
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments(3, false), vec![(0, 1), (1, 2)]);
        assert_eq!(segments(3, true), vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(segments(2, true), vec![(0, 1)]);
        assert!(segments(1, true).is_empty());
    }

    #[test]
    fn test_stroke_triangulation_counts() {
        let ring = vec![
            Float2::new(0.0, 0.0),
            Float2::new(10.0, 0.0),
            Float2::new(10.0, 10.0),
            Float2::new(0.0, 10.0),
        ];

        let (vertices, indices) = stroke_triangulation(&ring, 1.0, true);
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 8);

        let (_, open) = stroke_triangulation(&ring, 1.0, false);
        assert_eq!(open.len(), 6);
    }

    #[test]
    fn test_straight_stroke_covers_length_times_width() {
        let points = vec![Float2::new(0.0, 0.0), Float2::new(4.0, 0.0), Float2::new(8.0, 0.0)];
        let (vertices, indices) = stroke_triangulation(&points, 0.5, false);

        let area: f32 = indices
            .iter()
            .map(|t| {
                let [a, b, c] = t.as_array().map(|i| vertices[i as usize]);
                ((b - a).perp_dot(c - a) / 2.0).abs()
            })
            .sum();
        assert!((area - 4.0).abs() < 1e-5);
    }
}
