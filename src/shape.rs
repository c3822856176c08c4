//! Simple shapes with known triangulations
//!
//! Every shape is a single counter-clockwise ring (y up) whose triangle list
//! is built directly, so no triangulation pass is needed when turning one
//! into a [`Polygon`](crate::Polygon).

use std::f64::consts::TAU;

use crate::geometry::{Float2, TriangleIndex, Vec2};

/// Vertex ring plus triangle list of a simple shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape2D {
    vertices: Vec<Float2>,
    indices: Vec<TriangleIndex>,
}

impl Shape2D {
    /// Regular polygon with `n` corners, the first one `angle` radians
    /// counter-clockwise from straight up
    pub fn ngon(n: u32, radius: f64, center: Vec2, angle: f64) -> Self {
        if n < 3 || radius <= 0.0 {
            return Self::default();
        }

        let vertices = (0..n)
            .map(|k| polar(center, radius, angle + TAU * k as f64 / n as f64))
            .collect();

        Self {
            vertices,
            indices: fan(0..n),
        }
    }

    /// Star with `n` points alternating between the outer and inner radius
    pub fn star(n: u32, outer_radius: f64, inner_radius: f64, center: Vec2, angle: f64) -> Self {
        if n < 3 || outer_radius <= 0.0 || inner_radius <= 0.0 {
            return Self::default();
        }

        let count = n * 2;
        let vertices = (0..count)
            .map(|k| {
                let r = if k % 2 == 0 { outer_radius } else { inner_radius };
                polar(center, r, angle + TAU * k as f64 / count as f64)
            })
            .collect();

        // Inner polygon over the odd vertices, then one triangle per point
        let mut indices = fan((0..n).map(|k| 2 * k + 1));
        for k in 0..n {
            let before = (2 * k + count - 1) % count;
            indices.push(TriangleIndex::new(before, 2 * k, 2 * k + 1));
        }

        Self { vertices, indices }
    }

    /// Rhombus with the given diagonals, corners at top, left, bottom, right
    pub fn rhombus(width: f64, height: f64, center: Vec2, angle: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }

        let (w, h) = (width / 2.0, height / 2.0);
        let corners = [(0.0, h), (-w, 0.0), (0.0, -h), (w, 0.0)];

        Self {
            vertices: place(&corners, center, angle),
            indices: fan(0..4),
        }
    }

    /// Plus sign: two bars of `thickness` crossing over a `size` square
    pub fn plus(size: f64, thickness: f64, center: Vec2, angle: f64) -> Self {
        if size <= 0.0 || thickness <= 0.0 || thickness >= size {
            return Self::default();
        }

        let (s, t) = (size / 2.0, thickness / 2.0);
        let corners = [
            (s, -t),
            (s, t),
            (t, t),
            (t, s),
            (-t, s),
            (-t, t),
            (-s, t),
            (-s, -t),
            (-t, -t),
            (-t, -s),
            (t, -s),
            (t, -t),
        ];

        let indices = [
            // center square
            (2, 5, 8),
            (2, 8, 11),
            // right, top, left, bottom arms
            (11, 0, 1),
            (11, 1, 2),
            (2, 3, 4),
            (2, 4, 5),
            (5, 6, 7),
            (5, 7, 8),
            (8, 9, 10),
            (8, 10, 11),
        ]
        .into_iter()
        .map(|(a, b, c)| TriangleIndex::new(a, b, c))
        .collect();

        Self {
            vertices: place(&corners, center, angle),
            indices,
        }
    }

    pub fn vertices(&self) -> &[Float2] {
        &self.vertices
    }

    pub fn indices(&self) -> &[TriangleIndex] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Triangle fan over the ring positions yielded by `ring`
fn fan(ring: impl IntoIterator<Item = u32>) -> Vec<TriangleIndex> {
    let ring: Vec<u32> = ring.into_iter().collect();
    ring.windows(2)
        .skip(1)
        .map(|w| TriangleIndex::new(ring[0], w[0], w[1]))
        .collect()
}

fn polar(center: Vec2, radius: f64, angle: f64) -> Float2 {
    (center + Vec2::new(-angle.sin(), angle.cos()) * radius).as_vec2()
}

fn place(corners: &[(f64, f64)], center: Vec2, angle: f64) -> Vec<Float2> {
    let (sin, cos) = angle.sin_cos();
    corners
        .iter()
        .map(|&(x, y)| (center + Vec2::new(x * cos - y * sin, x * sin + y * cos)).as_vec2())
        .collect()
}
