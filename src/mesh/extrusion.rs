use std::collections::HashMap;

use super::Solid;
use crate::geometry::{Float2, TriangleIndex, stroke_triangulation};

/// Extrude a triangulated 2D region into a closed solid between two heights
///
/// Triangles are rewound counter-clockwise before use. Side walls are built
/// from the boundary edges, i.e. edges used by exactly one triangle, so
/// holes get their inner walls too. Triangles indexing past `vertices` are
/// skipped.
pub fn extrude_triangulation(
    vertices: &[Float2],
    indices: &[TriangleIndex],
    z_bottom: f32,
    z_top: f32,
) -> Solid {
    let mut solid = Solid::new();
    let mut edge_use: HashMap<(u32, u32), usize> = HashMap::new();
    let mut directed: Vec<(u32, u32)> = Vec::with_capacity(indices.len() * 3);

    let at = |i: u32, z: f32| vertices[i as usize].extend(z);

    for tri in indices {
        if tri.max_index() as usize >= vertices.len() {
            continue;
        }

        let [a, mut b, mut c] = tri.as_array();
        let pa = vertices[a as usize];
        if (vertices[b as usize] - pa).perp_dot(vertices[c as usize] - pa) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }

        solid.push_triangle(at(a, z_top), at(b, z_top), at(c, z_top));
        solid.push_triangle(at(a, z_bottom), at(c, z_bottom), at(b, z_bottom));

        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_use.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            directed.push((u, v));
        }
    }

    for (u, v) in directed {
        if edge_use.get(&(u.min(v), u.max(v))) == Some(&1) {
            // Interior lies to the left of u -> v, so this quad faces outwards
            solid.push_quad(at(u, z_bottom), at(v, z_bottom), at(v, z_top), at(u, z_top));
        }
    }

    solid
}

/// Extrude a polyline stroked to `width` into a solid wall
///
/// Open strokes are capped at both ends by their boundary walls; closed
/// strokes form a ring.
pub fn extrude_stroke(
    points: &[Float2],
    width: f32,
    z_bottom: f32,
    z_top: f32,
    closed: bool,
) -> Solid {
    let (vertices, indices) = stroke_triangulation(points, width, closed);
    extrude_triangulation(&vertices, &indices, z_bottom, z_top)
}
