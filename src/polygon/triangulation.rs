use earcutr::earcut;

use crate::geometry::{Float2, TriangleIndex, Vec2};

/// Vertex buffer and triangle list produced by earcut
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Float2>,
    pub indices: Vec<TriangleIndex>,
}

/// Flatten the outer ring followed by every hole into a reduced-precision
/// vertex buffer, in the order earcut indexes them
pub fn flatten_vertices(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<Float2> {
    outer
        .iter()
        .chain(holes.iter().flatten())
        .map(|p| p.as_vec2())
        .collect()
}

/// Triangulate a polygon with holes
///
/// Returns an error message when earcut rejects the input. Fewer than three
/// outer points give an empty triangulation.
pub fn triangulate(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Result<Triangulation, String> {
    if outer.len() < 3 {
        return Ok(Triangulation::default());
    }

    let mut coords: Vec<f64> =
        Vec::with_capacity((outer.len() + holes.iter().map(|h| h.len()).sum::<usize>()) * 2);
    let mut hole_indices: Vec<usize> = Vec::with_capacity(holes.len());

    for p in outer {
        coords.push(p.x);
        coords.push(p.y);
    }

    for hole in holes {
        hole_indices.push(coords.len() / 2);
        for p in hole {
            coords.push(p.x);
            coords.push(p.y);
        }
    }

    let flat = earcut(&coords, &hole_indices, 2).map_err(|e| format!("{e:?}"))?;

    Ok(Triangulation {
        vertices: flatten_vertices(outer, holes),
        indices: TriangleIndex::from_flat(&flat),
    })
}
