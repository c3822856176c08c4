use log::debug;

use super::{Renderer2D, RendererBackend};
use crate::color::ColorF;
use crate::geometry::{Float2, TriangleIndex, Vec2, stroke_triangulation};

/// A colored vertex as uploaded to a GPU vertex buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex2D {
    pub pos: Float2,
    pub color: [f32; 4],
}

/// Renderer that accumulates submissions into one indexed triangle list
///
/// Line strings are stroked into quads on submission, so after any sequence
/// of draws the batch holds nothing but triangles.
#[derive(Debug, Default)]
pub struct BatchRenderer {
    vertices: Vec<Vertex2D>,
    indices: Vec<u32>,
    draw_calls: usize,
}

impl BatchRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex2D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Submissions since the last flush
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn base_index(&self) -> u32 {
        self.vertices.len() as u32
    }
}

impl Renderer2D for BatchRenderer {
    fn backend(&self) -> RendererBackend {
        RendererBackend::Batch
    }

    fn add_polygon(&mut self, vertices: &[Float2], indices: &[TriangleIndex], color: &ColorF) {
        self.draw_calls += 1;
        let color = color.to_float4();
        let base = self.base_index();

        self.vertices
            .extend(vertices.iter().map(|&pos| Vertex2D { pos, color }));

        for tri in indices {
            if tri.max_index() as usize >= vertices.len() {
                continue;
            }
            self.indices
                .extend(tri.as_array().iter().map(|&i| base + i));
        }
    }

    fn add_line_string(&mut self, points: &[Vec2], closed: bool, thickness: f64, color: &ColorF) {
        self.draw_calls += 1;
        let points: Vec<Float2> = points.iter().map(|p| p.as_vec2()).collect();
        let (outline, triangles) = stroke_triangulation(&points, thickness as f32, closed);
        if triangles.is_empty() {
            return;
        }

        let color = color.to_float4();
        let base = self.base_index();

        self.vertices
            .extend(outline.into_iter().map(|pos| Vertex2D { pos, color }));
        for tri in &triangles {
            self.indices
                .extend(tri.as_array().iter().map(|&i| base + i));
        }
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        debug!(
            "Flushing batch: {} draw calls, {} vertices, {} triangles",
            self.draw_calls,
            self.vertices.len(),
            self.num_triangles()
        );

        self.vertices.clear();
        self.indices.clear();
        self.draw_calls = 0;
        Ok(())
    }
}
