use super::{Renderer2D, RendererBackend};
use crate::color::ColorF;
use crate::geometry::{Float2, TriangleIndex, Vec2};

/// Renderer that drops all geometry, keeping only submission counts
#[derive(Debug, Default)]
pub struct NullRenderer {
    polygons: usize,
    line_strings: usize,
    flushes: usize,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> usize {
        self.polygons
    }

    pub fn line_strings(&self) -> usize {
        self.line_strings
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Renderer2D for NullRenderer {
    fn backend(&self) -> RendererBackend {
        RendererBackend::Null
    }

    fn add_polygon(&mut self, _vertices: &[Float2], _indices: &[TriangleIndex], _color: &ColorF) {
        self.polygons += 1;
    }

    fn add_line_string(
        &mut self,
        _points: &[Vec2],
        _closed: bool,
        _thickness: f64,
        _color: &ColorF,
    ) {
        self.line_strings += 1;
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
