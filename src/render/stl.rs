use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{Renderer2D, RendererBackend};
use crate::color::ColorF;
use crate::geometry::{Float2, TriangleIndex, Vec2};
use crate::mesh::stl::stl_size;
use crate::mesh::{Solid, extrude_stroke, extrude_triangulation, write_stl};

/// Renderer that extrudes every submission into a printable solid
///
/// Each draw becomes a column from z = 0 up to one layer above the previous
/// draw, so later submissions stand taller and stay visible in multi-color
/// prints. Colors are not representable in STL and are ignored.
///
/// Submissions are kept until a flush succeeds, so a failed write can be
/// retried.
#[derive(Debug)]
pub struct StlRenderer {
    output: PathBuf,
    base_height: f32,
    layer_height: f32,
    layers: u32,
    solid: Solid,
}

impl StlRenderer {
    pub fn new(output: PathBuf, base_height: f32, layer_height: f32) -> Self {
        Self {
            output,
            base_height,
            layer_height,
            layers: 0,
            solid: Solid::new(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Facets waiting for the next flush
    pub fn pending_facets(&self) -> usize {
        self.solid.len()
    }

    fn next_top(&mut self) -> f32 {
        let top = self.base_height + self.layer_height * self.layers as f32;
        self.layers += 1;
        top
    }
}

impl Renderer2D for StlRenderer {
    fn backend(&self) -> RendererBackend {
        RendererBackend::Stl
    }

    fn add_polygon(&mut self, vertices: &[Float2], indices: &[TriangleIndex], _color: &ColorF) {
        let z_top = self.next_top();
        self.solid
            .append(extrude_triangulation(vertices, indices, 0.0, z_top));
    }

    fn add_line_string(&mut self, points: &[Vec2], closed: bool, thickness: f64, _color: &ColorF) {
        let z_top = self.next_top();
        let points: Vec<Float2> = points.iter().map(|p| p.as_vec2()).collect();
        self.solid
            .append(extrude_stroke(&points, thickness as f32, 0.0, z_top, closed));
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        if self.solid.rejected() > 0 {
            warn!(
                "Dropped {} degenerate triangles while extruding",
                self.solid.rejected()
            );
        }

        write_stl(&self.output, self.solid.facets())?;

        info!(
            "Wrote {} facets ({:.1} KB) in {} layers to {}",
            self.solid.len(),
            stl_size(self.solid.len()) as f64 / 1024.0,
            self.layers,
            self.output.display()
        );

        self.solid.clear();
        self.layers = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn square() -> (Vec<Float2>, Vec<TriangleIndex>) {
        let vertices = vec![
            Float2::new(0.0, 0.0),
            Float2::new(10.0, 0.0),
            Float2::new(10.0, 10.0),
            Float2::new(0.0, 10.0),
        ];
        let indices = vec![TriangleIndex::new(0, 1, 2), TriangleIndex::new(0, 2, 3)];
        (vertices, indices)
    }

    fn max_z(renderer: &StlRenderer) -> f32 {
        renderer
            .solid
            .facets()
            .iter()
            .flat_map(|f| f.vertices.map(|v| v.z))
            .fold(f32::MIN, f32::max)
    }

    #[test]
    fn test_layers_stack_upwards() {
        let (vertices, indices) = square();
        let mut renderer = StlRenderer::new(PathBuf::from("unused.stl"), 2.0, 0.5);

        renderer.add_polygon(&vertices, &indices, &ColorF::WHITE);
        assert!((max_z(&renderer) - 2.0).abs() < 1e-6);

        renderer.add_polygon(&vertices, &indices, &ColorF::WHITE);
        assert!((max_z(&renderer) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_flush_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.stl");
        let (vertices, indices) = square();
        let mut renderer = StlRenderer::new(path.clone(), 2.0, 0.6);

        renderer.add_polygon(&vertices, &indices, &ColorF::WHITE);
        let ring: Vec<Vec2> = vertices.iter().map(|p| p.as_dvec2()).collect();
        renderer.add_line_string(&ring, true, 1.0, &ColorF::BLACK);
        let pending = renderer.pending_facets();
        // Square column plus a closed four-sided wall
        assert_eq!(pending, 12 + 32);

        renderer.flush().unwrap();

        assert_eq!(renderer.pending_facets(), 0);
        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), stl_size(pending) as u64);
    }

    #[test]
    fn test_failed_flush_keeps_submissions() {
        let dir = tempdir().unwrap();
        let target_dir = dir.path().join("no");
        let path = target_dir.join("out.stl");
        let (vertices, indices) = square();
        let mut renderer = StlRenderer::new(path.clone(), 2.0, 0.6);

        renderer.add_polygon(&vertices, &indices, &ColorF::WHITE);
        let pending = renderer.pending_facets();

        assert!(renderer.flush().is_err());
        assert_eq!(renderer.pending_facets(), pending);

        // Layering continues where it left off
        renderer.add_polygon(&vertices, &indices, &ColorF::WHITE);
        assert!((max_z(&renderer) - 2.6).abs() < 1e-6);

        // Retry succeeds once the directory exists
        fs::create_dir(&target_dir).unwrap();
        renderer.flush().unwrap();
        assert_eq!(renderer.pending_facets(), 0);
        assert_eq!(fs::metadata(&path).unwrap().len(), stl_size(2 * pending) as u64);
    }
}
