//! Renderer backends that polygons submit their geometry to
//!
//! A backend is picked once from configuration with [`create_renderer`];
//! callers only see the [`Renderer2D`] trait afterwards.

pub mod batch;
pub mod null;
pub mod stl;

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;

pub use batch::{BatchRenderer, Vertex2D};
pub use null::NullRenderer;
pub use stl::StlRenderer;

use crate::color::ColorF;
use crate::config::RenderConfig;
use crate::geometry::{Float2, TriangleIndex, Vec2};

/// Available renderer backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererBackend {
    /// Discard everything
    Null,
    /// Build an in-memory vertex/index batch
    #[default]
    Batch,
    /// Extrude into a 3D-printable STL file
    Stl,
}

/// Sink for 2D draw submissions
pub trait Renderer2D {
    fn backend(&self) -> RendererBackend;

    /// Submit a filled triangle list
    fn add_polygon(&mut self, vertices: &[Float2], indices: &[TriangleIndex], color: &ColorF);

    /// Submit a polyline of the given thickness, closed back to its first
    /// point when `closed` is set
    fn add_line_string(&mut self, points: &[Vec2], closed: bool, thickness: f64, color: &ColorF);

    /// Finish everything submitted so far
    fn flush(&mut self) -> anyhow::Result<()>;
}

/// Create the renderer selected by `config`
pub fn create_renderer(config: &RenderConfig) -> Box<dyn Renderer2D> {
    debug!("Using {:?} renderer backend", config.backend);

    match config.backend {
        RendererBackend::Null => Box::new(NullRenderer::new()),
        RendererBackend::Batch => Box::new(BatchRenderer::new()),
        RendererBackend::Stl => Box::new(StlRenderer::new(
            config.output.clone(),
            config.base_height,
            config.layer_height,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_renderer_per_backend() {
        for backend in [
            RendererBackend::Null,
            RendererBackend::Batch,
            RendererBackend::Stl,
        ] {
            let config = RenderConfig {
                backend,
                ..RenderConfig::default()
            };
            assert_eq!(create_renderer(&config).backend(), backend);
        }
    }

    #[test]
    fn test_backend_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: RendererBackend,
        }

        let w: Wrapper = toml::from_str(r#"backend = "stl""#).unwrap();
        assert_eq!(w.backend, RendererBackend::Stl);
    }
}
