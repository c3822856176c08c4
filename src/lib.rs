//! polyforge - 2D polygons with holes: validation, triangulation, derived shapes
//! and pluggable rendering

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod polygon;
pub mod render;
pub mod shape;

pub use color::ColorF;
pub use error::PolygonError;
pub use geometry::{Float2, RectF, Triangle, TriangleIndex, Vec2};
pub use polygon::{BufferStyle, LineJoin, Polygon, PolygonFailureType, SkipValidation};
pub use render::{Renderer2D, RendererBackend, create_renderer};
pub use shape::Shape2D;
