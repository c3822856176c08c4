pub mod convert;
pub mod rect;
pub mod ring;
pub mod simplify;
pub mod stroke;
pub mod triangle;

pub use rect::RectF;
pub use ring::{ring_centroid_terms, ring_perimeter, signed_ring_area};
pub use simplify::simplify_ring;
pub use stroke::{stroke_edges, stroke_triangulation};
pub use triangle::{Triangle, TriangleIndex};

/// Double-precision 2D point used for boundaries and queries
pub type Vec2 = glam::DVec2;

/// Reduced-precision 2D point used for triangulation vertex buffers
pub type Float2 = glam::Vec2;
