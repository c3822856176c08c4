//! 2D polygon with holes and a cached triangulation

pub mod buffer;
mod detail;
pub mod triangulation;
pub mod validation;

use geo::{ConvexHull, MultiPoint, Point};
use log::{debug, warn};

pub use buffer::{BufferStyle, DEFAULT_MITER_LIMIT, DEFAULT_ROUND_SEGMENTS, LineJoin};
pub use validation::PolygonFailureType;

use crate::color::ColorF;
use crate::error::PolygonError;
use crate::geometry::convert::{from_geo_polygon, to_coord};
use crate::geometry::{
    Float2, RectF, Triangle, TriangleIndex, Vec2, signed_ring_area, simplify_ring,
};
use crate::render::Renderer2D;
use crate::shape::Shape2D;
use detail::{PolygonDetail, bounding_rect_of};

/// Default line thickness for frames and wireframes
pub const DEFAULT_THICKNESS: f64 = 1.0;

/// Default tolerance for [`Polygon::simplified`]
pub const DEFAULT_SIMPLIFY_DISTANCE: f64 = 2.0;

/// Whether constructors check their input before trusting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipValidation {
    #[default]
    No,
    Yes,
}

impl From<bool> for SkipValidation {
    fn from(skip: bool) -> Self {
        if skip {
            SkipValidation::Yes
        } else {
            SkipValidation::No
        }
    }
}

impl SkipValidation {
    fn skips(self) -> bool {
        self == SkipValidation::Yes
    }
}

/// A polygon with an outer boundary, optional holes and a cached triangulation
///
/// The outer boundary winds counter-clockwise (y up) and holes clockwise.
/// The triangulation and bounding rectangle are computed on construction and
/// kept in sync by every mutating method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    detail: PolygonDetail,
}

impl Polygon {
    /// Build a polygon from rings, triangulating it
    ///
    /// Unless validation is skipped, invalid input is logged and yields the
    /// empty polygon. Use [`Polygon::try_new`] to get the reason instead.
    pub fn new(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>, skip_validation: SkipValidation) -> Self {
        match PolygonDetail::build_lenient(outer, holes, skip_validation.skips()) {
            Ok(detail) => Self { detail },
            Err(e) => {
                warn!("Polygon rejected: {e}");
                Self::default()
            }
        }
    }

    /// Build a validated polygon, reporting why the input was rejected
    pub fn try_new(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> Result<Self, PolygonError> {
        PolygonDetail::build(outer, holes, false).map(|detail| Self { detail })
    }

    /// Build a hole-free polygon from an outer ring and a precomputed
    /// triangulation over its points
    pub fn from_triangulation(
        outer: Vec<Vec2>,
        indices: Vec<TriangleIndex>,
        bounding_rect: RectF,
        skip_validation: SkipValidation,
    ) -> Self {
        let vertices = outer.iter().map(|p| p.as_vec2()).collect();
        Self::from_parts(
            outer,
            Vec::new(),
            vertices,
            indices,
            bounding_rect,
            skip_validation,
        )
    }

    /// Build a polygon from rings plus a complete precomputed cache
    pub fn from_parts(
        outer: Vec<Vec2>,
        holes: Vec<Vec<Vec2>>,
        vertices: Vec<Float2>,
        indices: Vec<TriangleIndex>,
        bounding_rect: RectF,
        skip_validation: SkipValidation,
    ) -> Self {
        match PolygonDetail::from_cache(
            outer,
            holes,
            vertices,
            indices,
            bounding_rect,
            skip_validation.skips(),
        ) {
            Ok(detail) => Self { detail },
            Err(e) => {
                warn!("Polygon rejected: {e}");
                Self::default()
            }
        }
    }

    /// Classify raw rings without building a polygon
    pub fn validate(outer: &[Vec2], holes: &[Vec<Vec2>]) -> PolygonFailureType {
        validation::validate(outer, holes)
    }

    pub fn is_empty(&self) -> bool {
        self.detail.outer.is_empty()
    }

    pub fn has_holes(&self) -> bool {
        !self.detail.holes.is_empty()
    }

    pub fn num_holes(&self) -> usize {
        self.detail.holes.len()
    }

    pub fn outer(&self) -> &[Vec2] {
        &self.detail.outer
    }

    pub fn inners(&self) -> &[Vec<Vec2>] {
        &self.detail.holes
    }

    /// Triangulation vertex buffer: outer points followed by every hole
    pub fn vertices(&self) -> &[Float2] {
        &self.detail.vertices
    }

    pub fn indices(&self) -> &[TriangleIndex] {
        &self.detail.indices
    }

    pub fn bounding_rect(&self) -> RectF {
        self.detail.bounding_rect
    }

    pub fn num_triangles(&self) -> usize {
        self.detail.indices.len()
    }

    /// Triangle `index` of the triangulation
    ///
    /// # Panics
    /// If `index >= self.num_triangles()`.
    pub fn triangle(&self, index: usize) -> Triangle {
        match self.get_triangle(index) {
            Some(triangle) => triangle,
            None => panic!(
                "triangle index {index} out of range ({} triangles)",
                self.num_triangles()
            ),
        }
    }

    pub fn get_triangle(&self, index: usize) -> Option<Triangle> {
        let t = self.detail.indices.get(index)?;
        let vertex = |i: u32| self.detail.vertices[i as usize].as_dvec2();
        Some(Triangle::new(vertex(t.i0), vertex(t.i1), vertex(t.i2)))
    }

    pub fn add_hole(
        &mut self,
        hole: Vec<Vec2>,
        skip_validation: SkipValidation,
    ) -> Result<&mut Self, PolygonError> {
        self.add_holes(vec![hole], skip_validation)
    }

    /// Append holes and re-triangulate
    ///
    /// On failure the polygon is left unchanged.
    pub fn add_holes(
        &mut self,
        holes: Vec<Vec<Vec2>>,
        skip_validation: SkipValidation,
    ) -> Result<&mut Self, PolygonError> {
        self.detail.add_holes(holes, skip_validation.skips())?;
        Ok(self)
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        let mut moved = self.clone();
        moved.move_by(v);
        moved
    }

    /// Translate every point; the triangle list is unaffected
    pub fn move_by(&mut self, v: Vec2) -> &mut Self {
        self.detail.move_by(v);
        self
    }

    /// Signed area: positive for a counter-clockwise outer boundary, holes
    /// subtracted
    pub fn area(&self) -> f64 {
        self.detail.area()
    }

    pub fn perimeter(&self) -> f64 {
        self.detail.perimeter()
    }

    pub fn centroid(&self) -> Vec2 {
        self.detail.centroid()
    }

    pub fn calculate_convex_hull(&self) -> Polygon {
        if self.outer().len() < 3 {
            return Polygon::default();
        }

        let points: MultiPoint<f64> = self
            .outer()
            .iter()
            .map(|&p| Point::from(to_coord(p)))
            .collect();
        let (outer, _) = from_geo_polygon(&points.convex_hull());

        if outer.len() < 3 || signed_ring_area(&outer) <= 0.0 {
            debug!("Convex hull is degenerate");
            return Polygon::default();
        }

        Polygon::new(outer, Vec::new(), SkipValidation::Yes)
    }

    /// Offset the boundary with mitered corners
    pub fn calculate_buffer(&self, distance: f64) -> Polygon {
        self.calculate_buffer_with(&BufferStyle::mitered(distance))
    }

    /// Offset the boundary with rounded corners
    pub fn calculate_round_buffer(&self, distance: f64) -> Polygon {
        self.calculate_buffer_with(&BufferStyle::round(distance))
    }

    /// Offset the boundary, keeping the largest piece if it splits
    pub fn calculate_buffer_with(&self, style: &BufferStyle) -> Polygon {
        if self.is_empty() {
            return Polygon::default();
        }
        if style.distance == 0.0 {
            return self.clone();
        }

        match buffer::buffer_rings(self.outer(), self.inners(), style) {
            // Boolean-op output is well formed; validation would only reject
            // harmless collinear points
            Some((outer, holes)) => Polygon::new(outer, holes, SkipValidation::Yes),
            None => {
                debug!("Buffer of {} removed the whole polygon", style.distance);
                Polygon::default()
            }
        }
    }

    /// Douglas-Peucker simplification of every ring
    ///
    /// Collapsed holes are dropped. Returns an unchanged copy when the outer
    /// ring collapses or the simplified rings are no longer valid.
    pub fn simplified(&self, max_distance: f64) -> Polygon {
        if self.is_empty() {
            return Polygon::default();
        }

        let Some(outer) = simplify_ring(self.outer(), max_distance) else {
            debug!("Simplification collapsed the outer boundary, keeping original");
            return self.clone();
        };

        let holes = self
            .inners()
            .iter()
            .filter_map(|h| simplify_ring(h, max_distance))
            .collect();

        match Polygon::try_new(outer, holes) {
            Ok(polygon) => polygon,
            Err(e) => {
                debug!("Simplified polygon is invalid ({e}), keeping original");
                self.clone()
            }
        }
    }

    /// Submit the filled triangulation
    pub fn draw(&self, renderer: &mut dyn Renderer2D, color: &ColorF) -> &Self {
        renderer.add_polygon(self.vertices(), self.indices(), color);
        self
    }

    /// Submit the outer boundary and every hole as closed lines
    pub fn draw_frame(
        &self,
        renderer: &mut dyn Renderer2D,
        thickness: f64,
        color: &ColorF,
    ) -> &Self {
        renderer.add_line_string(self.outer(), true, thickness, color);
        for hole in self.inners() {
            renderer.add_line_string(hole, true, thickness, color);
        }
        self
    }

    /// Submit the edges of every triangle
    pub fn draw_wireframe(
        &self,
        renderer: &mut dyn Renderer2D,
        thickness: f64,
        color: &ColorF,
    ) -> &Self {
        for i in 0..self.num_triangles() {
            renderer.add_line_string(&self.triangle(i).points(), true, thickness, color);
        }
        self
    }
}

impl From<&Shape2D> for Polygon {
    fn from(shape: &Shape2D) -> Self {
        let outer: Vec<Vec2> = shape.vertices().iter().map(|p| p.as_dvec2()).collect();
        let bounding_rect = bounding_rect_of(&outer, &[]);
        Self::from_parts(
            outer,
            Vec::new(),
            shape.vertices().to_vec(),
            shape.indices().to_vec(),
            bounding_rect,
            SkipValidation::Yes,
        )
    }
}
