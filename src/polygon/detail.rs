//! Owned geometry buffers behind [`Polygon`](super::Polygon)

use log::warn;

use super::triangulation::{Triangulation, flatten_vertices, triangulate};
use super::validation::{PolygonFailureType, validate};
use crate::error::PolygonError;
use crate::geometry::{
    Float2, RectF, TriangleIndex, Vec2, ring_centroid_terms, ring_perimeter, signed_ring_area,
};

/// Outer rings shorter than this enclose nothing and collapse to the empty
/// polygon, validated or not
const MIN_RING_POINTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PolygonDetail {
    pub(crate) outer: Vec<Vec2>,
    pub(crate) holes: Vec<Vec<Vec2>>,
    pub(crate) vertices: Vec<Float2>,
    pub(crate) indices: Vec<TriangleIndex>,
    pub(crate) bounding_rect: RectF,
}

impl PolygonDetail {
    /// Validate (unless skipped) and triangulate rings
    pub(crate) fn build(
        outer: Vec<Vec2>,
        holes: Vec<Vec<Vec2>>,
        skip_validation: bool,
    ) -> Result<Self, PolygonError> {
        if !skip_validation {
            check(&outer, &holes)?;
        }
        if outer.len() < MIN_RING_POINTS {
            return Ok(Self::default());
        }

        let Triangulation { vertices, indices } =
            triangulate(&outer, &holes).map_err(PolygonError::Triangulation)?;
        let bounding_rect = bounding_rect_of(&outer, &holes);

        Ok(Self {
            outer,
            holes,
            vertices,
            indices,
            bounding_rect,
        })
    }

    /// Like [`build`](Self::build) but keeps the rings when only earcut fails
    pub(crate) fn build_lenient(
        outer: Vec<Vec2>,
        holes: Vec<Vec<Vec2>>,
        skip_validation: bool,
    ) -> Result<Self, PolygonError> {
        if !skip_validation {
            check(&outer, &holes)?;
        }
        if outer.len() < MIN_RING_POINTS {
            return Ok(Self::default());
        }

        let (vertices, indices) = match triangulate(&outer, &holes) {
            Ok(t) => (t.vertices, t.indices),
            Err(e) => {
                warn!("Polygon triangulation failed ({e}), keeping boundary without triangles");
                (flatten_vertices(&outer, &holes), Vec::new())
            }
        };
        let bounding_rect = bounding_rect_of(&outer, &holes);

        Ok(Self {
            outer,
            holes,
            vertices,
            indices,
            bounding_rect,
        })
    }

    /// Adopt a precomputed triangulation
    pub(crate) fn from_cache(
        outer: Vec<Vec2>,
        holes: Vec<Vec<Vec2>>,
        vertices: Vec<Float2>,
        indices: Vec<TriangleIndex>,
        bounding_rect: RectF,
        skip_validation: bool,
    ) -> Result<Self, PolygonError> {
        if !skip_validation {
            check(&outer, &holes)?;
            if let Some(t) = indices
                .iter()
                .find(|t| t.max_index() as usize >= vertices.len())
            {
                return Err(PolygonError::IndexOutOfRange {
                    index: t.max_index(),
                    len: vertices.len(),
                });
            }
        }
        if outer.len() < MIN_RING_POINTS {
            return Ok(Self::default());
        }

        Ok(Self {
            outer,
            holes,
            vertices,
            indices,
            bounding_rect,
        })
    }

    pub(crate) fn add_holes(
        &mut self,
        new_holes: Vec<Vec<Vec2>>,
        skip_validation: bool,
    ) -> Result<(), PolygonError> {
        if new_holes.is_empty() {
            return Ok(());
        }

        let mut holes = self.holes.clone();
        holes.extend(new_holes);

        *self = Self::build(self.outer.clone(), holes, skip_validation)?;
        Ok(())
    }

    pub(crate) fn move_by(&mut self, v: Vec2) {
        for p in self.outer.iter_mut().chain(self.holes.iter_mut().flatten()) {
            *p += v;
        }

        let offset = v.as_vec2();
        for p in &mut self.vertices {
            *p += offset;
        }

        self.bounding_rect = self.bounding_rect.moved_by(v);
    }

    pub(crate) fn area(&self) -> f64 {
        let outer = signed_ring_area(&self.outer);
        let holes: f64 = self.holes.iter().map(|h| signed_ring_area(h).abs()).sum();
        outer - outer.signum() * holes
    }

    pub(crate) fn perimeter(&self) -> f64 {
        ring_perimeter(&self.outer) + self.holes.iter().map(|h| ring_perimeter(h)).sum::<f64>()
    }

    pub(crate) fn centroid(&self) -> Vec2 {
        if self.outer.is_empty() {
            return Vec2::ZERO;
        }

        // Outer counts positive and holes negative whatever their winding
        let (oa, ox, oy) = ring_centroid_terms(&self.outer);
        let sign = if oa < 0.0 { -1.0 } else { 1.0 };
        let (mut a2, mut cx, mut cy) = (oa * sign, ox * sign, oy * sign);

        for hole in &self.holes {
            let (ha, hx, hy) = ring_centroid_terms(hole);
            let hole_sign = if ha < 0.0 { 1.0 } else { -1.0 };
            a2 += ha * hole_sign;
            cx += hx * hole_sign;
            cy += hy * hole_sign;
        }

        if a2.abs() < f64::EPSILON {
            let sum = self.outer.iter().copied().sum::<Vec2>();
            return sum / self.outer.len() as f64;
        }

        Vec2::new(cx / (3.0 * a2), cy / (3.0 * a2))
    }
}

fn check(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Result<(), PolygonError> {
    match validate(outer, holes) {
        PolygonFailureType::Ok => Ok(()),
        kind => Err(PolygonError::Invalid(kind)),
    }
}

pub(crate) fn bounding_rect_of(outer: &[Vec2], holes: &[Vec<Vec2>]) -> RectF {
    RectF::from_points(outer.iter().chain(holes.iter().flatten())).unwrap_or_default()
}
