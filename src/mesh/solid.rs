use glam::Vec3;

/// Facets with less area than this (mm^2) carry no printable surface
const MIN_FACET_AREA: f32 = 1e-10;

/// One triangle of a solid's surface, wound counter-clockwise seen from outside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
}

impl Facet {
    /// Facet with its normal taken from the winding; `None` when degenerate
    /// or not finite
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if !cross.is_finite() || cross.length() * 0.5 < MIN_FACET_AREA {
            return None;
        }

        Some(Self {
            normal: cross.normalize(),
            vertices: [a, b, c],
        })
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).length() * 0.5
    }

    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}

/// Growing surface of a printable solid
///
/// Degenerate and non-finite triangles are rejected on the way in, so
/// everything held here can be written out as is.
#[derive(Debug, Default)]
pub struct Solid {
    facets: Vec<Facet>,
    rejected: usize,
}

impl Solid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        match Facet::new(a, b, c) {
            Some(facet) => self.facets.push(facet),
            None => self.rejected += 1,
        }
    }

    /// Quad `a b c d`, counter-clockwise seen from outside
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    pub fn append(&mut self, other: Solid) {
        self.facets.extend(other.facets);
        self.rejected += other.rejected;
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Triangles dropped as degenerate or non-finite
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn clear(&mut self) {
        self.facets.clear();
        self.rejected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_normal_follows_winding() {
        let facet = Facet::new(Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        assert!((facet.normal - Vec3::Z).length() < 1e-6);
        assert!((facet.area() - 0.5).abs() < 1e-6);

        let flipped = Facet::new(Vec3::ZERO, Vec3::Y, Vec3::X).unwrap();
        assert!((flipped.normal + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_facets_are_rejected() {
        assert!(Facet::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0).is_none());
        assert!(Facet::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_none());
        assert!(Facet::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X, Vec3::Y).is_none());
        assert!(Facet::new(Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_solid_counts_rejections() {
        let mut solid = Solid::new();
        solid.push_quad(Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y);
        solid.push_triangle(Vec3::ZERO, Vec3::X, Vec3::X * 3.0);

        assert_eq!(solid.len(), 2);
        assert_eq!(solid.rejected(), 1);

        let mut other = Solid::new();
        other.append(solid);
        assert_eq!(other.len(), 2);
        assert_eq!(other.rejected(), 1);

        other.clear();
        assert!(other.is_empty());
        assert_eq!(other.rejected(), 0);
    }
}
