use super::Vec2;

/// Three offsets into a vertex buffer forming one triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TriangleIndex {
    pub i0: u32,
    pub i1: u32,
    pub i2: u32,
}

impl TriangleIndex {
    pub const fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self { i0, i1, i2 }
    }

    pub fn as_array(&self) -> [u32; 3] {
        [self.i0, self.i1, self.i2]
    }

    /// Largest offset referenced by this triangle
    pub fn max_index(&self) -> u32 {
        self.i0.max(self.i1).max(self.i2)
    }

    /// Group a flat earcut-style index list into triangles
    ///
    /// A trailing partial triple is dropped.
    pub fn from_flat(indices: &[usize]) -> Vec<Self> {
        indices
            .chunks_exact(3)
            .map(|t| Self::new(t[0] as u32, t[1] as u32, t[2] as u32))
            .collect()
    }
}

/// A 2D triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Triangle {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Positive when the points wind counter-clockwise (y up)
    pub fn signed_area(&self) -> f64 {
        0.5 * (self.p1 - self.p0).perp_dot(self.p2 - self.p0)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn perimeter(&self) -> f64 {
        self.p0.distance(self.p1) + self.p1.distance(self.p2) + self.p2.distance(self.p0)
    }

    pub fn points(&self) -> [Vec2; 3] {
        [self.p0, self.p1, self.p2]
    }
}
