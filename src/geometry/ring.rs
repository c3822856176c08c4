//! Shoelace-style measurements over open rings (the closing edge is implied)

use super::Vec2;

/// Signed area of a ring, positive for counter-clockwise winding (y up)
pub fn signed_ring_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        sum += p.perp_dot(q);
    }

    sum * 0.5
}

/// Length of the closed boundary through every point of the ring
pub fn ring_perimeter(ring: &[Vec2]) -> f64 {
    if ring.len() < 2 {
        return 0.0;
    }

    ring.iter()
        .enumerate()
        .map(|(i, p)| p.distance(ring[(i + 1) % ring.len()]))
        .sum()
}

/// First moments of a ring: `(2 * signed_area, 6 * Mx, 6 * My)`
///
/// Dividing the summed moments of several rings by `3 * sum(2 * area)`
/// yields their combined area-weighted centroid.
pub fn ring_centroid_terms(ring: &[Vec2]) -> (f64, f64, f64) {
    if ring.len() < 3 {
        return (0.0, 0.0, 0.0);
    }

    let mut a2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        let cross = p.perp_dot(q);
        a2 += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    (a2, cx, cy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_signed_area_flips_with_winding() {
        let mut square = unit_square();
        assert!((signed_ring_area(&square) - 1.0).abs() < 1e-12);

        square.reverse();
        assert!((signed_ring_area(&square) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_ring_has_no_area() {
        let line = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        assert_eq!(signed_ring_area(&line), 0.0);
    }

    #[test]
    fn test_ring_perimeter_is_closed() {
        assert!((ring_perimeter(&unit_square()) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_terms() {
        let (a2, cx, cy) = ring_centroid_terms(&unit_square());
        assert!((cx / (3.0 * a2) - 0.5).abs() < 1e-12);
        assert!((cy / (3.0 * a2) - 0.5).abs() < 1e-12);
    }
}
