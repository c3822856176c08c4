use serde::Deserialize;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorF {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl ColorF {
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: ColorF = ColorF::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Reduced-precision components for vertex buffers
    pub fn to_float4(&self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, self.a as f32]
    }
}

impl Default for ColorF {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_white() {
        assert_eq!(ColorF::default(), ColorF::WHITE);
        assert_eq!(ColorF::WHITE.to_float4(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_deserialize_without_alpha() {
        let color: ColorF = toml::from_str("r = 0.5\ng = 0.25\nb = 0.0").unwrap();
        assert_eq!(color, ColorF::rgb(0.5, 0.25, 0.0));
    }
}
