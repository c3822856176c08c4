//! Reading and writing polygons as JSON or TOML documents

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::Vec2;
use crate::polygon::{Polygon, SkipValidation};

/// On-disk form of a polygon: plain coordinate pairs, rings left open
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonFile {
    pub outer: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_validation: bool,
}

impl PolygonFile {
    pub fn from_polygon(polygon: &Polygon) -> Self {
        Self {
            outer: polygon.outer().iter().map(|p| p.to_array()).collect(),
            holes: polygon
                .inners()
                .iter()
                .map(|hole| hole.iter().map(|p| p.to_array()).collect())
                .collect(),
            skip_validation: false,
        }
    }

    /// The rings as points
    pub fn rings(&self) -> (Vec<Vec2>, Vec<Vec<Vec2>>) {
        let outer = self.outer.iter().map(|&p| Vec2::from_array(p)).collect();
        let holes = self
            .holes
            .iter()
            .map(|hole| hole.iter().map(|&p| Vec2::from_array(p)).collect())
            .collect();
        (outer, holes)
    }

    /// Build the polygon, validating unless the file opts out
    pub fn into_polygon(self) -> Result<Polygon> {
        let (outer, holes) = self.rings();
        if self.skip_validation {
            return Ok(Polygon::new(outer, holes, SkipValidation::Yes));
        }
        Ok(Polygon::try_new(outer, holes)?)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        match extension(path).as_deref() {
            Some("json") => serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON polygon: {}", path.display())),
            Some("toml") => toml::from_str(contents)
                .with_context(|| format!("Failed to parse TOML polygon: {}", path.display())),
            _ => bail!(
                "Unsupported polygon file extension (expected .json or .toml): {}",
                path.display()
            ),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Read a polygon document without building the polygon
pub fn read_polygon_file(path: &Path) -> Result<PolygonFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read polygon file: {}", path.display()))?;
    PolygonFile::parse(&contents, path)
}

/// Load and build a polygon from a `.json` or `.toml` file
pub fn load_polygon(path: &Path) -> Result<Polygon> {
    read_polygon_file(path)?
        .into_polygon()
        .with_context(|| format!("Invalid polygon in {}", path.display()))
}

pub fn to_json_string(polygon: &Polygon) -> Result<String> {
    serde_json::to_string_pretty(&PolygonFile::from_polygon(polygon))
        .context("Failed to serialize polygon")
}

/// Write a polygon as JSON
pub fn save_polygon(path: &Path, polygon: &Polygon) -> Result<()> {
    let json = to_json_string(polygon)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write polygon file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::PolygonFailureType;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE_JSON: &str = r#"{
        "outer": [[0, 0], [10, 0], [10, 10], [0, 10]],
        "holes": [[[3, 3], [3, 7], [7, 7], [7, 3]]]
    }"#;

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("square.json");
        fs::write(&path, SQUARE_JSON).unwrap();

        let polygon = load_polygon(&path).unwrap();
        assert_eq!(polygon.num_holes(), 1);
        assert!((polygon.area() - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.TOML");
        fs::write(&path, "outer = [[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]]\n").unwrap();

        let polygon = load_polygon(&path).unwrap();
        assert!((polygon.area() - 6.0).abs() < 1e-9);
        assert_eq!(polygon.num_triangles(), 1);
    }

    #[test]
    fn test_invalid_polygon_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cw.json");
        fs::write(&path, r#"{"outer": [[0, 0], [0, 10], [10, 10], [10, 0]]}"#).unwrap();

        let err = load_polygon(&path).unwrap_err();
        let cause = err.downcast_ref::<crate::error::PolygonError>().unwrap();
        assert_eq!(cause.failure_type(), Some(PolygonFailureType::WrongOrientation));
    }

    #[test]
    fn test_skip_validation_is_honoured() {
        let file = PolygonFile {
            outer: vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]],
            holes: Vec::new(),
            skip_validation: true,
        };

        let polygon = file.into_polygon().unwrap();
        assert!(!polygon.is_empty());
        assert!((polygon.area() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("square.yaml");
        fs::write(&path, SQUARE_JSON).unwrap();
        assert!(load_polygon(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.json");
        let target = dir.path().join("out.json");
        fs::write(&source, SQUARE_JSON).unwrap();

        let polygon = load_polygon(&source).unwrap();
        save_polygon(&target, &polygon).unwrap();

        assert_eq!(load_polygon(&target).unwrap().outer(), polygon.outer());
    }

    #[test]
    fn test_json_omits_defaults() {
        let polygon = Polygon::try_new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            Vec::new(),
        )
        .unwrap();

        let json = to_json_string(&polygon).unwrap();
        assert!(json.contains("outer"));
        assert!(!json.contains("holes"));
        assert!(!json.contains("skip_validation"));
    }
}
