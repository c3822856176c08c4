use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::color::ColorF;
use crate::polygon::{DEFAULT_MITER_LIMIT, DEFAULT_ROUND_SEGMENTS, DEFAULT_SIMPLIFY_DISTANCE};
use crate::render::RendererBackend;

/// Heights for the STL backend, in mm.
///
/// The first draw is extruded from z=0 up to the base height; every later
/// draw rises one more layer so it sits on top of what came before.
pub mod heights {
    pub const BASE_HEIGHT: f32 = 2.0;
    pub const LAYER_HEIGHT: f32 = 0.6;
}

fn default_verbose() -> bool {
    false
}
fn default_simplify_max_distance() -> f64 {
    DEFAULT_SIMPLIFY_DISTANCE
}
fn default_miter_limit() -> f64 {
    DEFAULT_MITER_LIMIT
}
fn default_round_segments() -> u32 {
    DEFAULT_ROUND_SEGMENTS
}
fn default_output() -> PathBuf {
    PathBuf::from("polygon.stl")
}
fn default_base_height() -> f32 {
    heights::BASE_HEIGHT
}
fn default_layer_height() -> f32 {
    heights::LAYER_HEIGHT
}
fn default_frame_color() -> ColorF {
    ColorF::BLACK
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_simplify_max_distance")]
    pub simplify_max_distance: f64,
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BufferConfig {
    #[serde(default = "default_miter_limit")]
    pub miter_limit: f64,
    #[serde(default = "default_round_segments")]
    pub round_segments: u32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            miter_limit: default_miter_limit(),
            round_segments: default_round_segments(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    #[serde(default)]
    pub backend: RendererBackend,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_base_height")]
    pub base_height: f32,
    #[serde(default = "default_layer_height")]
    pub layer_height: f32,
    #[serde(default)]
    pub fill_color: ColorF,
    #[serde(default = "default_frame_color")]
    pub frame_color: ColorF,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: RendererBackend::default(),
            output: default_output(),
            base_height: default_base_height(),
            layer_height: default_layer_height(),
            fill_color: ColorF::default(),
            frame_color: default_frame_color(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            simplify_max_distance: default_simplify_max_distance(),
            buffer: BufferConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations and load the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::{Context, bail};

        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polyforge.toml"));
    paths.push(PathBuf::from(".polyforge.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polyforge").join("config.toml"));
        paths.push(config_dir.join("polyforge.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polyforge.toml"));
        paths.push(home.join(".config").join("polyforge").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(!config.verbose);
        assert!((config.simplify_max_distance - 2.0).abs() < 1e-12);
        assert_eq!(config.buffer, BufferConfig::default());
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.render.backend, RendererBackend::Batch);
        assert_eq!(config.render.frame_color, ColorF::BLACK);
    }

    #[test]
    fn test_partial_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            verbose = true

            [buffer]
            miter_limit = 2.5

            [render]
            backend = "stl"
            output = "out.stl"
            fill_color = { r = 1.0, g = 0.0, b = 0.0 }
            "#,
        )
        .unwrap();

        assert!(config.verbose);
        assert!((config.buffer.miter_limit - 2.5).abs() < 1e-12);
        assert_eq!(config.buffer.round_segments, 32);
        assert_eq!(config.render.backend, RendererBackend::Stl);
        assert_eq!(config.render.output, PathBuf::from("out.stl"));
        assert!((config.render.layer_height - 0.6).abs() < 1e-6);
        assert_eq!(config.render.fill_color, ColorF::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyforge.toml");
        fs::write(&path, "simplify_max_distance = 0.5\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert!((config.simplify_max_distance - 0.5).abs() < 1e-12);

        assert!(FileConfig::from_path(&dir.path().join("missing.toml")).is_err());

        fs::write(&path, "verbose = \"maybe\"\n").unwrap();
        assert!(FileConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("polyforge.toml"));
    }
}
