//! Configuration for the constellation composer
//!
//! Loaded from `.constellation_config.json` in the working directory, or from
//! `<config dir>/constellation-composer/config.json`. Every field has a default,
//! so a missing file or an empty object yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ComposerError, Result, ResultExt};
use crate::core::models::CanvasSize;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".constellation_config.json";

/// Default source of constellation line geometry (GeoJSON)
pub const DEFAULT_GEOMETRY_URL: &str =
    "https://cdn.jsdelivr.net/gh/dieghernan/celestial_data@main/data/constellations.lines.min.geojson";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasBounds,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Accepted canvas dimensions, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasBounds {
    #[serde(default = "default_min_dimension")]
    pub min_dimension: u32,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_dimension")]
    pub default_width: u32,
    #[serde(default = "default_dimension")]
    pub default_height: u32,
}

fn default_min_dimension() -> u32 {
    512
}

fn default_max_dimension() -> u32 {
    4096
}

fn default_dimension() -> u32 {
    1024
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            min_dimension: default_min_dimension(),
            max_dimension: default_max_dimension(),
            default_width: default_dimension(),
            default_height: default_dimension(),
        }
    }
}

impl CanvasBounds {
    /// Canvas used when the caller gives no dimensions
    pub fn default_canvas(&self) -> CanvasSize {
        CanvasSize::new(self.default_width, self.default_height)
    }

    /// Check a single dimension against the bounds
    pub fn check_dimension(&self, field: &str, value: u32) -> Result<()> {
        if value < self.min_dimension || value > self.max_dimension {
            return Err(ComposerError::invalid_input(
                field,
                format!(
                    "must be between {} and {} pixels, got {}",
                    self.min_dimension, self.max_dimension, value
                ),
            ));
        }
        Ok(())
    }

    /// Check both canvas dimensions
    pub fn check(&self, canvas: CanvasSize) -> Result<()> {
        self.check_dimension("canvas_width", canvas.width)?;
        self.check_dimension("canvas_height", canvas.height)
    }
}

/// Settings for the optional geometry fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Off by default: output never depends on it
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_geometry_url")]
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_geometry_url() -> String {
    DEFAULT_GEOMETRY_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_geometry_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    /// Parse and validate a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| ComposerError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading {}", path.display()))
    }

    /// Load from the first candidate location that exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ComposerError::invalid_config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        match Self::search_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Candidate config locations, highest priority first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("constellation-composer/config.json"));
        }

        paths
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        let bounds = &self.canvas;
        if bounds.min_dimension == 0 {
            return Err(ComposerError::invalid_config("canvas.min_dimension must be positive"));
        }
        if bounds.min_dimension > bounds.max_dimension {
            return Err(ComposerError::invalid_config(format!(
                "canvas.min_dimension ({}) exceeds canvas.max_dimension ({})",
                bounds.min_dimension, bounds.max_dimension
            )));
        }
        bounds
            .check(bounds.default_canvas())
            .map_err(|e| ComposerError::invalid_config(format!("default canvas out of bounds: {}", e)))?;
        if self.enrichment.timeout_ms == 0 {
            return Err(ComposerError::invalid_config("enrichment.timeout_ms must be positive"));
        }
        Ok(())
    }
}
