//! Core data models for the constellation composer
//!
//! Catalog records flow in, composition results flow out. Results are built
//! once per request and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named constellation with its fixed attribute bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Display name, unique within the catalog
    pub name: String,
    /// Short IAU abbreviation (e.g. "Ori"), unique within the catalog
    #[serde(alias = "abbr")]
    pub abbreviation: String,
    /// Latin genitive form (display-only)
    #[serde(default)]
    pub genitive: String,
    /// Free-text narrative, scanned for keywords
    pub story: String,
    /// Comma-separated theme phrases
    pub theme: String,
    /// Free-text visual description (display-only)
    pub visual_character: String,
    /// Open-vocabulary brightness label, matched by substring
    #[serde(alias = "brightness_profile")]
    pub brightness: String,
    /// Open-vocabulary shape label, matched by substring
    pub shape: String,
    /// Number of visually prominent stars
    #[serde(alias = "star_count_visual")]
    pub star_count: u32,
}

/// A canvas-relative compositional anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPoint {
    /// Horizontal position in [0, 1]
    pub x: f64,
    /// Vertical position in [0, 1]
    pub y: f64,
    /// Relative visual importance in (0, 1]; not normalized
    pub weight: f64,
}

impl FocalPoint {
    pub const fn new(x: f64, y: f64, weight: f64) -> Self {
        Self { x, y, weight }
    }

    /// True when both coordinates lie on the unit canvas and the weight is positive.
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y) && self.weight > 0.0
    }
}

/// Directional movement descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualFlow {
    pub primary_direction: String,
    pub flow_type: String,
    pub movement_quality: String,
    pub rhythm: String,
}

impl VisualFlow {
    /// Field labels and values in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("primary_direction", self.primary_direction.as_str()),
            ("flow_type", self.flow_type.as_str()),
            ("movement_quality", self.movement_quality.as_str()),
            ("rhythm", self.rhythm.as_str()),
        ]
    }
}

/// Weighted centroid of the focal points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterOfMass {
    pub x: f64,
    pub y: f64,
}

/// Where the centroid sits relative to the canvas center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceType {
    Centered,
    VerticallyCentered,
    HorizontallyCentered,
    Asymmetric,
}

impl BalanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceType::Centered => "centered",
            BalanceType::VerticallyCentered => "vertically_centered",
            BalanceType::HorizontallyCentered => "horizontally_centered",
            BalanceType::Asymmetric => "asymmetric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    Symmetric,
    Asymmetric,
}

impl Symmetry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symmetry::Symmetric => "symmetric",
            Symmetry::Asymmetric => "asymmetric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    High,
    Dynamic,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::High => "high",
            Stability::Dynamic => "dynamic",
        }
    }
}

/// Visual balance characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub balance_type: BalanceType,
    pub center_of_mass: CenterOfMass,
    pub symmetry: Symmetry,
    pub stability: Stability,
}

/// How elements spread across the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialDistribution {
    ClusteredCentral,
    ScatteredWide,
    LinearArrangement,
    MinimalSparse,
    ComplexDense,
    ModerateDistributed,
}

impl SpatialDistribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialDistribution::ClusteredCentral => "clustered_central",
            SpatialDistribution::ScatteredWide => "scattered_wide",
            SpatialDistribution::LinearArrangement => "linear_arrangement",
            SpatialDistribution::MinimalSparse => "minimal_sparse",
            SpatialDistribution::ComplexDense => "complex_dense",
            SpatialDistribution::ModerateDistributed => "moderate_distributed",
        }
    }
}

impl fmt::Display for SpatialDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested visual elements, one list per fixed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedElements {
    pub subjects: Vec<String>,
    pub lighting: Vec<String>,
    pub atmosphere: Vec<String>,
    pub color_palette: Vec<String>,
}

impl SuggestedElements {
    /// Categories in display order.
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("subjects", self.subjects.as_slice()),
            ("lighting", self.lighting.as_slice()),
            ("atmosphere", self.atmosphere.as_slice()),
            ("color_palette", self.color_palette.as_slice()),
        ]
    }
}

/// The full structured output of one mapping call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    /// Ordered anchors; order is meaningful (e.g. belt, shoulders, feet)
    pub focal_points: Vec<FocalPoint>,
    pub visual_flow: VisualFlow,
    pub balance: Balance,
    pub spatial_distribution: SpatialDistribution,
    /// At most five entries; empty when mythology was not requested
    pub mythology_themes: Vec<String>,
    pub suggested_elements: SuggestedElements,
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1024, 1024)
    }
}

/// Output format for rendered responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Structured JSON
    #[default]
    Json,
    /// Human-readable Markdown
    Markdown,
}

impl ResponseFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(ResponseFormat::Json),
            "markdown" | "md" => Some(ResponseFormat::Markdown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Markdown => "markdown",
        }
    }
}
