//! Composition Module - The Mapping Engine
//!
//! Turns a catalog record's categorical attributes into composition
//! parameters. Pure and deterministic: the output depends only on the
//! record, the canvas and the mythology flag.
//!
//! # Architecture
//!
//! ```text
//! CatalogRecord → TagSubject ─┬→ focal   → FocalPoints ─→ balance
//!                             ├→ flow    → VisualFlow, SpatialDistribution
//!                             ├→ themes  → mythology themes
//!                             └→ elements→ SuggestedElements
//! ```
//!
//! Each classifier is an ordered [`rules::RuleSet`]; first match wins.

pub mod balance;
pub mod elements;
pub mod flow;
pub mod focal;
pub mod rules;
pub mod seeded;
pub mod themes;

pub use focal::FocalPattern;
pub use rules::{RuleSet, TagSubject};
pub use seeded::Mt19937;

use crate::core::config::CanvasBounds;
use crate::core::enrichment::GeometryData;
use crate::core::error::Result;
use crate::core::models::{CanvasSize, CatalogRecord, CompositionResult};

/// Stateless mapping engine. Cheap to copy; share freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionEngine {
    bounds: CanvasBounds,
}

impl CompositionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine accepting canvases within `bounds`.
    pub fn with_bounds(bounds: CanvasBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &CanvasBounds {
        &self.bounds
    }

    /// Map a record to a fresh composition.
    ///
    /// The canvas is validated against the configured bounds but does not
    /// alter the normalized output. `geometry` is accepted for future use and
    /// currently ignored.
    pub fn compose(
        &self,
        record: &CatalogRecord,
        canvas: CanvasSize,
        include_mythology: bool,
        geometry: Option<&GeometryData>,
    ) -> Result<CompositionResult> {
        self.bounds.check(canvas)?;

        if let Some(geometry) = geometry {
            log::debug!(
                "geometry for {} available ({} polylines), not used by mapping",
                record.abbreviation,
                geometry.lines.len()
            );
        }

        let subject = TagSubject::from_record(record);
        let pattern = focal::classify(&subject);
        log::debug!("{}: focal pattern {:?}", record.name, pattern);

        let focal_points = pattern.points();
        let balance = balance::calculate_balance(&subject, &focal_points);
        let mythology_themes = if include_mythology {
            themes::extract_themes(&subject)
        } else {
            Vec::new()
        };

        Ok(CompositionResult {
            visual_flow: flow::visual_flow(&subject),
            spatial_distribution: flow::spatial_distribution(&subject, record.star_count),
            suggested_elements: elements::suggest_elements(&subject),
            focal_points,
            balance,
            mythology_themes,
        })
    }
}

/// Map with the default canvas bounds.
pub fn map_composition(
    record: &CatalogRecord,
    canvas: CanvasSize,
    include_mythology: bool,
) -> Result<CompositionResult> {
    CompositionEngine::new().compose(record, canvas, include_mythology, None)
}
