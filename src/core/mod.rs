//! Core module for the constellation composer
//!
//! # Architecture
//!
//! - `models`: Core data structures (CatalogRecord, CompositionResult, CanvasSize)
//! - `error`: Error types using thiserror
//! - `config`: Configuration file model and discovery
//! - `catalog`: Built-in catalog, lookup and search
//! - `composition`: The mapping engine and its rule tables
//! - `enrichment`: Optional supplementary geometry fetch
//! - `presenter`: JSON and Markdown rendering
//! - `service`: Boundary operations used by the CLI and MCP servers

pub mod catalog;
pub mod composition;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod presenter;
pub mod service;

// Re-export commonly used types
pub use catalog::{Catalog, SearchQuery};
pub use composition::{map_composition, CompositionEngine, FocalPattern};
pub use config::{CanvasBounds, Config, EnrichmentConfig};
pub use enrichment::{GeometryData, GeometrySource, NoGeometry};
pub use error::{ComposerError, Result, ResultExt};
pub use models::{
    Balance, BalanceType, CanvasSize, CatalogRecord, CenterOfMass, CompositionResult, FocalPoint,
    ResponseFormat, SpatialDistribution, Stability, SuggestedElements, Symmetry, VisualFlow,
};
pub use service::{ComposeRequest, ConstellationService, SearchRequest};
