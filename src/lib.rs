//! constellation_composer - Constellation to image-composition mapping
//!
//! Maps a fixed catalog of constellations to deterministic visual-composition
//! parameters (focal points, flow, balance, spatial distribution, mythology
//! themes, suggested elements). It is designed to be consumed by:
//! - The CLI binary (src/bin/constellation.rs)
//! - The built-in stdio MCP server (`constellation --server`)
//! - The rmcp-based MCP server (src/bin/mcp_server.rs, feature `mcp`)
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/**: Thin wrappers that call the library
//!
//! # Example
//!
//! ```
//! use constellation_composer::{map_composition, CanvasSize, Catalog};
//!
//! let gemini = Catalog::builtin().find("gem").unwrap();
//! let composition = map_composition(gemini, CanvasSize::default(), true).unwrap();
//! assert_eq!(composition.focal_points.len(), 2);
//! ```

pub mod core;
pub mod server;

pub use crate::core::{
    map_composition, Catalog, CatalogRecord, CanvasSize, ComposeRequest, ComposerError,
    CompositionEngine, CompositionResult, Config, ConstellationService, FocalPoint,
    ResponseFormat, Result, SearchQuery, SearchRequest,
};

/// Crate version, as reported to MCP clients
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the constellation_composer library
pub fn version() -> &'static str {
    VERSION
}
