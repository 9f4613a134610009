//! Boundary operations: resolve-and-map, search, and list-all.
//!
//! The service owns the catalog, the validated configuration and the
//! geometry source, and hands rendered text back to transports (CLI and MCP
//! servers). Input validation happens here, before the mapping engine runs.

use crate::core::catalog::{Catalog, SearchQuery};
use crate::core::composition::CompositionEngine;
use crate::core::config::Config;
use crate::core::enrichment::{self, GeometrySource};
use crate::core::error::{ComposerError, Result};
use crate::core::models::{CanvasSize, CatalogRecord, CompositionResult, ResponseFormat};
use crate::core::presenter;

/// Accepted length of a record name or abbreviation, after trimming.
pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 50;

/// Input for resolve-and-map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    /// Name or abbreviation, case-insensitive
    pub name: String,
    /// Falls back to the configured default when absent
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub include_mythology: bool,
    pub format: ResponseFormat,
}

impl ComposeRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canvas_width: None,
            canvas_height: None,
            include_mythology: true,
            format: ResponseFormat::Json,
        }
    }

    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = Some(width);
        self.canvas_height = Some(height);
        self
    }

    pub fn include_mythology(mut self, include: bool) -> Self {
        self.include_mythology = include;
        self
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

/// Input for search. Renders as Markdown unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub format: ResponseFormat,
}

impl SearchRequest {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            format: ResponseFormat::Markdown,
        }
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

/// A mapped record together with the canvas it was validated against.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition<'a> {
    pub record: &'a CatalogRecord,
    pub canvas: CanvasSize,
    pub result: CompositionResult,
}

/// Catalog, configuration and enrichment bundled behind the three operations.
pub struct ConstellationService {
    catalog: Catalog,
    config: Config,
    engine: CompositionEngine,
    geometry: Box<dyn GeometrySource>,
}

impl Default for ConstellationService {
    fn default() -> Self {
        Self::new(Catalog::builtin().clone(), Config::default())
    }
}

impl ConstellationService {
    /// Build a service; the geometry source follows `config.enrichment`.
    pub fn new(catalog: Catalog, config: Config) -> Self {
        let geometry = enrichment::source_from_config(&config.enrichment);
        Self {
            engine: CompositionEngine::with_bounds(config.canvas),
            catalog,
            config,
            geometry,
        }
    }

    /// Built-in catalog with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self::new(Catalog::builtin().clone(), config)
    }

    /// Replace the geometry source.
    pub fn with_geometry_source(mut self, source: Box<dyn GeometrySource>) -> Self {
        self.geometry = source;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate the request, resolve the record and map it.
    pub fn resolve_and_map(&self, request: &ComposeRequest) -> Result<Composition<'_>> {
        let name = validate_name(&request.name)?;
        let defaults = self.config.canvas.default_canvas();
        let canvas = CanvasSize::new(
            request.canvas_width.unwrap_or(defaults.width),
            request.canvas_height.unwrap_or(defaults.height),
        );
        self.engine.bounds().check(canvas)?;

        let record = self.catalog.resolve(name)?;
        let geometry = enrichment::fetch_or_none(self.geometry.as_ref(), &record.abbreviation);
        let result = self
            .engine
            .compose(record, canvas, request.include_mythology, geometry.as_ref())?;

        log::info!(
            "composed {} ({} focal points, {})",
            record.name,
            result.focal_points.len(),
            result.spatial_distribution
        );

        Ok(Composition {
            record,
            canvas,
            result,
        })
    }

    /// Resolve-and-map, rendered in the requested format.
    pub fn compose(&self, request: &ComposeRequest) -> Result<String> {
        let composition = self.resolve_and_map(request)?;
        presenter::render_composition(
            composition.record,
            composition.canvas,
            &composition.result,
            request.format,
        )
    }

    /// Catalog search, rendered. No match is a normal reply, not an error.
    pub fn search(&self, request: &SearchRequest) -> Result<String> {
        let matches = self.catalog.search(&request.query);
        log::debug!("search {:?}: {} matches", request.query, matches.len());
        presenter::render_search(&matches, request.format)
    }

    /// Full catalog sorted by name, rendered.
    pub fn list(&self, format: ResponseFormat) -> Result<String> {
        presenter::render_list(&self.catalog.sorted_by_name(), format)
    }
}

fn validate_name(raw: &str) -> Result<&str> {
    let name = raw.trim();
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(ComposerError::invalid_input(
            "constellation_name",
            format!(
                "must be between {} and {} characters, got {}",
                NAME_MIN_CHARS, NAME_MAX_CHARS, chars
            ),
        ));
    }
    Ok(name)
}
