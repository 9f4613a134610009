//! MCP tool definitions shared by the stdio server and the rmcp binary.
//!
//! Argument structs double as JSON schemas when the `mcp` feature is on
//! (doc comments become field descriptions).

use serde::Deserialize;
use serde_json::Value;

#[cfg(feature = "mcp")]
use rmcp::schemars;

use crate::core::catalog::SearchQuery;
use crate::core::error::{ComposerError, Result};
use crate::core::models::ResponseFormat;
use crate::core::service::{ComposeRequest, ConstellationService, SearchRequest};

pub const SEARCH_TOOL: &str = "search_constellations";
pub const COMPOSE_TOOL: &str = "generate_constellation_composition";
pub const LIST_TOOL: &str = "list_all_constellations";

pub const SEARCH_DESCRIPTION: &str = "Search constellations by name, theme, visual characteristics, or shape. \
Returns mythology, visual character, shape and brightness for every match.";
pub const COMPOSE_DESCRIPTION: &str = "Generate deterministic composition parameters (focal points, visual flow, \
balance, spatial distribution, mythology themes, suggested elements) from a constellation.";
pub const LIST_DESCRIPTION: &str = "List all available constellations with abbreviation, theme and shape.";

/// Input for generate_constellation_composition
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct CompositionArgs {
    /// Name or abbreviation of the constellation (e.g. "Orion", "UMa")
    pub constellation_name: String,
    /// Canvas width in pixels (512-4096, default 1024)
    #[serde(default)]
    pub canvas_width: Option<i64>,
    /// Canvas height in pixels (512-4096, default 1024)
    #[serde(default)]
    pub canvas_height: Option<i64>,
    /// Include mythological themes (default true)
    #[serde(default = "default_true")]
    pub include_mythology: bool,
    /// "json" (default) or "markdown"
    #[serde(default)]
    pub response_format: Option<String>,
}

/// Input for search_constellations
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct SearchArgs {
    /// Text matched against name, story, theme and visual character
    #[serde(default)]
    pub query: Option<String>,
    /// Shape filter: linear, curved, triangular, square, cross, dipper, dispersed, compact, symmetric
    #[serde(default)]
    pub shape_type: Option<String>,
    /// Brightness filter: faint, moderate, bright, very_bright, extremely_bright
    #[serde(default)]
    pub brightness: Option<String>,
    /// "markdown" (default) or "json"
    #[serde(default)]
    pub response_format: Option<String>,
}

/// Input for list_all_constellations
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct ListArgs {
    /// "markdown" (default) or "json"
    #[serde(default)]
    pub response_format: Option<String>,
}

fn default_true() -> bool {
    true
}

fn response_format(raw: Option<&str>, default: ResponseFormat) -> Result<ResponseFormat> {
    match raw {
        None => Ok(default),
        Some(s) => ResponseFormat::parse(s).ok_or_else(|| {
            ComposerError::invalid_input("response_format", format!("must be 'json' or 'markdown', got '{}'", s))
        }),
    }
}

fn dimension(field: &str, value: Option<i64>) -> Result<Option<u32>> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                ComposerError::invalid_input(field, format!("must be a positive pixel count, got {}", v))
            })
        })
        .transpose()
}

impl CompositionArgs {
    pub fn into_request(self) -> Result<ComposeRequest> {
        Ok(ComposeRequest {
            canvas_width: dimension("canvas_width", self.canvas_width)?,
            canvas_height: dimension("canvas_height", self.canvas_height)?,
            include_mythology: self.include_mythology,
            format: response_format(self.response_format.as_deref(), ResponseFormat::Json)?,
            name: self.constellation_name,
        })
    }
}

impl SearchArgs {
    pub fn into_request(self) -> Result<SearchRequest> {
        let format = response_format(self.response_format.as_deref(), ResponseFormat::Markdown)?;
        let query = SearchQuery {
            text: self.query,
            shape: self.shape_type,
            brightness: self.brightness,
        };
        Ok(SearchRequest::new(query).format(format))
    }
}

impl ListArgs {
    pub fn format(&self) -> Result<ResponseFormat> {
        response_format(self.response_format.as_deref(), ResponseFormat::Markdown)
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| ComposerError::invalid_input("arguments", e.to_string()))
}

/// Run a tool by name. `None` when the tool does not exist.
pub fn dispatch(service: &ConstellationService, tool: &str, arguments: Value) -> Option<Result<String>> {
    let outcome = match tool {
        SEARCH_TOOL => parse_args::<SearchArgs>(arguments)
            .and_then(SearchArgs::into_request)
            .and_then(|request| service.search(&request)),
        COMPOSE_TOOL => parse_args::<CompositionArgs>(arguments)
            .and_then(CompositionArgs::into_request)
            .and_then(|request| service.compose(&request)),
        LIST_TOOL => parse_args::<ListArgs>(arguments)
            .and_then(|args| args.format())
            .and_then(|format| service.list(format)),
        _ => return None,
    };
    Some(outcome)
}
