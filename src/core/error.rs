//! Error types for the constellation composer
//!
//! This module provides structured error handling using thiserror.

use thiserror::Error;

/// Result type alias for composer operations
pub type Result<T> = std::result::Result<T, ComposerError>;

/// Errors that can occur while resolving, mapping or rendering a constellation
#[derive(Error, Debug)]
pub enum ComposerError {
    /// Record name or abbreviation could not be resolved
    #[error("Constellation '{query}' not found. Available constellations: {}", available.join(", "))]
    NotFound {
        query: String,
        /// Every valid catalog name, sorted
        available: Vec<String>,
    },

    /// A request field violated its constraint
    #[error("Invalid input for '{field}': {constraint}")]
    InvalidInput { field: String, constraint: String },

    /// Supplementary geometry could not be fetched
    #[error("Geometry enrichment unavailable: {reason}")]
    EnrichmentUnavailable { reason: String },

    /// Catalog data failed validation
    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error while reading configuration or catalog files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ComposerError>,
    },
}

impl ComposerError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ComposerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        ComposerError::InvalidInput {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a not-found error carrying the list of valid names
    pub fn not_found(query: impl Into<String>, available: Vec<String>) -> Self {
        ComposerError::NotFound {
            query: query.into(),
            available,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ComposerError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        ComposerError::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create an enrichment error
    pub fn enrichment(reason: impl Into<String>) -> Self {
        ComposerError::EnrichmentUnavailable {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's request rather than the system
    pub fn is_client_error(&self) -> bool {
        match self {
            ComposerError::NotFound { .. } | ComposerError::InvalidInput { .. } => true,
            ComposerError::WithContext { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
