//! Supplementary constellation geometry.
//!
//! Best-effort, single-attempt fetch of constellation line figures (GeoJSON)
//! by abbreviation. Nothing downstream depends on the result: the mapping
//! engine accepts it and ignores it. Every failure mode (timeout, HTTP error,
//! missing feature, malformed payload) is `EnrichmentUnavailable`, which
//! callers turn into "no data" via [`fetch_or_none`].

use serde_json::Value;

use crate::core::config::EnrichmentConfig;
use crate::core::error::{ComposerError, Result};

#[cfg(test)]
use mockall::automock;

/// Line figure of one constellation: polylines of `[ra, dec]` pairs in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    pub id: String,
    pub lines: Vec<Vec<[f64; 2]>>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

/// Source of supplementary geometry.
///
/// This trait allows for mocking in tests and alternative implementations
/// (e.g., bundled offline data).
#[cfg_attr(test, automock)]
pub trait GeometrySource: Send + Sync {
    /// Fetch the line figure for a constellation abbreviation
    fn fetch(&self, abbreviation: &str) -> Result<GeometryData>;
}

/// Source that never has data. Used when enrichment is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeometry;

impl GeometrySource for NoGeometry {
    fn fetch(&self, abbreviation: &str) -> Result<GeometryData> {
        Err(ComposerError::enrichment(format!(
            "enrichment disabled, no geometry for '{}'",
            abbreviation
        )))
    }
}

/// Fetch, swallowing any failure into `None`.
pub fn fetch_or_none(source: &dyn GeometrySource, abbreviation: &str) -> Option<GeometryData> {
    match source.fetch(abbreviation) {
        Ok(data) => {
            log::debug!(
                "fetched geometry for {}: {} polylines, {} vertices",
                abbreviation,
                data.lines.len(),
                data.vertex_count()
            );
            Some(data)
        }
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

/// Build the source described by the configuration.
pub fn source_from_config(config: &EnrichmentConfig) -> Box<dyn GeometrySource> {
    if !config.enabled {
        return Box::new(NoGeometry);
    }

    #[cfg(feature = "enrichment")]
    {
        match HttpGeometrySource::new(&config.url, config.timeout_ms) {
            Ok(source) => return Box::new(source),
            Err(e) => log::warn!("{}", e),
        }
    }

    #[cfg(not(feature = "enrichment"))]
    log::warn!("geometry enrichment requested but the 'enrichment' feature is not compiled in");

    Box::new(NoGeometry)
}

// =============================================================================
// GeoJSON parsing
// =============================================================================

fn feature_id(feature: &Value) -> Option<&str> {
    feature
        .get("properties")
        .and_then(|p| p.get("id"))
        .or_else(|| feature.get("id"))
        .and_then(Value::as_str)
}

fn parse_position(value: &Value) -> Option<[f64; 2]> {
    let pair = value.as_array()?;
    match pair.as_slice() {
        [ra, dec, ..] => Some([ra.as_f64()?, dec.as_f64()?]),
        _ => None,
    }
}

fn parse_polyline(value: &Value) -> Option<Vec<[f64; 2]>> {
    value.as_array()?.iter().map(parse_position).collect()
}

/// Pick the feature for `abbreviation` out of a GeoJSON FeatureCollection.
pub fn parse_feature_collection(collection: &Value, abbreviation: &str) -> Result<GeometryData> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| ComposerError::enrichment("payload has no 'features' array"))?;

    let feature = features
        .iter()
        .find(|f| feature_id(f) == Some(abbreviation))
        .ok_or_else(|| ComposerError::enrichment(format!("no feature with id '{}'", abbreviation)))?;

    let geometry = feature
        .get("geometry")
        .ok_or_else(|| ComposerError::enrichment("feature has no geometry"))?;
    let coordinates = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| ComposerError::enrichment("geometry has no coordinates"))?;

    let lines = match geometry.get("type").and_then(Value::as_str) {
        Some("LineString") => parse_polyline(&Value::Array(coordinates.clone())).map(|line| vec![line]),
        _ => coordinates.iter().map(parse_polyline).collect(),
    }
    .ok_or_else(|| ComposerError::enrichment("malformed coordinates"))?;

    Ok(GeometryData {
        id: abbreviation.to_string(),
        lines,
    })
}

// =============================================================================
// HTTP source
// =============================================================================

/// Downloads the line-figure collection over HTTP with a hard timeout.
#[cfg(feature = "enrichment")]
pub struct HttpGeometrySource {
    client: reqwest::blocking::Client,
    url: String,
}

#[cfg(feature = "enrichment")]
impl HttpGeometrySource {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ComposerError::enrichment(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[cfg(feature = "enrichment")]
impl GeometrySource for HttpGeometrySource {
    fn fetch(&self, abbreviation: &str) -> Result<GeometryData> {
        let collection: Value = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| ComposerError::enrichment(format!("fetching {}: {}", self.url, e)))?;
        parse_feature_collection(&collection, abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "Lyr",
                    "properties": {"rank": "1"},
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[279.23, 38.78], [281.19, 37.6]], [[282.52, 33.36], [284.74, 32.69]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"id": "Ori"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[88.79, 7.41], [81.28, 6.35], [83.0, -0.3]]
                    }
                },
                {
                    "type": "Feature",
                    "id": "Bad",
                    "geometry": {"type": "MultiLineString", "coordinates": [[["x", 1.0]]]}
                }
            ]
        })
    }

    #[test]
    fn test_parse_multilinestring_by_top_level_id() {
        let data = parse_feature_collection(&collection(), "Lyr").unwrap();
        assert_eq!(data.id, "Lyr");
        assert_eq!(data.lines.len(), 2);
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.lines[0][0], [279.23, 38.78]);
    }

    #[test]
    fn test_parse_linestring_by_property_id() {
        let data = parse_feature_collection(&collection(), "Ori").unwrap();
        assert_eq!(data.lines.len(), 1);
        assert_eq!(data.lines[0].len(), 3);
    }

    #[test]
    fn test_missing_feature_is_unavailable() {
        let err = parse_feature_collection(&collection(), "Cyg").unwrap_err();
        assert!(matches!(err, ComposerError::EnrichmentUnavailable { .. }));
    }

    #[test]
    fn test_malformed_payloads_are_unavailable() {
        assert!(parse_feature_collection(&json!({"features": 3}), "Ori").is_err());
        assert!(parse_feature_collection(&json!([]), "Ori").is_err());
        assert!(parse_feature_collection(&collection(), "Bad").is_err());
    }

    #[test]
    fn test_no_geometry_source() {
        assert!(fetch_or_none(&NoGeometry, "Ori").is_none());
    }

    #[test]
    fn test_fetch_or_none_swallows_errors() {
        let mut source = MockGeometrySource::new();
        source
            .expect_fetch()
            .returning(|_| Err(ComposerError::enrichment("timed out")));
        assert!(fetch_or_none(&source, "Ori").is_none());
    }

    #[test]
    fn test_fetch_or_none_passes_data_through() {
        let mut source = MockGeometrySource::new();
        source
            .expect_fetch()
            .withf(|abbr| abbr == "Ori")
            .times(1)
            .returning(|abbr| {
                Ok(GeometryData {
                    id: abbr.to_string(),
                    lines: vec![vec![[1.0, 2.0]]],
                })
            });
        let data = fetch_or_none(&source, "Ori").unwrap();
        assert_eq!(data.vertex_count(), 1);
    }

    #[test]
    fn test_disabled_config_yields_inert_source() {
        let source = source_from_config(&EnrichmentConfig::default());
        assert!(fetch_or_none(source.as_ref(), "Ori").is_none());
    }
}
