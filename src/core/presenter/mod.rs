//! Presenter Module
//!
//! Renders compositions, search results and listings for humans (Markdown)
//! or machines (pretty-printed JSON). The renderers only read; they never
//! alter what the mapping engine produced.

pub mod json;
pub mod markdown;

use crate::core::error::Result;
use crate::core::models::{CanvasSize, CatalogRecord, CompositionResult, ResponseFormat};

/// Reply used by search when nothing matched, in either format.
pub const NO_MATCHES: &str =
    "No constellations found matching your criteria. Try broader search terms.";

/// Render one composition.
pub fn render_composition(
    record: &CatalogRecord,
    canvas: CanvasSize,
    composition: &CompositionResult,
    format: ResponseFormat,
) -> Result<String> {
    match format {
        ResponseFormat::Json => json::composition(record, canvas, composition),
        ResponseFormat::Markdown => Ok(markdown::composition(record, composition)),
    }
}

/// Render search matches in catalog order.
pub fn render_search(matches: &[&CatalogRecord], format: ResponseFormat) -> Result<String> {
    if matches.is_empty() {
        return Ok(NO_MATCHES.to_string());
    }
    match format {
        ResponseFormat::Json => json::search(matches),
        ResponseFormat::Markdown => Ok(markdown::search(matches)),
    }
}

/// Render a full listing. Callers pass records already sorted by name.
pub fn render_list(records: &[&CatalogRecord], format: ResponseFormat) -> Result<String> {
    match format {
        ResponseFormat::Json => json::list(records),
        ResponseFormat::Markdown => Ok(markdown::list(records)),
    }
}

/// Title-case a phrase the way display headings expect: the first letter of
/// every alphabetic run is upper-cased, the rest lower-cased.
///
/// ```
/// use constellation_composer::core::presenter::title_case;
/// assert_eq!(title_case("love and loss"), "Love And Loss");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alphabetic = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}

/// `snake_case` tag to a display label: underscores to spaces, then title-cased.
pub fn tag_label(tag: &str) -> String {
    title_case(&tag.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the hunt"), "The Hunt");
        assert_eq!(title_case("HUNTING prowess"), "Hunting Prowess");
        assert_eq!(title_case("ram's horn"), "Ram'S Horn");
        assert_eq!(title_case("4-point"), "4-Point");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_tag_label() {
        assert_eq!(tag_label("hourglass_belt"), "Hourglass Belt");
        assert_eq!(tag_label("very_bright_center"), "Very Bright Center");
    }

    #[test]
    fn test_empty_search_is_the_same_in_both_formats() {
        assert_eq!(render_search(&[], ResponseFormat::Json).unwrap(), NO_MATCHES);
        assert_eq!(render_search(&[], ResponseFormat::Markdown).unwrap(), NO_MATCHES);
    }

    #[test]
    fn test_list_dispatches_on_format() {
        let records = Catalog::builtin().sorted_by_name();
        let md = render_list(&records, ResponseFormat::Markdown).unwrap();
        assert!(md.starts_with("# Available Constellations (22)"));
        let json = render_list(&records, ResponseFormat::Json).unwrap();
        assert!(json.starts_with('{'));
    }
}
