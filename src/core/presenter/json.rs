//! JSON views. Field order of the view structs is the wire order.

use serde::Serialize;

use crate::core::error::Result;
use crate::core::models::{CanvasSize, CatalogRecord, CompositionResult};

#[derive(Serialize)]
struct CompositionView<'a> {
    constellation: &'a str,
    abbreviation: &'a str,
    canvas: CanvasSize,
    composition: &'a CompositionResult,
}

#[derive(Serialize)]
struct SearchHit<'a> {
    name: &'a str,
    abbr: &'a str,
    story: &'a str,
    theme: &'a str,
    visual_character: &'a str,
    shape: &'a str,
    brightness_profile: &'a str,
    star_count: u32,
}

impl<'a> From<&'a CatalogRecord> for SearchHit<'a> {
    fn from(r: &'a CatalogRecord) -> Self {
        Self {
            name: &r.name,
            abbr: &r.abbreviation,
            story: &r.story,
            theme: &r.theme,
            visual_character: &r.visual_character,
            shape: &r.shape,
            brightness_profile: &r.brightness,
            star_count: r.star_count,
        }
    }
}

#[derive(Serialize)]
struct SearchView<'a> {
    constellations: Vec<SearchHit<'a>>,
    count: usize,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    abbreviation: &'a str,
    theme: &'a str,
    shape: &'a str,
}

#[derive(Serialize)]
struct ListView<'a> {
    constellations: Vec<ListEntry<'a>>,
    total_count: usize,
}

pub fn composition(
    record: &CatalogRecord,
    canvas: CanvasSize,
    composition: &CompositionResult,
) -> Result<String> {
    let view = CompositionView {
        constellation: &record.name,
        abbreviation: &record.abbreviation,
        canvas,
        composition,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn search(matches: &[&CatalogRecord]) -> Result<String> {
    let view = SearchView {
        constellations: matches.iter().map(|r| SearchHit::from(*r)).collect(),
        count: matches.len(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn list(records: &[&CatalogRecord]) -> Result<String> {
    let view = ListView {
        constellations: records
            .iter()
            .map(|r| ListEntry {
                name: &r.name,
                abbreviation: &r.abbreviation,
                theme: &r.theme,
                shape: &r.shape,
            })
            .collect(),
        total_count: records.len(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
