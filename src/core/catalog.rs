//! Constellation Catalog Module
//!
//! The immutable set of named records the mapping engine reads from. The
//! built-in catalog is an embedded table materialized once per process; other
//! catalogs can be loaded from JSON and are validated on load.
//!
//! Lookup is case-insensitive on both the display name and the abbreviation.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::core::error::{ComposerError, Result};
use crate::core::models::CatalogRecord;

// =============================================================================
// Built-in Data
// =============================================================================

/// Row layout: name, abbreviation, genitive, story, theme, visual character,
/// brightness, star count, shape.
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    &'static str,
);

const BUILTIN_ROWS: &[Row] = &[
    (
        "Andromeda", "And", "Andromedae",
        "Chained princess rescued by Perseus",
        "Sacrifice, rescue, beauty in chains",
        "Linear with graceful curves, horizontal spread",
        "moderate_to_bright", 7, "elongated_linear",
    ),
    (
        "Aquarius", "Aqr", "Aquarii",
        "Water bearer pouring from celestial jar",
        "Flow, abundance, giving",
        "Cascading downward flow, dispersed",
        "moderate", 8, "dispersed_cascade",
    ),
    (
        "Aquila", "Aql", "Aquilae",
        "Eagle carrying Zeus's thunderbolts",
        "Power, divine messenger, soaring",
        "Wings spread wide, central bright star",
        "very_bright_center", 6, "symmetric_wings",
    ),
    (
        "Aries", "Ari", "Arietis",
        "Golden fleece ram",
        "Courage, sacrifice, precious treasure",
        "Compact curved form, ram's horn",
        "bright", 4, "compact_curved",
    ),
    (
        "Cancer", "Cnc", "Cancri",
        "Crab sent by Hera to distract Hercules",
        "Persistence, protective shell",
        "Compact cluster, crab body",
        "faint_with_cluster", 5, "compact_central",
    ),
    (
        "Canis Major", "CMa", "Canis Majoris",
        "Greater hunting dog following Orion",
        "Loyalty, hunting, companionship",
        "Compact with brilliant Sirius, dynamic stance",
        "extremely_bright_star", 8, "compact_dynamic",
    ),
    (
        "Capricornus", "Cap", "Capricorni",
        "Sea-goat with fish tail",
        "Duality, earth and water, ambition",
        "Triangular form, goat's head to fish tail",
        "moderate", 7, "triangular",
    ),
    (
        "Cassiopeia", "Cas", "Cassiopeiae",
        "Vain queen bound to throne",
        "Pride, punishment, eternal vigilance",
        "Distinctive W or M shape, highly recognizable",
        "bright", 5, "w_zigzag",
    ),
    (
        "Centaurus", "Cen", "Centauri",
        "Wise centaur, teacher of heroes",
        "Wisdom, healing, mentorship",
        "Large spread, bow-wielding stance",
        "very_bright", 11, "large_complex",
    ),
    (
        "Cygnus", "Cyg", "Cygni",
        "Swan, Zeus in disguise, Northern Cross",
        "Transformation, grace, divine deception",
        "Perfect cross or swan in flight",
        "bright_cross", 6, "cross_symmetric",
    ),
    (
        "Gemini", "Gem", "Geminorum",
        "Twin brothers Castor and Pollux",
        "Brotherhood, duality, eternal bond",
        "Twin parallel figures, two bright stars",
        "two_bright_stars", 8, "parallel_twins",
    ),
    (
        "Leo", "Leo", "Leonis",
        "Nemean lion slain by Hercules",
        "Courage, royalty, invincibility",
        "Sickle for head/mane, triangle for body",
        "very_bright", 9, "sickle_triangle",
    ),
    (
        "Lyra", "Lyr", "Lyrae",
        "Orpheus's lyre",
        "Music, art, lost love",
        "Compact parallelogram, small but bright",
        "extremely_bright_star", 5, "compact_parallelogram",
    ),
    (
        "Orion", "Ori", "Orionis",
        "Great hunter with belt and sword",
        "Hunting prowess, tragic death, grandeur",
        "Hourglass with distinctive belt, large and commanding",
        "multiple_bright_stars", 10, "hourglass_belt",
    ),
    (
        "Pegasus", "Peg", "Pegasi",
        "Winged horse sprung from Medusa's blood",
        "Inspiration, flight, poetic achievement",
        "Great square with extended lines for head/legs",
        "bright_square", 9, "square_extended",
    ),
    (
        "Perseus", "Per", "Persei",
        "Hero who slew Medusa",
        "Heroism, clever strategy, reflection",
        "Curved chain from Cassiopeia, Medusa's head",
        "bright", 8, "curved_chain",
    ),
    (
        "Sagittarius", "Sgr", "Sagittarii",
        "Centaur archer aiming at Scorpius",
        "Aim, philosophy, adventure",
        "Teapot shape, pointing toward galactic center",
        "bright", 10, "teapot",
    ),
    (
        "Scorpius", "Sco", "Scorpii",
        "Scorpion that killed Orion",
        "Danger, deadly beauty, revenge",
        "Curved tail with stinger, bright red heart",
        "very_bright_red", 12, "curved_tail",
    ),
    (
        "Taurus", "Tau", "Tauri",
        "Bull form of Zeus, Pleiades sisters",
        "Strength, passion, pursuit",
        "V-shaped face, Pleiades cluster",
        "bright_with_cluster", 8, "v_shaped",
    ),
    (
        "Ursa Major", "UMa", "Ursae Majoris",
        "Great bear, transformed Callisto, Big Dipper",
        "Transformation, eternal circling, guidance",
        "Dipper shape, circumpolar, never setting",
        "bright", 7, "dipper",
    ),
    (
        "Ursa Minor", "UMi", "Ursae Minoris",
        "Little bear, contains North Star",
        "Guidance, steadfastness, eternal pivot",
        "Small dipper, Polaris at tail",
        "bright_pole_star", 7, "small_dipper",
    ),
    (
        "Virgo", "Vir", "Virginis",
        "Maiden of harvest, justice, or purity",
        "Harvest, innocence, justice",
        "Y-shaped figure, large sprawling",
        "very_bright", 9, "y_shaped",
    ),
];

fn record_from_row(row: &Row) -> CatalogRecord {
    let (name, abbreviation, genitive, story, theme, visual_character, brightness, star_count, shape) = *row;
    CatalogRecord {
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        genitive: genitive.to_string(),
        story: story.to_string(),
        theme: theme.to_string(),
        visual_character: visual_character.to_string(),
        brightness: brightness.to_string(),
        shape: shape.to_string(),
        star_count,
    }
}

lazy_static! {
    static ref BUILTIN: Catalog = Catalog {
        records: BUILTIN_ROWS.iter().map(record_from_row).collect(),
    };
}

// =============================================================================
// Queries
// =============================================================================

/// Filters for catalog search. All provided filters are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring of name, story, theme or visual character
    pub text: Option<String>,
    /// Substring of the shape tag
    pub shape: Option<String>,
    /// Substring of the brightness tag
    pub brightness: Option<String>,
}

impl SearchQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn brightness(mut self, brightness: impl Into<String>) -> Self {
        self.brightness = Some(brightness.into());
        self
    }

    fn matches(&self, record: &CatalogRecord) -> bool {
        if let Some(text) = non_empty(&self.text) {
            let searchable = format!(
                "{} {} {} {}",
                record.name, record.story, record.theme, record.visual_character
            )
            .to_lowercase();
            if !searchable.contains(&text) {
                return false;
            }
        }
        if let Some(shape) = non_empty(&self.shape) {
            if !record.shape.to_lowercase().contains(&shape) {
                return false;
            }
        }
        if let Some(brightness) = non_empty(&self.brightness) {
            if !record.brightness.to_lowercase().contains(&brightness) {
                return false;
            }
        }
        true
    }
}

fn non_empty(filter: &Option<String>) -> Option<String> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

// =============================================================================
// Catalog
// =============================================================================

/// An immutable, non-empty collection of constellation records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// The embedded catalog, shared for the lifetime of the process.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog, enforcing non-emptiness and unique keys.
    pub fn new(records: Vec<CatalogRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(ComposerError::invalid_catalog("catalog must contain at least one record"));
        }

        let mut names = HashSet::new();
        let mut abbreviations = HashSet::new();
        for record in &records {
            if record.name.trim().is_empty() || record.abbreviation.trim().is_empty() {
                return Err(ComposerError::invalid_catalog(
                    "every record needs a name and an abbreviation",
                ));
            }
            if !names.insert(record.name.to_lowercase()) {
                return Err(ComposerError::invalid_catalog(format!(
                    "duplicate name '{}'",
                    record.name
                )));
            }
            if !abbreviations.insert(record.abbreviation.to_lowercase()) {
                return Err(ComposerError::invalid_catalog(format!(
                    "duplicate abbreviation '{}'",
                    record.abbreviation
                )));
            }
            if record.star_count == 0 {
                return Err(ComposerError::invalid_catalog(format!(
                    "'{}' has a zero star count",
                    record.name
                )));
            }
        }

        Ok(Self { records })
    }

    /// Load a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(json).map_err(|e| ComposerError::invalid_catalog(e.to_string()))?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in catalog order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Resolve an exact name or abbreviation, ignoring case. Names win over
    /// abbreviations. Input is not trimmed.
    pub fn find(&self, name_or_abbreviation: &str) -> Option<&CatalogRecord> {
        let needle = name_or_abbreviation.to_lowercase();
        self.records
            .iter()
            .find(|r| r.name.to_lowercase() == needle)
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| r.abbreviation.to_lowercase() == needle)
            })
    }

    /// Like [`Catalog::find`], but unresolvable input becomes `NotFound`
    /// carrying every valid name.
    pub fn resolve(&self, name_or_abbreviation: &str) -> Result<&CatalogRecord> {
        self.find(name_or_abbreviation)
            .ok_or_else(|| ComposerError::not_found(name_or_abbreviation, self.sorted_names()))
    }

    /// All display names, sorted.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    /// All records, sorted by name.
    pub fn sorted_by_name(&self) -> Vec<&CatalogRecord> {
        let mut records: Vec<&CatalogRecord> = self.records.iter().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    /// Records matching every provided filter, in catalog order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&CatalogRecord> {
        self.records.iter().filter(|r| query.matches(r)).collect()
    }
}
