//! Visual flow and spatial distribution classifiers.
//!
//! Both are driven by the shape tag alone; spatial distribution falls back to
//! star-count thresholds when no shape rule applies.

use super::rules::{shape, Rule, RuleSet, TagSubject};
use crate::core::models::{SpatialDistribution, VisualFlow};

/// Static form of [`VisualFlow`] used in the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowDescriptor {
    pub primary_direction: &'static str,
    pub flow_type: &'static str,
    pub movement_quality: &'static str,
    pub rhythm: &'static str,
}

impl From<&FlowDescriptor> for VisualFlow {
    fn from(d: &FlowDescriptor) -> Self {
        VisualFlow {
            primary_direction: d.primary_direction.to_string(),
            flow_type: d.flow_type.to_string(),
            movement_quality: d.movement_quality.to_string(),
            rhythm: d.rhythm.to_string(),
        }
    }
}

pub static FLOW_RULES: RuleSet<FlowDescriptor> = RuleSet {
    rules: &[
        Rule {
            name: "cascade",
            when: &[shape(&["cascade"])],
            then: FlowDescriptor {
                primary_direction: "downward",
                flow_type: "cascading",
                movement_quality: "fluid, dispersing",
                rhythm: "irregular, natural flow",
            },
        },
        Rule {
            name: "bilateral",
            when: &[shape(&["wings", "symmetric"])],
            then: FlowDescriptor {
                primary_direction: "horizontal",
                flow_type: "bilateral",
                movement_quality: "balanced, expansive",
                rhythm: "symmetrical",
            },
        },
        Rule {
            name: "sinuous",
            when: &[shape(&["curved", "tail"])],
            then: FlowDescriptor {
                primary_direction: "curved sweep",
                flow_type: "sinuous",
                movement_quality: "dynamic, flowing",
                rhythm: "continuous curve",
            },
        },
        Rule {
            name: "radial",
            when: &[shape(&["cross"])],
            then: FlowDescriptor {
                primary_direction: "radial",
                flow_type: "centered",
                movement_quality: "stable, anchored",
                rhythm: "four-way symmetry",
            },
        },
        Rule {
            name: "linear",
            when: &[shape(&["linear", "belt"])],
            then: FlowDescriptor {
                primary_direction: "horizontal",
                flow_type: "linear",
                movement_quality: "direct, purposeful",
                rhythm: "regular spacing",
            },
        },
        Rule {
            name: "zigzag",
            when: &[shape(&["zigzag", "w_"])],
            then: FlowDescriptor {
                primary_direction: "alternating",
                flow_type: "zigzag",
                movement_quality: "energetic, angular",
                rhythm: "rhythmic alternation",
            },
        },
        Rule {
            name: "segmented",
            when: &[shape(&["dipper"])],
            then: FlowDescriptor {
                primary_direction: "L-shaped",
                flow_type: "segmented",
                movement_quality: "contained then extending",
                rhythm: "bowl to handle transition",
            },
        },
    ],
    fallback: FlowDescriptor {
        primary_direction: "multi-directional",
        flow_type: "balanced",
        movement_quality: "stable",
        rhythm: "varied",
    },
};

pub static DISTRIBUTION_RULES: RuleSet<Option<SpatialDistribution>> = RuleSet {
    rules: &[
        Rule { name: "compact", when: &[shape(&["compact"])], then: Some(SpatialDistribution::ClusteredCentral) },
        Rule { name: "scattered", when: &[shape(&["dispersed", "cascade"])], then: Some(SpatialDistribution::ScatteredWide) },
        Rule { name: "linear", when: &[shape(&["linear", "belt"])], then: Some(SpatialDistribution::LinearArrangement) },
    ],
    fallback: None,
};

/// Star counts at or below this are sparse.
pub const SPARSE_MAX_STARS: u32 = 5;
/// Star counts at or above this are dense.
pub const DENSE_MIN_STARS: u32 = 10;

pub fn visual_flow(subject: &TagSubject) -> VisualFlow {
    FLOW_RULES.resolve(subject).into()
}

pub fn spatial_distribution(subject: &TagSubject, star_count: u32) -> SpatialDistribution {
    if let Some(distribution) = DISTRIBUTION_RULES.resolve(subject) {
        return *distribution;
    }
    if star_count <= SPARSE_MAX_STARS {
        SpatialDistribution::MinimalSparse
    } else if star_count >= DENSE_MIN_STARS {
        SpatialDistribution::ComplexDense
    } else {
        SpatialDistribution::ModerateDistributed
    }
}
