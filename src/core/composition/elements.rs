//! Suggested visual elements.
//!
//! Four independent keyword tables, one per category: subjects read the
//! story, lighting the brightness tag, atmosphere the shape tag, and the
//! palette the theme text.

use super::rules::{brightness, shape, story, theme, Rule, RuleSet, TagSubject};
use crate::core::models::SuggestedElements;

type Suggestions = &'static [&'static str];

pub static SUBJECT_RULES: RuleSet<Suggestions> = RuleSet {
    rules: &[
        Rule { name: "hunt", when: &[story(&["hunt"])], then: &["figures in pursuit", "dynamic poses", "animals", "weapons"] },
        Rule { name: "rescue", when: &[story(&["rescue"])], then: &["hero and victim", "chains or bonds", "triumphant pose"] },
        Rule { name: "music", when: &[story(&["music", "lyre"])], then: &["musical instruments", "flowing fabric", "contemplative pose"] },
        Rule { name: "wisdom", when: &[story(&["wisdom"])], then: &["scroll or book", "teaching gesture", "attentive students"] },
    ],
    fallback: &["primary figure", "supporting elements", "narrative props"],
};

pub static LIGHTING_RULES: RuleSet<Suggestions> = RuleSet {
    rules: &[
        Rule { name: "extremely_bright", when: &[brightness(&["extremely_bright"])], then: &["dramatic key light", "high contrast", "star-like highlights", "radiating glow"] },
        Rule { name: "two_bright", when: &[brightness(&["two_bright"])], then: &["dual light sources", "balanced illumination", "twin highlights"] },
        Rule { name: "bright_cross", when: &[brightness(&["bright_cross"])], then: &["four-point lighting", "symmetrical illumination", "centered highlight"] },
    ],
    fallback: &["even lighting", "gentle highlights", "soft shadows"],
};

pub static ATMOSPHERE_RULES: RuleSet<Suggestions> = RuleSet {
    rules: &[
        Rule { name: "cascade", when: &[shape(&["cascade"])], then: &["flowing mist", "falling elements", "vertical movement"] },
        Rule { name: "curved", when: &[shape(&["curved", "tail"])], then: &["swirling smoke", "curved lines", "dynamic energy"] },
        Rule { name: "symmetric", when: &[shape(&["symmetric", "cross"])], then: &["balanced composition", "architectural elements", "formal symmetry"] },
    ],
    fallback: &["natural environment", "organic forms", "irregular shapes"],
};

pub static PALETTE_RULES: RuleSet<Suggestions> = RuleSet {
    rules: &[
        Rule { name: "water", when: &[theme(&["water", "flow"])], then: &["blues", "teals", "silver", "flowing gradients"] },
        Rule { name: "fire", when: &[theme(&["fire", "power"])], then: &["reds", "oranges", "golds", "warm tones"] },
        Rule { name: "darkness", when: &[theme(&["death", "darkness"])], then: &["deep purples", "blacks", "dark blues", "somber tones"] },
        Rule { name: "wisdom", when: &[theme(&["wisdom", "healing"])], then: &["greens", "soft golds", "earth tones", "balanced hues"] },
    ],
    fallback: &["starlight whites", "night sky blues", "cosmic purples", "celestial palette"],
};

fn owned(table: &RuleSet<Suggestions>, subject: &TagSubject) -> Vec<String> {
    table.resolve(subject).iter().map(|s| s.to_string()).collect()
}

pub fn suggest_elements(subject: &TagSubject) -> SuggestedElements {
    SuggestedElements {
        subjects: owned(&SUBJECT_RULES, subject),
        lighting: owned(&LIGHTING_RULES, subject),
        atmosphere: owned(&ATMOSPHERE_RULES, subject),
        color_palette: owned(&PALETTE_RULES, subject),
    }
}
