//! Mythology theme extraction.
//!
//! Explicit theme fragments come first, followed by tags implied by keywords
//! in the story, in keyword-table order. The combined list is capped.

use super::rules::{all_matches, story, Field, Rule, TagSubject};

/// Upper bound on returned themes.
pub const MAX_THEMES: usize = 5;

/// Keyword families scanned in the story. Every matching family contributes.
pub static IMPLIED_THEMES: &[Rule<&str>] = &[
    Rule { name: "rescue", when: &[story(&["rescue", "save"])], then: "heroic rescue" },
    Rule { name: "hunt", when: &[story(&["hunt", "prey"])], then: "the hunt" },
    Rule { name: "transform", when: &[story(&["transform"])], then: "transformation" },
    Rule { name: "mortality", when: &[story(&["death", "kill", "slay"])], then: "mortality" },
    Rule { name: "eternity", when: &[story(&["eternal", "immortal"])], then: "eternity" },
    Rule { name: "love", when: &[story(&["love"])], then: "love and loss" },
    Rule { name: "wisdom", when: &[story(&["wisdom", "teacher"])], then: "wisdom" },
    Rule { name: "punishment", when: &[story(&["punishment"])], then: "divine punishment" },
];

pub fn extract_themes(subject: &TagSubject) -> Vec<String> {
    let mut themes: Vec<String> = Vec::new();

    let explicit = subject
        .field(Field::Theme)
        .split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty());
    for fragment in explicit {
        push_theme(&mut themes, fragment);
    }
    for implied in all_matches(IMPLIED_THEMES, subject) {
        push_theme(&mut themes, implied);
    }

    themes
}

fn push_theme(themes: &mut Vec<String>, theme: &str) {
    if themes.len() < MAX_THEMES && !themes.iter().any(|t| t == theme) {
        themes.push(theme.to_string());
    }
}
