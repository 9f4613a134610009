//! Ordered rule tables over open-vocabulary tags.
//!
//! Every classifier in the engine is a static list of `(predicate, outcome)`
//! pairs evaluated top to bottom; the first matching rule wins and a fallback
//! outcome guarantees totality. Keyword scans that collect every match use a
//! bare rule slice with [`all_matches`] instead. Keeping the tables as data makes precedence
//! visible and testable on its own.

use crate::core::models::CatalogRecord;

/// Which attribute of a record a predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Shape,
    Brightness,
    Story,
    Theme,
}

/// Holds when `field` contains any of `needles`.
#[derive(Debug, Clone, Copy)]
pub struct Contains {
    pub field: Field,
    pub needles: &'static [&'static str],
}

/// Shorthand constructors used by the rule tables.
pub const fn shape(needles: &'static [&'static str]) -> Contains {
    Contains { field: Field::Shape, needles }
}

pub const fn brightness(needles: &'static [&'static str]) -> Contains {
    Contains { field: Field::Brightness, needles }
}

pub const fn story(needles: &'static [&'static str]) -> Contains {
    Contains { field: Field::Story, needles }
}

pub const fn theme(needles: &'static [&'static str]) -> Contains {
    Contains { field: Field::Theme, needles }
}

/// A single rule: matches when any of its predicates holds.
#[derive(Debug)]
pub struct Rule<T> {
    pub name: &'static str,
    pub when: &'static [Contains],
    pub then: T,
}

/// Lower-cased view of the attributes rules inspect.
#[derive(Debug, Clone)]
pub struct TagSubject {
    shape: String,
    brightness: String,
    story: String,
    theme: String,
}

impl TagSubject {
    pub fn new(
        shape: impl AsRef<str>,
        brightness: impl AsRef<str>,
        story: impl AsRef<str>,
        theme: impl AsRef<str>,
    ) -> Self {
        Self {
            shape: shape.as_ref().to_lowercase(),
            brightness: brightness.as_ref().to_lowercase(),
            story: story.as_ref().to_lowercase(),
            theme: theme.as_ref().to_lowercase(),
        }
    }

    pub fn from_record(record: &CatalogRecord) -> Self {
        Self::new(&record.shape, &record.brightness, &record.story, &record.theme)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Shape => &self.shape,
            Field::Brightness => &self.brightness,
            Field::Story => &self.story,
            Field::Theme => &self.theme,
        }
    }

    fn holds(&self, predicate: &Contains) -> bool {
        let haystack = self.field(predicate.field);
        predicate.needles.iter().any(|needle| haystack.contains(needle))
    }

    /// True when any predicate of the rule holds.
    pub fn satisfies<T>(&self, rule: &Rule<T>) -> bool {
        rule.when.iter().any(|p| self.holds(p))
    }
}

/// An ordered, first-match-wins table with a fallback.
#[derive(Debug)]
pub struct RuleSet<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub fallback: T,
}

impl<T: 'static> RuleSet<T> {
    /// The first rule that matches, if any.
    pub fn first_match(&self, subject: &TagSubject) -> Option<&Rule<T>> {
        self.rules.iter().find(|rule| subject.satisfies(rule))
    }

    /// Outcome of the first matching rule, or the fallback.
    pub fn resolve(&self, subject: &TagSubject) -> &T {
        match self.first_match(subject) {
            Some(rule) => {
                log::debug!("rule '{}' matched", rule.name);
                &rule.then
            }
            None => &self.fallback,
        }
    }
}

/// Outcomes of every rule in `rules` that matches, in table order.
pub fn all_matches<'a, T>(
    rules: &'a [Rule<T>],
    subject: &'a TagSubject,
) -> impl Iterator<Item = &'a T> + 'a {
    rules
        .iter()
        .filter(move |rule| subject.satisfies(rule))
        .map(|rule| &rule.then)
}
