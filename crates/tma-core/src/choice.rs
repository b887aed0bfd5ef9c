//! Selectable glyphs for the emoji selector.

use serde::{Deserialize, Serialize};

/// Glyphs offered when the configuration does not name any.
pub const DEFAULT_CHOICES: [&str; 4] = ["🍎", "🍌", "🍇", "🍑"];

/// A single selectable glyph.
///
/// Compared by value: two choices are the same selection when their glyphs
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Choice(String);

impl Choice {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Ordered, duplicate-free set of glyphs the user may pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    items: Vec<Choice>,
}

impl Default for ChoiceSet {
    fn default() -> Self {
        Self::from_items(DEFAULT_CHOICES)
    }
}

impl ChoiceSet {
    /// Build a set from configured glyphs.
    ///
    /// Order is kept; blank entries and repeats are dropped so the selector
    /// never renders two markers for the same value.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected: Vec<Choice> = Vec::new();
        for item in items {
            let glyph = item.as_ref().trim();
            if glyph.is_empty() || collected.iter().any(|c| c.as_str() == glyph) {
                continue;
            }
            collected.push(Choice::new(glyph));
        }
        Self { items: collected }
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.items.iter().any(|c| c.as_str() == glyph)
    }

    /// Look up a choice by its position in the selector.
    pub fn get(&self, index: usize) -> Option<&Choice> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
