use crate::choice::{Choice, ChoiceSet};
use crate::error::FormError;

/// Local form state: free text plus at most one selected glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub text: String,
    pub selected: Option<Choice>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Select a glyph from `choices`.
    ///
    /// Selecting the current value again is a no-op (there is no toggle-off).
    /// Returns whether the selection changed.
    pub fn select(&mut self, choices: &ChoiceSet, glyph: &str) -> Result<bool, FormError> {
        if !choices.contains(glyph) {
            return Err(FormError::UnknownChoice(glyph.to_string()));
        }
        if self.is_selected(glyph) {
            return Ok(false);
        }
        self.selected = Some(Choice::new(glyph));
        Ok(true)
    }

    pub fn is_selected(&self, glyph: &str) -> bool {
        self.selected.as_ref().is_some_and(|c| c.as_str() == glyph)
    }

    /// Reset text and selection.
    pub fn clear(&mut self) {
        self.text.clear();
        self.selected = None;
    }
}
