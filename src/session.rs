use crate::catalog::ReferenceText;
use crate::error::{DictationError, InputProblem};
use crate::scoring::compare;
use serde::Serialize;
use std::collections::BTreeSet;

/// Where a practice attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No reference text chosen yet.
    Selecting,
    Writing,
    Checked,
}

/// State of a single practice attempt.
///
/// Fields are only reachable through the operations below so the draft lock
/// and the "mismatches only after a check" rule always hold.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active_text: Option<ReferenceText>,
    draft: String,
    checked: bool,
    mismatches: BTreeSet<usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (&self.active_text, self.checked) {
            (None, _) => Phase::Selecting,
            (Some(_), false) => Phase::Writing,
            (Some(_), true) => Phase::Checked,
        }
    }

    pub fn active_text(&self) -> Option<&ReferenceText> {
        self.active_text.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Mismatched word positions; empty until the draft has been checked.
    pub fn mismatches(&self) -> &BTreeSet<usize> {
        &self.mismatches
    }

    /// Whether `check` would currently be accepted.
    pub fn can_check(&self) -> bool {
        self.active_text.is_some() && !self.draft.trim().is_empty()
    }

    pub fn select_text(&mut self, text: ReferenceText) -> Result<(), DictationError> {
        if self.active_text.is_some() {
            return Err(DictationError::InvalidInput(
                InputProblem::TextAlreadySelected,
            ));
        }

        log::info!("selected reference text {} ('{}')", text.id, text.title);
        self.clear_attempt();
        self.active_text = Some(text);
        Ok(())
    }

    /// Replace the draft. Refused once the draft has been checked.
    pub fn update_draft(&mut self, draft: impl Into<String>) -> Result<(), DictationError> {
        if self.checked {
            return Err(DictationError::InvariantViolation);
        }

        self.draft = draft.into();
        Ok(())
    }

    pub fn check(&mut self) -> Result<&BTreeSet<usize>, DictationError> {
        let text = self
            .active_text
            .as_ref()
            .ok_or(DictationError::InvalidInput(InputProblem::NoActiveText))?;

        if self.draft.trim().is_empty() {
            return Err(DictationError::InvalidInput(InputProblem::EmptyDraft));
        }

        self.mismatches = compare(&text.body, &self.draft);
        self.checked = true;
        log::info!(
            "checked draft for text {}: {} mismatched positions",
            text.id,
            self.mismatches.len()
        );

        Ok(&self.mismatches)
    }

    /// Start the same text over.
    pub fn reset(&mut self) {
        log::debug!("resetting attempt");
        self.clear_attempt();
    }

    /// Return to the selection screen.
    pub fn deselect_text(&mut self) {
        self.reset();
        self.active_text = None;
    }

    fn clear_attempt(&mut self) {
        self.draft.clear();
        self.checked = false;
        self.mismatches.clear();
    }
}
