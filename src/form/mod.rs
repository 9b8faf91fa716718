//! The add-transaction form: editing, validation and the simulated
//! submission delay.
//!
//! `Editing -> Submitting -> Submitted -> closed`. A failed submit stays in
//! `Editing` with per-field errors. Time only moves through [`TransactionForm::tick`],
//! so the run loop decides the clock.

mod validate;

pub(crate) use validate::{validate, Draft, FieldError, FieldErrors, DESCRIPTION_MAX};

use std::time::{Duration, Instant};

use crate::models::{NewTransaction, TransactionType};

/// Processing delay before an accepted form emits its creation request.
pub(crate) const SUBMIT_DELAY: Duration = Duration::from_millis(1000);
/// How long the success state stays up before the form closes.
pub(crate) const CLOSE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Type,
    Amount,
    Category,
    Description,
    Cancel,
    Submit,
}

impl Field {
    pub(crate) fn all() -> &'static [Field] {
        &[
            Self::Type,
            Self::Amount,
            Self::Category,
            Self::Description,
            Self::Cancel,
            Self::Submit,
        ]
    }

    pub(crate) fn next(&self) -> Self {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    pub(crate) fn prev(&self) -> Self {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormPhase {
    Editing,
    Submitting {
        since: Instant,
        request: NewTransaction,
    },
    Submitted {
        since: Instant,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormEvent {
    Created(NewTransaction),
    Closed,
}

#[derive(Debug, Clone)]
pub(crate) struct TransactionForm {
    pub(crate) draft: Draft,
    pub(crate) errors: FieldErrors,
    pub(crate) phase: FormPhase,
    pub(crate) focus: Field,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionForm {
    pub(crate) fn new() -> Self {
        Self {
            draft: Draft::default(),
            errors: FieldErrors::default(),
            phase: FormPhase::Editing,
            focus: Field::Type,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    /// Switching type resets the category, since the preset lists differ.
    pub(crate) fn set_type(&mut self, kind: TransactionType) {
        if !self.is_editing() || self.draft.kind == kind {
            return;
        }
        self.draft.kind = kind;
        self.draft.category.clear();
        self.errors.category = None;
    }

    /// Step through "no category" followed by the presets for the current type.
    pub(crate) fn cycle_category(&mut self, delta: isize) {
        if !self.is_editing() {
            return;
        }
        let presets = self.draft.kind.categories();
        let slots = presets.len() as isize + 1;
        let current = presets
            .iter()
            .position(|c| *c == self.draft.category)
            .map_or(0, |i| i as isize + 1);
        let next = (current + delta).rem_euclid(slots);
        self.draft.category = if next == 0 {
            String::new()
        } else {
            presets[(next - 1) as usize].to_string()
        };
        self.errors.category = None;
    }

    /// Type into the focused text field. The description is capped at
    /// [`DESCRIPTION_MAX`] characters.
    pub(crate) fn push_char(&mut self, c: char) {
        if !self.is_editing() {
            return;
        }
        match self.focus {
            Field::Amount => {
                self.draft.amount.push(c);
                self.errors.amount = None;
            }
            Field::Description => {
                if self.draft.description.chars().count() < DESCRIPTION_MAX {
                    self.draft.description.push(c);
                }
                self.errors.description = None;
            }
            _ => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        if !self.is_editing() {
            return;
        }
        match self.focus {
            Field::Amount => {
                self.draft.amount.pop();
                self.errors.amount = None;
            }
            Field::Description => {
                self.draft.description.pop();
                self.errors.description = None;
            }
            _ => {}
        }
    }

    /// Validate and, when everything passes, start the submission delay.
    /// Returns whether the form was accepted.
    pub(crate) fn submit(&mut self, now: Instant) -> bool {
        if !self.is_editing() {
            return false;
        }
        match validate(&self.draft) {
            Ok(request) => {
                self.errors = FieldErrors::default();
                self.phase = FormPhase::Submitting {
                    since: now,
                    request,
                };
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    /// Advance the submission timers.
    pub(crate) fn tick(&mut self, now: Instant) -> Option<FormEvent> {
        match &self.phase {
            FormPhase::Editing => None,
            FormPhase::Submitting { since, request } => {
                if now.saturating_duration_since(*since) < SUBMIT_DELAY {
                    return None;
                }
                let request = request.clone();
                self.phase = FormPhase::Submitted { since: now };
                Some(FormEvent::Created(request))
            }
            FormPhase::Submitted { since } => {
                if now.saturating_duration_since(*since) < CLOSE_DELAY {
                    return None;
                }
                Some(FormEvent::Closed)
            }
        }
    }
}
