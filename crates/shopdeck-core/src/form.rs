//! Form controller state machine.
//!
//! A form stages a mutable draft copy of a record while the user edits it.
//! The draft is owned exclusively by the controller and is only handed out at
//! submit time; nothing touches shared state until the submit is confirmed.
//!
//! Lifecycle: `Closed -> open(seed) -> Editing -> begin_submit -> Submitting`,
//! then `finish_submit(true)` closes the form and `finish_submit(false)`
//! returns it to `Editing` with the draft intact. `cancel` discards the draft
//! from `Editing` without side effects.

use serde::Serialize;

use crate::error::{Result, ShopdeckError};

/// Name of the action used in busy rejections while a submit is in flight.
const FORM_ACTION: &str = "form submit";

/// A record draft that can be edited field-by-field.
///
/// Implementors accept one level of nested field addressing: a name
/// containing a `'.'` is split once, and the left part selects a sub-record
/// (e.g. `social.twitter`).
pub trait DraftRecord: Clone {
    /// Sets a single field of the draft from its form-input string value.
    fn set_field(&mut self, name: &str, value: &str) -> Result<()>;

    /// Checks that required fields are present (non-empty).
    ///
    /// This is a presence check only; format conversion happens when the
    /// draft is turned into a submit payload.
    fn validate(&self) -> Result<()>;
}

/// Observable state of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormState {
    /// No draft is open
    Closed,
    /// A draft is open and accepting field edits
    Editing,
    /// A submit is in flight; edits and further submits are rejected
    Submitting,
}

enum Inner<D> {
    Closed,
    Editing(D),
    Submitting(D),
}

/// Controller binding a draft record to an edit session.
pub struct FormController<D: DraftRecord> {
    inner: Inner<D>,
}

impl<D: DraftRecord> FormController<D> {
    /// Creates a controller with no open form.
    pub fn new() -> Self {
        Self {
            inner: Inner::Closed,
        }
    }

    /// Returns the observable state of the form.
    pub fn state(&self) -> FormState {
        match self.inner {
            Inner::Closed => FormState::Closed,
            Inner::Editing(_) => FormState::Editing,
            Inner::Submitting(_) => FormState::Submitting,
        }
    }

    /// Returns the current draft, if a form is open.
    pub fn draft(&self) -> Option<&D> {
        match &self.inner {
            Inner::Closed => None,
            Inner::Editing(draft) | Inner::Submitting(draft) => Some(draft),
        }
    }

    /// Opens the form with a seed draft.
    ///
    /// Reopening while editing replaces the current draft (the dashboard
    /// reuses one form for "add" and "edit"). Opening while a submit is in
    /// flight is rejected.
    pub fn open(&mut self, seed: D) -> Result<()> {
        match self.inner {
            Inner::Submitting(_) => Err(ShopdeckError::busy(FORM_ACTION)),
            _ => {
                self.inner = Inner::Editing(seed);
                Ok(())
            }
        }
    }

    /// Mutates one field of the open draft.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match &mut self.inner {
            Inner::Editing(draft) => draft.set_field(name, value),
            Inner::Submitting(_) => Err(ShopdeckError::busy(FORM_ACTION)),
            Inner::Closed => Err(ShopdeckError::internal("no form is open")),
        }
    }

    /// Discards the draft without side effects.
    pub fn cancel(&mut self) -> Result<()> {
        match self.inner {
            Inner::Editing(_) => {
                self.inner = Inner::Closed;
                Ok(())
            }
            Inner::Submitting(_) => Err(ShopdeckError::busy(FORM_ACTION)),
            Inner::Closed => Ok(()),
        }
    }

    /// Validates the draft and transitions to `Submitting`.
    ///
    /// Returns a copy of the draft for the caller to send. On a validation
    /// failure the form stays in `Editing` and the error is returned.
    pub fn begin_submit(&mut self) -> Result<D> {
        match &self.inner {
            Inner::Editing(draft) => {
                draft.validate()?;
                let staged = draft.clone();
                self.inner = Inner::Submitting(staged.clone());
                Ok(staged)
            }
            Inner::Submitting(_) => Err(ShopdeckError::busy(FORM_ACTION)),
            Inner::Closed => Err(ShopdeckError::internal("no form is open")),
        }
    }

    /// Settles an in-flight submit.
    ///
    /// Success closes the form and discards the draft; failure returns to
    /// `Editing` with the draft intact so the user can retry.
    pub fn finish_submit(&mut self, success: bool) {
        // Take the draft out so the failure path can hand it back.
        let inner = std::mem::replace(&mut self.inner, Inner::Closed);
        match inner {
            Inner::Submitting(draft) if !success => {
                self.inner = Inner::Editing(draft);
            }
            Inner::Submitting(_) => {}
            // finish_submit without a pending submit leaves the state as-is
            other => self.inner = other,
        }
    }
}

impl<D: DraftRecord> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}
