//! Per-action slot bookkeeping.
//!
//! An action slot is one logical mutation channel (the product form, the
//! delete button, the list refresh). A slot admits at most one in-flight
//! request; while one is pending, further requests are rejected rather than
//! queued. Each settled operation leaves behind either no error or a single
//! message that replaced whatever was stored before.

use serde::Serialize;

use shopdeck_core::error::{Result, ShopdeckError};

/// State of one action slot.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    pending: bool,
    error: Option<String>,
}

impl ActionState {
    /// Claims the slot for a new request.
    ///
    /// Rejection leaves the stored error untouched; slot messages describe
    /// settled operations, not refused ones.
    pub fn begin(&mut self, action: &str) -> Result<()> {
        if self.pending {
            return Err(ShopdeckError::busy(action));
        }
        self.pending = true;
        Ok(())
    }

    /// Settles the in-flight request.
    ///
    /// Success (`None`) clears any prior message; failure replaces it.
    pub fn settle(&mut self, error: Option<String>) {
        self.pending = false;
        self.error = error;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Serializable view of the slot for the presentation layer.
    pub fn snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            pending: self.pending,
            error: self.error.clone(),
        }
    }
}

/// Snapshot of a slot as exposed to the view layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    pub pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
