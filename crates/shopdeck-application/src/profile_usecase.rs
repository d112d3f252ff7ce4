//! Profile use case implementation.
//!
//! Holds the session's active profile and its edit form. The remote
//! collaborator exposes no profile endpoint, so a submitted draft is applied
//! to the held record only; the form flow and the action slot are the same
//! shape as the catalog's, so a remote call can be slotted in behind this
//! use case without changing the surface.

use tokio::sync::Mutex;

use shopdeck_core::error::Result;
use shopdeck_core::form::FormController;
use shopdeck_core::profile::{Profile, ProfileDraft};

use crate::slot::ActionState;
use crate::snapshot::ProfileSnapshot;

const SAVE_ACTION: &str = "profile save";

/// Use case for viewing and editing the active user profile.
pub struct ProfileUseCase {
    /// The session's active profile; present from construction onward
    profile: Mutex<Profile>,
    /// The profile edit form
    form: Mutex<FormController<ProfileDraft>>,
    save_slot: Mutex<ActionState>,
}

impl ProfileUseCase {
    /// Creates a use case holding the given profile.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile: Mutex::new(profile),
            form: Mutex::new(FormController::new()),
            save_slot: Mutex::new(ActionState::default()),
        }
    }

    /// The active profile.
    pub async fn profile(&self) -> Profile {
        self.profile.lock().await.clone()
    }

    // ============================================================================
    // Form hooks
    // ============================================================================

    /// Opens the edit form seeded from the active profile.
    pub async fn open_edit(&self) -> Result<()> {
        let seed = ProfileDraft::from_profile(&*self.profile.lock().await);
        self.form.lock().await.open(seed)
    }

    /// Mutates one field of the open draft (`social.twitter` addresses a
    /// nested field).
    pub async fn set_field(&self, name: &str, value: &str) -> Result<()> {
        self.form.lock().await.set_field(name, value)
    }

    /// Discards the open draft without touching the profile.
    pub async fn cancel(&self) -> Result<()> {
        self.form.lock().await.cancel()
    }

    /// Submits the open draft, applying it to the active profile.
    pub async fn submit(&self) -> Result<Profile> {
        let draft = self.form.lock().await.begin_submit()?;
        self.save_slot.lock().await.begin(SAVE_ACTION)?;

        let updated = {
            let mut profile = self.profile.lock().await;
            let updated = draft.apply_to(&profile);
            *profile = updated.clone();
            updated
        };
        tracing::debug!("profile updated");

        self.form.lock().await.finish_submit(true);
        self.save_slot.lock().await.settle(None);
        Ok(updated)
    }

    /// Serializable state for the presentation layer.
    pub async fn snapshot(&self) -> ProfileSnapshot {
        let form = self.form.lock().await;
        ProfileSnapshot {
            profile: self.profile.lock().await.clone(),
            form: form.state(),
            draft: form.draft().cloned(),
            save: self.save_slot.lock().await.snapshot(),
        }
    }
}
