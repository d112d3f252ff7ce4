//! User profile domain models.
//!
//! The dashboard holds exactly one active profile per session. The remote
//! collaborator exposes no profile endpoint, so edits apply to the held
//! record only; the record shape still mirrors a full account profile.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopdeckError};
use crate::form::DraftRecord;

/// Social account handles attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

/// Read-only account counters shown on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub products: u32,
    pub followers: u32,
    pub following: u32,
}

/// The active user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    /// Month and year the account joined, as display text
    #[serde(default)]
    pub join_date: String,
    /// Avatar image URI
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Staging copy of the profile while the edit form is open.
///
/// Only the editable fields are staged; id, join date, and stats are carried
/// over unchanged when the draft is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub department: String,
    pub location: String,
    pub bio: String,
    pub avatar: String,
    pub social: SocialLinks,
}

impl ProfileDraft {
    /// Seeds the edit form from the active profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            role: profile.role.clone(),
            department: profile.department.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            avatar: profile.avatar.clone(),
            social: profile.social.clone(),
        }
    }

    /// Produces the updated profile, preserving the fields the form does
    /// not edit.
    pub fn apply_to(&self, profile: &Profile) -> Profile {
        Profile {
            id: profile.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            location: self.location.clone(),
            bio: self.bio.clone(),
            join_date: profile.join_date.clone(),
            avatar: self.avatar.clone(),
            social: self.social.clone(),
            stats: profile.stats,
        }
    }
}

impl DraftRecord for ProfileDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        // One level of nesting: "social.twitter" addresses a sub-field.
        if let Some((parent, child)) = name.split_once('.') {
            if parent != "social" {
                return Err(ShopdeckError::validation(format!(
                    "unknown profile field '{name}'"
                )));
            }
            match child {
                "twitter" => self.social.twitter = value.to_string(),
                "linkedin" => self.social.linkedin = value.to_string(),
                "github" => self.social.github = value.to_string(),
                _ => {
                    return Err(ShopdeckError::validation(format!(
                        "unknown profile field '{name}'"
                    )));
                }
            }
            return Ok(());
        }

        match name {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "role" => self.role = value.to_string(),
            "department" => self.department = value.to_string(),
            "location" => self.location = value.to_string(),
            "bio" => self.bio = value.to_string(),
            "avatar" => self.avatar = value.to_string(),
            other => {
                return Err(ShopdeckError::validation(format!(
                    "unknown profile field '{other}'"
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ShopdeckError::validation("name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(ShopdeckError::validation("email is required"));
        }
        Ok(())
    }
}
