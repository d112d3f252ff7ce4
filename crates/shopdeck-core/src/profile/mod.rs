//! User profile domain.

pub mod model;

pub use model::{Profile, ProfileDraft, ProfileStats, SocialLinks};
