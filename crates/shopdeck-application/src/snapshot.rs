//! Serializable state snapshots for the presentation layer.
//!
//! The view layer renders from these; it never touches the stores directly.

use serde::Serialize;

use shopdeck_core::catalog::{Product, ProductDraft};
use shopdeck_core::form::FormState;
use shopdeck_core::profile::{Profile, ProfileDraft};

use crate::slot::SlotSnapshot;

/// Everything the catalog view needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub form: FormState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<ProductDraft>,
    pub load: SlotSnapshot,
    pub save: SlotSnapshot,
    pub delete: SlotSnapshot,
}

/// Everything the profile view needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub profile: Profile,
    pub form: FormState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<ProfileDraft>,
    pub save: SlotSnapshot,
}
