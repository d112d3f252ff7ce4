//! Product catalog domain models.
//!
//! Records mirror what the remote catalog service stores; drafts mirror what
//! the edit form stages. Draft fields are kept as strings the way form inputs
//! deliver them and are converted once, when a submit payload is built.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ShopdeckError};
use crate::form::DraftRecord;

/// Prefix marking identifiers synthesized locally for records the remote
/// service has not (yet) assigned an id to.
const LOCAL_ID_PREFIX: &str = "local-";

/// Opaque product identifier.
///
/// The remote service of record assigns these; deployments differ on whether
/// they arrive as JSON numbers or strings, so both are accepted. Within a
/// session an identifier is never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps an identifier received from the remote service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesizes a locally-unique identifier for a created record the
    /// service did not echo an id for.
    ///
    /// Random rather than clock-derived, so two near-simultaneous creates
    /// cannot collide.
    pub fn local() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// True if this identifier was synthesized locally.
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// Aggregate customer rating, supplied read-only by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A product record as held in the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Non-negative price in the store currency
    pub price: f64,
    pub description: String,
    pub category: String,
    /// Image URI, if the record has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Validated submit payload for a create or update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
}

impl NewProduct {
    /// Builds the store record for a confirmed mutation.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating: None,
        }
    }
}

/// Staging copy of a product while the add/edit form is open.
///
/// `id` records the draft's origin: `Some` means it was seeded from an
/// existing record and submits as an update, `None` submits as a create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ProductDraft {
    /// Empty template for the "add product" form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the form from an existing record.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone().unwrap_or_default(),
        }
    }

    /// True if this draft originated from an existing record.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Converts the staged fields into a submit payload.
    ///
    /// The price string must parse as a non-negative number; everything else
    /// is passed through, with an empty image treated as absent.
    pub fn to_new_product(&self) -> Result<NewProduct> {
        self.validate()?;
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| ShopdeckError::validation("price must be a number"))?;
        if price < 0.0 {
            return Err(ShopdeckError::validation("price must not be negative"));
        }
        let image = self.image.trim();
        Ok(NewProduct {
            title: self.title.trim().to_string(),
            price,
            description: self.description.clone(),
            category: self.category.clone(),
            image: (!image.is_empty()).then(|| image.to_string()),
        })
    }
}

impl DraftRecord for ProductDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "title" => self.title = value.to_string(),
            "price" => self.price = value.to_string(),
            "description" => self.description = value.to_string(),
            "category" => self.category = value.to_string(),
            "image" => self.image = value.to_string(),
            other => {
                return Err(ShopdeckError::validation(format!(
                    "unknown product field '{other}'"
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ShopdeckError::validation("title is required"));
        }
        if self.price.trim().is_empty() {
            return Err(ShopdeckError::validation("price is required"));
        }
        Ok(())
    }
}
