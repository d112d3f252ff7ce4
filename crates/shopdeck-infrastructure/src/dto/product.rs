//! Product DTOs for the remote catalog API.

use serde::{Deserialize, Serialize};

use shopdeck_core::catalog::{NewProduct, Product, ProductId, Rating};
use shopdeck_core::error::{Result, ShopdeckError};

/// Rating object as the remote service ships it.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingDto {
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub count: u64,
}

impl RatingDto {
    fn into_domain(self) -> Rating {
        Rating {
            rate: self.rate,
            count: self.count,
        }
    }
}

/// Product record as the remote service ships it.
///
/// `id` is optional because a create echo is not guaranteed to carry one;
/// list and single-record responses must have it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingDto>,
}

impl ProductDto {
    /// Converts a fetched record into the domain model.
    pub fn into_domain(self) -> Result<Product> {
        let id = self.id.ok_or_else(|| ShopdeckError::Serialization {
            format: "JSON".to_string(),
            message: "product record missing id".to_string(),
        })?;
        Ok(Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating: self.rating.map(RatingDto::into_domain),
        })
    }
}

/// Request body for create and update calls.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&NewProduct> for ProductPayload {
    fn from(product: &NewProduct) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}
