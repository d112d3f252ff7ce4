//! REST implementation of the product repository.
//!
//! Talks to a FakeStore-shaped catalog API: `GET/POST /products`,
//! `GET/PUT/DELETE /products/{id}`. Transport failures and non-2xx responses
//! are folded into the failed operation's error category with the status and
//! body text in the message; callers never branch on status codes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use shopdeck_core::catalog::{NewProduct, Product, ProductId, ProductRepository};
use shopdeck_core::error::{Result, ShopdeckError};

use crate::config_service::RemoteConfig;
use crate::dto::product::{ProductDto, ProductPayload};

/// Repository backed by the remote catalog service of record.
#[derive(Clone)]
pub struct RestProductRepository {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RestProductRepository {
    /// Creates a repository for the configured remote endpoint.
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn record_url(&self, id: &ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// Formats a non-2xx response into an error message.
    async fn read_failure(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        format!("catalog API error ({status}): {body}")
    }
}

#[async_trait]
impl ProductRepository for RestProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.collection_url();
        tracing::debug!(%url, "fetching product collection");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ShopdeckError::load(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShopdeckError::load(Self::read_failure(response).await));
        }

        let records = response
            .json::<Vec<ProductDto>>()
            .await
            .map_err(|e| ShopdeckError::load(format!("unreadable response: {e}")))?;

        records
            .into_iter()
            .map(|dto| {
                dto.into_domain()
                    .map_err(|e| ShopdeckError::load(e.to_string()))
            })
            .collect()
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product> {
        let url = self.record_url(id);
        tracing::debug!(%url, "fetching product record");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ShopdeckError::load(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShopdeckError::load(Self::read_failure(response).await));
        }

        let record = response
            .json::<ProductDto>()
            .await
            .map_err(|e| ShopdeckError::load(format!("unreadable response: {e}")))?;

        record
            .into_domain()
            .map_err(|e| ShopdeckError::load(e.to_string()))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Option<ProductId>> {
        let url = self.collection_url();
        tracing::debug!(%url, title = %product.title, "creating product");

        let response = self
            .client
            .post(&url)
            .json(&ProductPayload::from(product))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ShopdeckError::save(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShopdeckError::save(Self::read_failure(response).await));
        }

        // The service echoes the created record. An echo without a usable id
        // is not a failure; the caller synthesizes one.
        match response.json::<ProductDto>().await {
            Ok(echo) => Ok(echo.id),
            Err(e) => {
                tracing::debug!("create echo not parseable: {e}");
                Ok(None)
            }
        }
    }

    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> Result<()> {
        let url = self.record_url(id);
        tracing::debug!(%url, "updating product");

        let response = self
            .client
            .put(&url)
            .json(&ProductPayload::from(product))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ShopdeckError::save(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShopdeckError::save(Self::read_failure(response).await));
        }

        // Echo body ignored; the caller rebuilds the record from the draft.
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<()> {
        let url = self.record_url(id);
        tracing::debug!(%url, "deleting product");

        let response = self
            .client
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ShopdeckError::delete(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShopdeckError::delete(Self::read_failure(response).await));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_normalize_trailing_slash() {
        let repository = RestProductRepository::new(&RemoteConfig {
            base_url: "https://fakestoreapi.com/".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(
            repository.collection_url(),
            "https://fakestoreapi.com/products"
        );
        assert_eq!(
            repository.record_url(&ProductId::from(7)),
            "https://fakestoreapi.com/products/7"
        );
    }
}
