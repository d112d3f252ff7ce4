//! Product repository trait.
//!
//! The port to the remote catalog service of record. Implementations live in
//! the infrastructure layer; the use cases only see this trait.

use async_trait::async_trait;

use crate::catalog::model::{NewProduct, Product, ProductId};
use crate::error::Result;

/// Remote data access for the product collection.
///
/// Every method maps one REST call. Transport failures and non-2xx responses
/// are reported uniformly as the operation's error category; callers do not
/// distinguish by status code.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetches the full collection.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Fetches a single record by identifier.
    async fn fetch_product(&self, id: &ProductId) -> Result<Product>;

    /// Creates a record and returns the identifier the service echoed,
    /// if it echoed one.
    async fn create_product(&self, product: &NewProduct) -> Result<Option<ProductId>>;

    /// Replaces the record with the given identifier.
    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> Result<()>;

    /// Deletes the record with the given identifier.
    async fn delete_product(&self, id: &ProductId) -> Result<()>;
}
