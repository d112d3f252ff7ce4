//! Infrastructure layer for Shopdeck.
//!
//! Concrete adapters behind the domain ports: the REST-backed product
//! repository and the configuration service.

pub mod config_service;
pub mod dto;
pub mod rest_product_repository;

pub use crate::config_service::{ConfigService, RemoteConfig};
pub use crate::rest_product_repository::RestProductRepository;
