//! Wire DTOs for the remote catalog API.
//!
//! The wire shapes are kept separate from the domain models so that remote
//! payload quirks (optional ids on create echoes, missing fields) stay at
//! this boundary.

pub mod product;
