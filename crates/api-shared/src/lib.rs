//! # API Shared
//!
//! Shared response types and services for the directory APIs.
//!
//! Contains:
//! - JSON response bodies (`models` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `directory-cli` so that both surfaces describe a doctor the same way.

pub mod health;
pub mod models;

pub use health::HealthService;
pub use models::*;
