//! HTTP REST API interfaces
//!
//! - `common`: Error envelope and validated JSON extractor
//! - `modules`: Request handlers and middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
