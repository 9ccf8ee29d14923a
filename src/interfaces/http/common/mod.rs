//! Shared HTTP plumbing: error envelope and validated extractor

pub mod error;
pub mod validated_json;

pub use error::{ApiError, ErrorResponse};
pub use validated_json::ValidatedJson;
