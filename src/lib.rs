//! # Subscription Service
//!
//! REST backend for recording users' recurring online subscriptions and
//! totalling what they cost over a range of months.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Subscription entity, month-granularity dates, repository trait
//! - **application**: Use cases (validation and orchestration)
//! - **infrastructure**: SeaORM and in-memory stores, migrations
//! - **interfaces**: HTTP REST API with Swagger documentation
//! - **shared**: Errors, pagination, validation helpers, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
