//! Infrastructure layer - external concerns

pub mod database;
pub mod storage;

pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmSubscriptionRepository};
pub use storage::InMemorySubscriptionRepository;
