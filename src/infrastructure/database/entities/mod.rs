//! Database entities module

pub mod subscription;

pub use subscription::Entity as Subscription;
