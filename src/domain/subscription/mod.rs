//! Subscription aggregate
//!
//! The subscription entity, its partial-update and filter types, and the
//! repository contract used by the application layer.

pub mod model;
pub mod repository;

pub use model::{
    CostQuery, CostSummary, NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
    fold_service_name, SERVICE_NAME_MAX_LEN,
};
pub use repository::SubscriptionRepository;
