//! Subscription use cases

pub mod service;

pub use service::{
    CostCalculationQuery, CreateSubscriptionCommand, ListSubscriptionsQuery, SubscriptionService,
    UpdateSubscriptionCommand,
};
