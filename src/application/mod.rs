//! Application layer - use cases over the subscription store

pub mod subscriptions;

pub use subscriptions::{
    CostCalculationQuery, CreateSubscriptionCommand, ListSubscriptionsQuery, SubscriptionService,
    UpdateSubscriptionCommand,
};
