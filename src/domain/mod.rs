pub mod month_date;
pub mod subscription;

pub use month_date::{validate_range, MonthDate, Period};
pub use subscription::{
    CostQuery, CostSummary, NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
    SubscriptionRepository, SERVICE_NAME_MAX_LEN,
};

pub use crate::shared::types::{DomainError, DomainResult};
