//! Subscription repository interface

use async_trait::async_trait;

use super::model::{CostQuery, NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch};
use crate::shared::{DomainResult, PageRequest};

/// Persistence contract for subscriptions.
///
/// Implementations report a missing row as `DomainError::NotFound` and any
/// backend failure as `DomainError::Storage`.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Store a new subscription, assigning its id and timestamps
    async fn insert(&self, subscription: NewSubscription) -> DomainResult<Subscription>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Subscription>;

    /// Matching rows, newest first. Never fails on "no rows".
    async fn list(
        &self,
        filter: &SubscriptionFilter,
        page: PageRequest,
    ) -> DomainResult<Vec<Subscription>>;

    /// Number of rows matching `filter`, ignoring pagination
    async fn count(&self, filter: &SubscriptionFilter) -> DomainResult<u64>;

    /// Apply a partial update. An empty patch is rejected with
    /// `InvalidData` before storage is touched.
    async fn update(&self, id: i32, patch: SubscriptionPatch) -> DomainResult<Subscription>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Sum of `price` over every row matching the query; 0 when none match.
    async fn sum_overlapping(&self, query: &CostQuery) -> DomainResult<i64>;
}
